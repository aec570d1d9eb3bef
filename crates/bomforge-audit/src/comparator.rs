//! Structural diff between two SBOM documents, indexed by component name.

use std::collections::BTreeMap;

use bomforge_core::{Component, DiffKind, DiffStatistics, Difference};

use crate::error::AuditError;

pub struct Comparator;

/// True when two components carry the same observable state for diffing purposes —
/// broader than [`Component::eq`] (identity hash), since a diff must also flag a
/// license or description change even when name/version/type/purl are unchanged.
fn structurally_equal(a: &Component, b: &Component) -> bool {
    a.version == b.version
        && a.file_type == b.file_type
        && a.license == b.license
        && a.description == b.description
        && a.checksum == b.checksum
        && a.package_manager == b.package_manager
        && a.scope == b.scope
}

impl Comparator {
    /// Compare two already-parsed component sets (old vs. new).
    pub fn compare(old: &[Component], new: &[Component]) -> (Vec<Difference>, DiffStatistics) {
        let old_by_name: BTreeMap<&str, &Component> =
            old.iter().map(|c| (c.name.as_str(), c)).collect();
        let new_by_name: BTreeMap<&str, &Component> =
            new.iter().map(|c| (c.name.as_str(), c)).collect();

        let mut differences = Vec::new();
        let mut stats = DiffStatistics::default();

        for (name, new_component) in &new_by_name {
            match old_by_name.get(name) {
                None => {
                    differences.push(Difference {
                        kind: DiffKind::Added,
                        component: (*new_component).clone(),
                        old_component: None,
                    });
                    stats.added += 1;
                }
                Some(old_component) => {
                    if structurally_equal(old_component, new_component) {
                        differences.push(Difference {
                            kind: DiffKind::Unchanged,
                            component: (*new_component).clone(),
                            old_component: None,
                        });
                        stats.unchanged += 1;
                    } else {
                        differences.push(Difference {
                            kind: DiffKind::Modified,
                            component: (*new_component).clone(),
                            old_component: Some((*old_component).clone()),
                        });
                        stats.modified += 1;
                    }
                }
            }
        }

        for (name, old_component) in &old_by_name {
            if !new_by_name.contains_key(name) {
                differences.push(Difference {
                    kind: DiffKind::Removed,
                    component: (*old_component).clone(),
                    old_component: None,
                });
                stats.removed += 1;
            }
        }

        (differences, stats)
    }

    /// Parse and compare two SBOM documents, auto-detecting format/version independently
    /// on each side (mixed formats are permitted).
    pub fn compare_content(
        old_content: &str,
        new_content: &str,
    ) -> Result<(Vec<Difference>, DiffStatistics), AuditError> {
        let old = parse_auto(old_content)?;
        let new = parse_auto(new_content)?;
        Ok(Self::compare(&old, &new))
    }
}

fn parse_auto(content: &str) -> Result<Vec<Component>, AuditError> {
    let (format, version) =
        bomforge_formats::detect_format(content).ok_or(AuditError::UndetectableFormat)?;
    let handler = bomforge_formats::resolve(format.as_str(), &version)?;
    Ok(handler.parse(content)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use bomforge_core::FileType;

    fn component(name: &str, version: &str, license: &str) -> Component {
        let mut c = Component::new(name, format!("/{name}")).unwrap();
        c.version = version.to_owned();
        c.license = license.to_owned();
        c.file_type = FileType::SharedLibrary;
        c
    }

    #[test]
    fn identical_sets_are_fully_unchanged() {
        let set = vec![component("libfoo", "1.0.0", "MIT")];
        let (_, stats) = Comparator::compare(&set, &set);
        assert_eq!(stats, DiffStatistics { added: 0, removed: 0, modified: 0, unchanged: 1 });
    }

    #[test]
    fn scenario_added_removed_modified() {
        let old = vec![
            component("libfoo", "1.0.0", "MIT"),
            component("libbar", "2.0.0", "Apache-2.0"),
        ];
        let new = vec![
            component("libfoo", "1.1.0", "MIT"),
            component("libbaz", "3.0.0", "GPL-3.0"),
        ];
        let (diffs, stats) = Comparator::compare(&old, &new);
        assert_eq!(stats, DiffStatistics { added: 1, removed: 1, modified: 1, unchanged: 0 });

        let modified = diffs.iter().find(|d| d.kind == DiffKind::Modified).unwrap();
        assert_eq!(modified.component.version, "1.1.0");
        assert_eq!(modified.old_component.as_ref().unwrap().version, "1.0.0");
    }

    #[test]
    fn license_only_change_is_modified_not_unchanged() {
        let old = vec![component("libfoo", "1.0.0", "MIT")];
        let new = vec![component("libfoo", "1.0.0", "Apache-2.0")];
        let (diffs, stats) = Comparator::compare(&old, &new);
        assert_eq!(stats.modified, 1);
        assert_eq!(diffs[0].kind, DiffKind::Modified);
    }
}
