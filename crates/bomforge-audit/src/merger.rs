//! Union multiple SBOM documents into one, keyed by `name:version`.

use std::collections::BTreeMap;

use bomforge_core::{Component, DocumentMetadata};

use crate::error::AuditError;

pub struct Merger;

impl Merger {
    /// Parse each of `contents` (auto-detecting format per document) and union their
    /// components, first occurrence wins on a `name:version` key collision.
    pub fn merge_content(contents: &[String]) -> Result<Vec<Component>, AuditError> {
        let mut merged: BTreeMap<String, Component> = BTreeMap::new();
        for content in contents {
            let (format, version) =
                bomforge_formats::detect_format(content).ok_or(AuditError::UndetectableFormat)?;
            let handler = bomforge_formats::resolve(format.as_str(), &version)?;
            for component in handler.parse(content)? {
                let key = format!("{}:{}", component.name, component.version);
                merged.entry(key).or_insert(component);
            }
        }
        Ok(merged.into_values().collect())
    }

    /// Merge and re-emit in `output_format`/`output_version`.
    pub fn merge_and_emit(
        contents: &[String],
        output_format: &str,
        output_version: &str,
    ) -> Result<String, AuditError> {
        let components = Self::merge_content(contents)?;
        let handler = bomforge_formats::resolve(output_format, output_version)?;
        Ok(handler.emit(&components, &DocumentMetadata::default())?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cyclonedx_doc(name: &str, version: &str) -> String {
        format!(
            r#"{{"bomFormat":"CycloneDX","specVersion":"1.6","version":1,"metadata":{{}},"components":[{{"type":"library","bom-ref":"{name}-{version}","name":"{name}","version":"{version}"}}]}}"#
        )
    }

    #[test]
    fn merges_disjoint_sets() {
        let docs = vec![cyclonedx_doc("libA", "1.0.0"), cyclonedx_doc("libB", "2.0.0")];
        let merged = Merger::merge_content(&docs).unwrap();
        assert_eq!(merged.len(), 2);
    }

    #[test]
    fn first_occurrence_wins_on_collision() {
        let docs = vec![cyclonedx_doc("libA", "1.0.0"), cyclonedx_doc("libA", "1.0.0")];
        let merged = Merger::merge_content(&docs).unwrap();
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn merge_and_emit_produces_target_format() {
        let docs = vec![cyclonedx_doc("libA", "1.0.0")];
        let out = Merger::merge_and_emit(&docs, "cyclonedx", "1.6").unwrap();
        assert!(out.contains("CycloneDX"));
    }
}
