//! SPDX 2.3 tag-value emitter, parser, and validator.

use std::collections::BTreeMap;

use bomforge_core::{Component, DocumentMetadata, FileType, ValidationResult};

use crate::error::FormatError;
use crate::util;
use crate::FormatHandler;

pub struct Spdx23Handler;

fn file_type_tag(ft: FileType) -> &'static str {
    match ft {
        FileType::Executable => "BINARY",
        FileType::SharedLibrary => "BINARY",
        FileType::StaticLibrary => "ARCHIVE",
        FileType::Object => "BINARY",
        FileType::Source => "SOURCE",
        FileType::Unknown => "OTHER",
    }
}

impl FormatHandler for Spdx23Handler {
    fn format_name(&self) -> &'static str {
        "SPDX"
    }

    fn format_version(&self) -> &str {
        "2.3"
    }

    fn file_extension(&self) -> &'static str {
        "spdx"
    }

    fn supports_feature(&self, _feature: &str) -> bool {
        false
    }

    fn emit(&self, components: &[Component], metadata: &DocumentMetadata) -> Result<String, FormatError> {
        let mut out = String::new();
        out.push_str("SPDXVersion: SPDX-2.3\n");
        out.push_str("DataLicense: CC0-1.0\n");
        out.push_str("SPDXID: SPDXRef-DOCUMENT\n");
        let doc_name = if metadata.document_name.is_empty() {
            "SBOM"
        } else {
            &metadata.document_name
        };
        out.push_str(&format!("DocumentName: {doc_name}\n"));
        let namespace = if metadata.document_namespace.is_empty() {
            format!("https://bomforge.invalid/spdxdocs/{}", uuid::Uuid::new_v4())
        } else {
            metadata.document_namespace.clone()
        };
        out.push_str(&format!("DocumentNamespace: {namespace}\n"));
        let creator = if metadata.creator_tool.is_empty() {
            "bomforge"
        } else {
            &metadata.creator_tool
        };
        out.push_str(&format!("Creator: Tool: {creator}\n"));
        let created = if metadata.created.is_empty() {
            util::current_timestamp()
        } else {
            metadata.created.clone()
        };
        out.push_str(&format!("Created: {created}\n"));
        out.push('\n');

        let mut sorted: Vec<&Component> = components.iter().collect();
        sorted.sort_by(|a, b| a.bom_ref().cmp(&b.bom_ref()));

        for c in &sorted {
            let id = util::spdx_id(&c.name);
            out.push_str(&format!("FileName: {}\n", c.name));
            out.push_str(&format!("SPDXID: {id}\n"));
            out.push_str(&format!("FileType: {}\n", file_type_tag(c.file_type)));
            if let Some(alg) = util::checksum_algorithm_name(&c.checksum, true) {
                let alg = if alg == "SHA256" { "SHA256" } else { "SHA1" };
                out.push_str(&format!("FileChecksum: {alg}: {}\n", c.checksum));
            }
            if !c.dependencies.is_empty() {
                out.push_str(&format!(
                    "FileComment: depends on {}\n",
                    c.dependencies.join(", ")
                ));
            } else {
                out.push_str(&format!("FileComment: {:?} file\n", c.file_type));
            }
            out.push('\n');
        }

        for c in &sorted {
            let id = util::spdx_id(&c.name);
            out.push_str(&format!("Relationship: SPDXRef-Package CONTAINS {id}\n"));
            for dep in &c.dependencies {
                let dep_id = util::spdx_id(dep);
                out.push_str(&format!("Relationship: {id} DEPENDS_ON {dep_id}\n"));
            }
        }

        Ok(out)
    }

    fn parse(&self, content: &str) -> Result<Vec<Component>, FormatError> {
        let mut components = Vec::new();
        let mut current: Option<Component> = None;

        for line in content.lines() {
            let line = line.trim();
            if let Some(rest) = line.strip_prefix("FileName:") {
                if let Some(c) = current.take() {
                    components.push(c);
                }
                let name = rest.trim().to_owned();
                current = Some(Component::new(&name, &name)?);
            } else if let Some(rest) = line.strip_prefix("FileChecksum:") {
                if let Some(c) = current.as_mut() {
                    if let Some((_, hex)) = rest.trim().split_once(':') {
                        c.checksum = hex.trim().to_owned();
                    }
                }
            }
        }
        if let Some(c) = current.take() {
            components.push(c);
        }
        Ok(components)
    }

    fn validate(&self, content: &str) -> ValidationResult {
        let mut result = ValidationResult::ok();
        if content.trim().is_empty() {
            result.add_error("Content is empty");
            return result;
        }
        let required = [
            ("SPDXVersion:", "SPDXVersion"),
            ("DataLicense:", "DataLicense"),
            ("SPDXID:", "SPDXID"),
            ("DocumentName:", "DocumentName"),
            ("DocumentNamespace:", "DocumentNamespace"),
            ("Creator:", "Creator"),
            ("Created:", "Created"),
        ];
        for (tag, label) in required {
            if !content.lines().any(|l| l.trim_start().starts_with(tag)) {
                result.add_error(format!("missing required tag: {label}"));
            }
        }
        for line in content.lines() {
            if let Some(rest) = line.trim().strip_prefix("SPDXID:") {
                let id = rest.trim();
                if !id.starts_with("SPDXRef-")
                    || !id[8..].chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
                {
                    result.add_error(format!("invalid SPDXID: {id}"));
                }
            }
        }
        let mut meta = BTreeMap::new();
        meta.insert("format".to_owned(), "SPDX".to_owned());
        meta.insert("version".to_owned(), "2.3".to_owned());
        result.metadata = meta;
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_components() -> Vec<Component> {
        let mut lib = Component::new("libfoo", "/lib/libfoo.a").unwrap();
        lib.version = "1.0.0".to_owned();
        lib.file_type = FileType::StaticLibrary;
        lib.checksum = "d".repeat(40);
        vec![lib]
    }

    #[test]
    fn emits_required_header_tags() {
        let handler = Spdx23Handler;
        let out = handler.emit(&sample_components(), &DocumentMetadata::default()).unwrap();
        assert!(out.contains("SPDXVersion: SPDX-2.3"));
        assert!(out.contains("DataLicense: CC0-1.0"));
        assert!(out.contains("SPDXID: SPDXRef-DOCUMENT"));
    }

    #[test]
    fn emits_file_entries_with_checksum() {
        let handler = Spdx23Handler;
        let out = handler.emit(&sample_components(), &DocumentMetadata::default()).unwrap();
        assert!(out.contains("FileName: libfoo"));
        assert!(out.contains("SPDXID: SPDXRef-libfoo"));
        assert!(out.contains(&format!("FileChecksum: SHA1: {}", "d".repeat(40))));
        assert!(out.contains("Relationship: SPDXRef-Package CONTAINS SPDXRef-libfoo"));
    }

    #[test]
    fn validate_detects_missing_required_tags() {
        let handler = Spdx23Handler;
        let result = handler.validate("SPDXVersion: SPDX-2.3\nDataLicense: CC0-1.0\n");
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("DocumentName")));
        assert!(result.errors.iter().any(|e| e.contains("DocumentNamespace")));
        assert!(result.errors.iter().any(|e| e.contains("Creator")));
        assert!(result.errors.iter().any(|e| e.contains("Created")));
    }

    #[test]
    fn validate_empty_content() {
        let handler = Spdx23Handler;
        let result = handler.validate("");
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Content is empty"]);
    }

    #[test]
    fn parse_round_trips_names() {
        let handler = Spdx23Handler;
        let emitted = handler.emit(&sample_components(), &DocumentMetadata::default()).unwrap();
        let parsed = handler.parse(&emitted).unwrap();
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].name, "libfoo");
    }
}
