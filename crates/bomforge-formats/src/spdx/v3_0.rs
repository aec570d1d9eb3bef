//! SPDX 3.0.0 / 3.0.1 JSON-LD emitter, parser, and validator.
//!
//! The two versions share a handler; they differ only in `specVersion`, the
//! `@context` URL, and whether per-element `annotations` are emitted (3.0.1 only).

use serde_json::{json, Map, Value};

use bomforge_core::{Component, DocumentMetadata, ValidationResult};

use crate::error::FormatError;
use crate::util;
use crate::FormatHandler;

pub struct Spdx3Handler {
    pub version: &'static str,
    pub supports_annotations: bool,
}

impl Spdx3Handler {
    fn context_url(&self) -> String {
        format!("https://spdx.org/rdf/{}/spdx-context.jsonld", self.version)
    }
}

impl FormatHandler for Spdx3Handler {
    fn format_name(&self) -> &'static str {
        "SPDX"
    }

    fn format_version(&self) -> &str {
        self.version
    }

    fn file_extension(&self) -> &'static str {
        "spdx.json"
    }

    fn supports_feature(&self, feature: &str) -> bool {
        feature == "annotations" && self.supports_annotations
    }

    fn emit(&self, components: &[Component], metadata: &DocumentMetadata) -> Result<String, FormatError> {
        let mut sorted: Vec<&Component> = components.iter().collect();
        sorted.sort_by(|a, b| a.bom_ref().cmp(&b.bom_ref()));

        let elements: Vec<Value> = sorted
            .iter()
            .map(|c| {
                let mut elem = Map::new();
                elem.insert("elementType".to_owned(), json!("Package"));
                elem.insert("SPDXID".to_owned(), json!(util::spdx_id(&c.name)));
                elem.insert("name".to_owned(), json!(c.name));
                if !c.version.is_empty() {
                    elem.insert("versionInfo".to_owned(), json!(c.version));
                }
                if !c.description.is_empty() {
                    elem.insert("description".to_owned(), json!(c.description));
                }
                if !c.license.is_empty() {
                    elem.insert("licenseConcluded".to_owned(), json!(c.license));
                }
                if self.supports_annotations && !c.properties.is_empty() {
                    let annotations: Vec<Value> = c
                        .properties
                        .iter()
                        .map(|(k, v)| json!({"annotationType": "OTHER", "comment": format!("{k}={v}")}))
                        .collect();
                    elem.insert("annotations".to_owned(), Value::Array(annotations));
                }
                Value::Object(elem)
            })
            .collect();

        let created = if metadata.created.is_empty() {
            util::current_timestamp()
        } else {
            metadata.created.clone()
        };
        let creator = if metadata.creator_tool.is_empty() {
            "bomforge".to_owned()
        } else {
            metadata.creator_tool.clone()
        };
        let namespace = if metadata.document_namespace.is_empty() {
            format!("https://bomforge.invalid/spdxdocs/{}", uuid::Uuid::new_v4())
        } else {
            metadata.document_namespace.clone()
        };
        let doc_name = if metadata.document_name.is_empty() {
            "SBOM".to_owned()
        } else {
            metadata.document_name.clone()
        };

        let doc = json!({
            "@context": self.context_url(),
            "spdxVersion": format!("SPDX-{}", self.version),
            "dataLicense": "CC0-1.0",
            "SPDXID": "SPDXRef-DOCUMENT",
            "name": doc_name,
            "documentNamespace": namespace,
            "creationInfo": {
                "creators": [format!("Tool: {creator}")],
                "created": created,
            },
            "elements": elements,
        });

        Ok(serde_json::to_string_pretty(&doc)?)
    }

    fn parse(&self, content: &str) -> Result<Vec<Component>, FormatError> {
        let value: Value = serde_json::from_str(content).map_err(|e| FormatError::Malformed {
            format: format!("SPDX {}", self.version),
            reason: e.to_string(),
        })?;
        let elements = value
            .get("elements")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        let mut components = Vec::new();
        for elem in elements {
            let name = elem.get("name").and_then(|v| v.as_str()).unwrap_or("unknown");
            let mut c = Component::new(name, name)?;
            if let Some(v) = elem.get("versionInfo").and_then(|v| v.as_str()) {
                c.version = v.to_owned();
            }
            if let Some(v) = elem.get("licenseConcluded").and_then(|v| v.as_str()) {
                c.license = v.to_owned();
            }
            if let Some(v) = elem.get("description").and_then(|v| v.as_str()) {
                c.description = v.to_owned();
            }
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
        let value: Value = match serde_json::from_str(content) {
            Ok(v) => v,
            Err(e) => {
                result.add_error(format!("invalid JSON: {e}"));
                return result;
            }
        };
        let required = [
            "@context",
            "spdxVersion",
            "dataLicense",
            "name",
            "documentNamespace",
            "creationInfo",
        ];
        for field in required {
            if value.get(field).is_none() {
                result.add_error(format!("missing required field: {field}"));
            }
        }
        if value.get("elements").and_then(|v| v.as_array()).is_none() {
            result.add_error("missing required field: elements");
        }
        result
            .metadata
            .insert("format".to_owned(), "SPDX".to_owned());
        result
            .metadata
            .insert("version".to_owned(), self.version.to_owned());
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bomforge_core::FileType;

    fn handler_300() -> Spdx3Handler {
        Spdx3Handler { version: "3.0.0", supports_annotations: false }
    }

    fn handler_301() -> Spdx3Handler {
        Spdx3Handler { version: "3.0.1", supports_annotations: true }
    }

    fn sample() -> Vec<Component> {
        let mut c = Component::new("libfoo", "/lib/libfoo.so").unwrap();
        c.version = "1.0.0".to_owned();
        c.file_type = FileType::SharedLibrary;
        vec![c]
    }

    #[test]
    fn emits_components_into_elements() {
        let handler = handler_300();
        let out = handler.emit(&sample(), &DocumentMetadata::default()).unwrap();
        let value: Value = serde_json::from_str(&out).unwrap();
        let elements = value["elements"].as_array().unwrap();
        assert_eq!(elements.len(), 1);
        assert_eq!(elements[0]["name"], "libfoo");
    }

    #[test]
    fn version_301_supports_annotations_feature() {
        assert!(handler_301().supports_feature("annotations"));
        assert!(!handler_300().supports_feature("annotations"));
    }

    #[test]
    fn validate_requires_creation_info_and_context() {
        let handler = handler_300();
        let result = handler.validate(r#"{"spdxVersion": "SPDX-3.0"}"#);
        assert!(!result.valid);
        assert!(result.errors.iter().any(|e| e.contains("@context")));
        assert!(result.errors.iter().any(|e| e.contains("creationInfo")));
    }

    #[test]
    fn parse_round_trips_name_and_version() {
        let handler = handler_300();
        let emitted = handler.emit(&sample(), &DocumentMetadata::default()).unwrap();
        let parsed = handler.parse(&emitted).unwrap();
        assert_eq!(parsed[0].name, "libfoo");
        assert_eq!(parsed[0].version, "1.0.0");
    }
}
