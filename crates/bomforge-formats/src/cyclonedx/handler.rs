//! CycloneDX 1.4 / 1.5 / 1.6 JSON emitter, parser, and validator.
//!
//! All three spec versions share this handler; they differ in whether a
//! `serialNumber` is emitted, pretty- vs. compact-printing, and the feature
//! matrix reported by `supports_feature` (see the CycloneDX changelog between
//! versions for vulnerabilities/formulation/services/annotations/compositions).

use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use bomforge_core::{Component, DocumentMetadata, FileType, ValidationResult};

use crate::error::FormatError;
use crate::util;
use crate::FormatHandler;

pub struct CycloneDxHandler {
    pub version: &'static str,
    pub has_serial_number: bool,
    pub compact: bool,
}

fn component_type(ft: FileType) -> &'static str {
    match ft {
        FileType::Executable => "application",
        FileType::SharedLibrary => "library",
        FileType::StaticLibrary => "library",
        FileType::Object => "file",
        FileType::Source => "source",
        FileType::Unknown => "unknown",
    }
}

fn parse_component_type(s: &str) -> FileType {
    match s {
        "application" => FileType::Executable,
        "library" => FileType::SharedLibrary,
        "file" => FileType::Object,
        "source" => FileType::Source,
        _ => FileType::Unknown,
    }
}

impl CycloneDxHandler {
    fn feature_matrix(&self, feature: &str) -> bool {
        match feature {
            "vulnerabilities" | "formulation" => self.version != "1.4",
            "services" | "annotations" | "compositions" => self.version == "1.6",
            _ => false,
        }
    }

    fn emit_component(&self, c: &Component) -> Value {
        let mut obj = Map::new();
        obj.insert("type".to_owned(), json!(component_type(c.file_type)));
        obj.insert("bom-ref".to_owned(), json!(c.bom_ref()));
        obj.insert("name".to_owned(), json!(c.name));
        if !c.version.is_empty() {
            obj.insert("version".to_owned(), json!(c.version));
        }
        if !c.description.is_empty() {
            obj.insert("description".to_owned(), json!(c.description));
        }
        if !c.group.is_empty() {
            obj.insert("group".to_owned(), json!(c.group));
        }
        let scope_str = c.scope.as_str();
        if scope_str != "required" {
            obj.insert("scope".to_owned(), json!(scope_str));
        }
        if !c.mime_type.is_empty() {
            obj.insert("mime-type".to_owned(), json!(c.mime_type));
        }
        if !c.copyright.is_empty() {
            obj.insert("copyright".to_owned(), json!(c.copyright));
        }
        if !c.cpe.is_empty() {
            obj.insert("cpe".to_owned(), json!(c.cpe));
        }
        obj.insert("purl".to_owned(), json!(c.purl()));

        if !c.supplier.is_empty() {
            obj.insert("supplier".to_owned(), json!({"name": c.supplier}));
        }
        if !c.manufacturer.is_empty() {
            obj.insert("manufacturer".to_owned(), json!({"name": c.manufacturer}));
        }
        if !c.publisher.is_empty() {
            obj.insert("publisher".to_owned(), json!({"name": c.publisher}));
        }

        if let Some(alg) = util::checksum_algorithm_name(&c.checksum, false) {
            obj.insert(
                "hashes".to_owned(),
                json!([{"alg": alg, "content": c.checksum}]),
            );
        } else if !c.checksum.is_empty() {
            warn!(name = %c.name, checksum_len = c.checksum.len(), "checksum has unrecognized length, suppressing hashes entry");
        }

        if !c.license.is_empty() {
            obj.insert("licenses".to_owned(), json!([{"license": {"id": c.license}}]));
        }

        let mut ext_refs = Vec::new();
        if !c.homepage.is_empty() {
            ext_refs.push(json!({"type": "website", "url": c.homepage}));
        }
        if !c.download_location.is_empty() {
            ext_refs.push(json!({"type": "distribution", "url": c.download_location}));
        }
        for (k, v) in &c.properties {
            if let Some(ref_type) = k.strip_prefix("external:") {
                ext_refs.push(json!({"type": ref_type, "url": v}));
            }
        }
        if !ext_refs.is_empty() {
            obj.insert("externalReferences".to_owned(), Value::Array(ext_refs));
        }

        if !c.properties.is_empty() {
            let props: Vec<Value> = c
                .properties
                .iter()
                .map(|(k, v)| json!({"name": k, "value": v}))
                .collect();
            obj.insert("properties".to_owned(), Value::Array(props));
        }

        Value::Object(obj)
    }
}

impl FormatHandler for CycloneDxHandler {
    fn format_name(&self) -> &'static str {
        "CycloneDX"
    }

    fn format_version(&self) -> &str {
        self.version
    }

    fn file_extension(&self) -> &'static str {
        "cdx.json"
    }

    fn supports_feature(&self, feature: &str) -> bool {
        self.feature_matrix(feature)
    }

    fn emit(&self, components: &[Component], metadata: &DocumentMetadata) -> Result<String, FormatError> {
        debug!(version = self.version, count = components.len(), "emitting CycloneDX document");
        let mut sorted: Vec<&Component> = components.iter().collect();
        sorted.sort_by(|a, b| a.bom_ref().cmp(&b.bom_ref()));

        let components_json: Vec<Value> = sorted.iter().map(|c| self.emit_component(c)).collect();

        let timestamp = if metadata.created.is_empty() {
            util::current_timestamp()
        } else {
            metadata.created.clone()
        };
        let creator = if metadata.creator_tool.is_empty() {
            "bomforge".to_owned()
        } else {
            metadata.creator_tool.clone()
        };

        let mut doc = Map::new();
        doc.insert("bomFormat".to_owned(), json!("CycloneDX"));
        doc.insert("specVersion".to_owned(), json!(self.version));
        if self.has_serial_number {
            let serial = if metadata.serial_number.is_empty() {
                util::urn_uuid()
            } else {
                metadata.serial_number.clone()
            };
            doc.insert("serialNumber".to_owned(), json!(serial));
        }
        doc.insert("version".to_owned(), json!(1));
        doc.insert(
            "metadata".to_owned(),
            json!({
                "timestamp": timestamp,
                "tools": [{"name": creator, "version": env!("CARGO_PKG_VERSION")}],
            }),
        );
        doc.insert("components".to_owned(), Value::Array(components_json));

        let dependencies_json: Vec<Value> = sorted
            .iter()
            .map(|c| {
                json!({
                    "ref": c.bom_ref(),
                    "dependsOn": c.dependencies,
                })
            })
            .collect();
        doc.insert("dependencies".to_owned(), Value::Array(dependencies_json));

        let value = Value::Object(doc);
        let rendered = if self.compact {
            serde_json::to_string(&value)?
        } else {
            serde_json::to_string_pretty(&value)?
        };
        Ok(rendered)
    }

    fn parse(&self, content: &str) -> Result<Vec<Component>, FormatError> {
        let value: Value = serde_json::from_str(content).map_err(|e| FormatError::Malformed {
            format: format!("CycloneDX {}", self.version),
            reason: e.to_string(),
        })?;
        let components = value
            .get("components")
            .and_then(|v| v.as_array())
            .cloned()
            .unwrap_or_default();
        let mut out = Vec::new();
        for comp in components {
            let name = comp.get("name").and_then(|v| v.as_str()).unwrap_or("unknown");
            let mut c = Component::new(name, name)?;
            if let Some(v) = comp.get("version").and_then(|v| v.as_str()) {
                c.version = v.to_owned();
            }
            if let Some(v) = comp.get("type").and_then(|v| v.as_str()) {
                c.file_type = parse_component_type(v);
            }
            if let Some(purl) = comp.get("purl").and_then(|v| v.as_str()) {
                if let Some(rest) = purl.strip_prefix("pkg:") {
                    if let Some((manager, _)) = rest.split_once('/') {
                        c.package_manager = manager.to_owned();
                    }
                }
            }
            if let Some(v) = comp.get("description").and_then(|v| v.as_str()) {
                c.description = v.to_owned();
            }
            if let Some(name) = comp
                .get("supplier")
                .and_then(|s| s.get("name"))
                .and_then(|v| v.as_str())
            {
                c.supplier = name.to_owned();
            }
            if let Some(id) = comp
                .get("licenses")
                .and_then(|l| l.as_array())
                .and_then(|arr| arr.first())
                .and_then(|l| l.get("license"))
                .and_then(|l| l.get("id"))
                .and_then(|v| v.as_str())
            {
                c.license = id.to_owned();
            }
            out.push(c);
        }
        Ok(out)
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
        match value.get("bomFormat").and_then(|v| v.as_str()) {
            Some("CycloneDX") => {}
            Some(other) => result.add_error(format!("bomFormat must be 'CycloneDX', got '{other}'")),
            None => result.add_error("missing required field: bomFormat"),
        }
        for field in ["specVersion", "version", "metadata", "components"] {
            if value.get(field).is_none() {
                result.add_error(format!("missing required field: {field}"));
            }
        }
        result
            .metadata
            .insert("format".to_owned(), "CycloneDX".to_owned());
        result
            .metadata
            .insert("version".to_owned(), self.version.to_owned());
        result
    }
}
