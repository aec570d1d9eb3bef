//! Pluggable SBOM format handlers: SPDX (2.3, 3.0.0, 3.0.1) and CycloneDX
//! (1.4, 1.5, 1.6). Each version implements [`FormatHandler`]; a factory
//! resolves `(format, version)` pairs, and content-based detection covers
//! callers that only have bytes and need to guess the format first.

pub mod cyclonedx;
pub mod error;
pub mod spdx;
pub mod util;

pub use error::FormatError;

use bomforge_core::{Component, DocumentMetadata, SbomFormat, ValidationResult};

/// Uniform capability surface implemented by every SPDX/CycloneDX version handler.
pub trait FormatHandler: Send + Sync {
    fn format_name(&self) -> &'static str;
    fn format_version(&self) -> &str;
    fn file_extension(&self) -> &'static str;
    fn supports_feature(&self, feature: &str) -> bool;
    fn emit(&self, components: &[Component], metadata: &DocumentMetadata) -> Result<String, FormatError>;
    fn parse(&self, content: &str) -> Result<Vec<Component>, FormatError>;
    fn validate(&self, content: &str) -> ValidationResult;
}

/// Resolve a `(format, version)` pair to a concrete handler. `format` is case-insensitive;
/// `"cyclonedx"` accepts the alias `"cyclone"`.
pub fn resolve(format: &str, version: &str) -> Result<Box<dyn FormatHandler>, FormatError> {
    let fmt = SbomFormat::parse(format).ok_or_else(|| FormatError::UnsupportedFormat(format.to_owned()))?;
    match fmt {
        SbomFormat::Spdx => spdx::resolve(version),
        SbomFormat::CycloneDx => cyclonedx::resolve(version),
    }
}

/// Best-effort detection of `(format, version)` from raw document content.
pub fn detect_format(content: &str) -> Option<(SbomFormat, String)> {
    let trimmed = content.trim_start();

    if trimmed.starts_with("SPDXVersion:") {
        let line = trimmed.lines().next()?;
        let v = line.trim_start_matches("SPDXVersion:").trim().trim_start_matches("SPDX-");
        return Some((SbomFormat::Spdx, v.to_owned()));
    }

    let value: serde_json::Value = serde_json::from_str(content).ok()?;

    if let Some(bom_format) = value.get("bomFormat").and_then(|v| v.as_str()) {
        if bom_format.eq_ignore_ascii_case("cyclonedx") {
            let version = value
                .get("specVersion")
                .and_then(|v| v.as_str())
                .unwrap_or_default()
                .to_owned();
            return Some((SbomFormat::CycloneDx, version));
        }
    }

    if let Some(spec_version) = value.get("specVersion").and_then(|v| v.as_str()) {
        if spec_version.to_ascii_uppercase().starts_with("SPDX") || value.get("@context").is_some() {
            return Some((SbomFormat::Spdx, spec_version.trim_start_matches("SPDX-").to_owned()));
        }
    }
    if let Some(spdx_version) = value.get("spdxVersion").and_then(|v| v.as_str()) {
        return Some((SbomFormat::Spdx, spdx_version.trim_start_matches("SPDX-").to_owned()));
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_spdx_tag_value() {
        let content = "SPDXVersion: SPDX-2.3\nDataLicense: CC0-1.0\n";
        let (fmt, version) = detect_format(content).unwrap();
        assert_eq!(fmt, SbomFormat::Spdx);
        assert_eq!(version, "2.3");
    }

    #[test]
    fn detects_cyclonedx_json() {
        let content = r#"{"bomFormat": "CycloneDX", "specVersion": "1.6"}"#;
        let (fmt, version) = detect_format(content).unwrap();
        assert_eq!(fmt, SbomFormat::CycloneDx);
        assert_eq!(version, "1.6");
    }

    #[test]
    fn detects_spdx_jsonld() {
        let content = r#"{"@context": "x", "spdxVersion": "SPDX-3.0.0"}"#;
        let (fmt, version) = detect_format(content).unwrap();
        assert_eq!(fmt, SbomFormat::Spdx);
        assert_eq!(version, "3.0.0");
    }

    #[test]
    fn detect_returns_none_for_garbage() {
        assert!(detect_format("not json, not spdx either").is_none());
    }

    #[test]
    fn resolve_rejects_unsupported_format() {
        assert!(resolve("bogus-format", "1.0").is_err());
    }
}
