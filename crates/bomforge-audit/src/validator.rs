//! Format-agnostic validation: detects the format (unless told), then delegates
//! to the matching `bomforge-formats` handler's own `validate()`.

use bomforge_core::ValidationResult;

use crate::error::AuditError;

pub struct Validator;

impl Validator {
    /// Validate raw SBOM content, auto-detecting format and version unless both
    /// `format` and `version` are supplied.
    pub fn validate_content(
        content: &str,
        format: Option<&str>,
        version: Option<&str>,
    ) -> Result<ValidationResult, AuditError> {
        if content.trim().is_empty() {
            let mut result = ValidationResult::ok();
            result.add_error("Content is empty");
            return Ok(result);
        }

        let (detected_format, detected_version) = match (format, version) {
            (Some(f), Some(v)) => (f.to_owned(), v.to_owned()),
            _ => {
                let (fmt, v) = bomforge_formats::detect_format(content)
                    .ok_or(AuditError::UndetectableFormat)?;
                (fmt.as_str().to_owned(), v)
            }
        };

        let handler = bomforge_formats::resolve(&detected_format, &detected_version)?;
        Ok(handler.validate(content))
    }

    pub fn validate_file(path: &str) -> Result<ValidationResult, AuditError> {
        let content = std::fs::read_to_string(path).map_err(|source| AuditError::Io {
            path: path.to_owned(),
            source,
        })?;
        Self::validate_content(&content, None, None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_reports_error() {
        let result = Validator::validate_content("", None, None).unwrap();
        assert!(!result.valid);
        assert_eq!(result.errors, vec!["Content is empty"]);
    }

    #[test]
    fn detects_and_validates_cyclonedx() {
        let content = r#"{"bomFormat": "CycloneDX", "specVersion": "1.6", "version": 1, "metadata": {}, "components": []}"#;
        let result = Validator::validate_content(content, None, None).unwrap();
        assert!(result.valid);
        assert_eq!(result.metadata.get("format").unwrap(), "CycloneDX");
    }

    #[test]
    fn undetectable_format_is_an_error() {
        let result = Validator::validate_content("garbage content", None, None);
        assert!(result.is_err());
    }

    #[test]
    fn explicit_format_skips_detection() {
        let content = r#"{"bomFormat": "CycloneDX", "specVersion": "1.6", "version": 1, "metadata": {}, "components": []}"#;
        let result = Validator::validate_content(content, Some("cyclonedx"), Some("1.6")).unwrap();
        assert!(result.valid);
    }
}
