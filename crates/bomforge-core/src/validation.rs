//! The [`ValidationResult`] record produced by format handlers and the validator.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

impl ValidationResult {
    /// A fresh, passing result with no errors or warnings yet.
    pub fn ok() -> Self {
        ValidationResult {
            valid: true,
            ..Default::default()
        }
    }

    /// Record an error; flips `valid` to false.
    pub fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
        self.valid = false;
    }

    /// Record a warning without affecting `valid`.
    pub fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ok_starts_valid() {
        let r = ValidationResult::ok();
        assert!(r.valid);
        assert!(r.errors.is_empty());
    }

    #[test]
    fn add_error_flips_valid() {
        let mut r = ValidationResult::ok();
        r.add_error("missing field X");
        assert!(!r.valid);
        assert_eq!(r.errors, vec!["missing field X"]);
    }

    #[test]
    fn add_warning_keeps_valid() {
        let mut r = ValidationResult::ok();
        r.add_warning("deprecated field Y");
        assert!(r.valid);
        assert_eq!(r.warnings.len(), 1);
    }
}
