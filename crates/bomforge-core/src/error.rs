//! Error types for the core data model.

/// Errors raised while constructing or mutating core entities.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A component was constructed with an empty name.
    #[error("component name must not be empty")]
    EmptyComponentName,

    /// An invalid scope string was supplied.
    #[error("invalid component scope: '{0}' (expected required, optional, or excluded)")]
    InvalidScope(String),

    /// A checksum string had the wrong length for its algorithm.
    #[error("invalid checksum for algorithm {algorithm}: expected {expected} hex chars, got {actual}")]
    InvalidChecksumLength {
        algorithm: String,
        expected: usize,
        actual: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_component_name_display() {
        let err = CoreError::EmptyComponentName;
        assert_eq!(err.to_string(), "component name must not be empty");
    }

    #[test]
    fn invalid_scope_display() {
        let err = CoreError::InvalidScope("bogus".to_owned());
        assert!(err.to_string().contains("bogus"));
    }

    #[test]
    fn invalid_checksum_length_display() {
        let err = CoreError::InvalidChecksumLength {
            algorithm: "SHA-256".to_owned(),
            expected: 64,
            actual: 40,
        };
        let msg = err.to_string();
        assert!(msg.contains("SHA-256"));
        assert!(msg.contains("64"));
        assert!(msg.contains("40"));
    }
}
