//! Error types for format emission, parsing, and validation.

#[derive(Debug, thiserror::Error)]
pub enum FormatError {
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    #[error("unsupported {format} version: {version}")]
    UnsupportedVersion { format: String, version: String },

    #[error("could not detect SBOM format from content")]
    UndetectableFormat,

    #[error("serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("malformed {format} content: {reason}")]
    Malformed { format: String, reason: String },

    #[error(transparent)]
    Core(#[from] bomforge_core::CoreError),
}
