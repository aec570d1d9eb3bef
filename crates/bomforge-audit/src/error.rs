//! Error types for validation, comparison, and merging.

#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("Content is empty")]
    EmptyContent,

    #[error("could not detect SBOM format from content")]
    UndetectableFormat,

    #[error(transparent)]
    Format(#[from] bomforge_formats::FormatError),

    #[error(transparent)]
    Core(#[from] bomforge_core::CoreError),

    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
