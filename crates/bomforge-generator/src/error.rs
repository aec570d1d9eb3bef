//! Error types for component ingestion and SBOM generation.

#[derive(Debug, thiserror::Error)]
pub enum GeneratorError {
    #[error("No components to generate SBOM from")]
    NoComponents,

    #[error("No output path specified")]
    NoOutputPath,

    #[error("invalid configuration for '{field}': {reason}")]
    InvalidConfig { field: String, reason: String },

    #[error(transparent)]
    Format(#[from] bomforge_formats::FormatError),

    #[error(transparent)]
    Core(#[from] bomforge_core::CoreError),

    #[error("failed to write output to {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
