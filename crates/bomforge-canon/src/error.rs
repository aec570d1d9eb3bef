//! Error types for canonical JSON production.

#[derive(Debug, thiserror::Error)]
pub enum CanonError {
    #[error("invalid JSON input: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("canonical JSON does not support NaN or infinite float values")]
    NonFiniteFloat,
}
