//! Error types for key loading, signing, and verification.

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("Failed to open private key file")]
    PrivateKeyFileOpen(#[source] std::io::Error),

    #[error("Failed to load private key (check password if encrypted)")]
    PrivateKeyParse,

    #[error("Failed to open certificate file")]
    CertificateFileOpen(#[source] std::io::Error),

    #[error("Failed to load certificate")]
    CertificateParse,

    #[error("Failed to load public key")]
    PublicKeyParse,

    #[error("unsupported signature algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("No private key loaded")]
    NoPrivateKey,

    #[error("No public key loaded")]
    NoPublicKey,

    #[error("No signature found in SBOM")]
    NoSignature,

    #[error("invalid JSON in SBOM content: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("signature computation failed: {0}")]
    SignFailed(String),

    #[error("invalid base64url signature value: {0}")]
    InvalidSignatureEncoding(String),

    #[error("document root is not a JSON object")]
    NotAnObject,

    #[error(transparent)]
    Canon(#[from] bomforge_canon::CanonError),
}
