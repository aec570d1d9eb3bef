//! Core data model for the bomforge SBOM engine: components, documents,
//! validation results, signatures, and diffs. No format-specific or
//! cryptographic logic lives here — see `bomforge-formats` and `bomforge-signer`.

pub mod component;
pub mod diff;
pub mod document;
pub mod error;
pub mod signature;
pub mod validation;

pub use component::{Component, FileType, Scope};
pub use diff::{DiffKind, DiffStatistics, Difference};
pub use document::{DocumentMetadata, SbomDocument, SbomFormat};
pub use error::CoreError;
pub use signature::{JwkPublicKey, Signature, SignatureAlgorithm};
pub use validation::ValidationResult;
