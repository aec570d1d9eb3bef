//! Cross-format SBOM validation, structural comparison, and merging. Built on
//! `bomforge-formats`'s content-based detection so the validator, comparator,
//! and merger all work from raw bytes without the caller pre-identifying the
//! SBOM format.

pub mod comparator;
pub mod error;
pub mod merger;
pub mod report;
pub mod validator;

pub use comparator::Comparator;
pub use error::AuditError;
pub use merger::Merger;
pub use validator::Validator;
