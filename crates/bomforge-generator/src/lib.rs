//! Component ingestion and SBOM generation: accepts [`bomforge_core::Component`]s,
//! walks transitive dependencies, and dispatches to a `bomforge-formats` handler
//! to render the final document. Single-threaded per instance — see
//! [`extractor::extract_parallel`] for the one explicit parallel facility this
//! crate exposes, used to fan binary extraction out across independent files
//! before any of them reach a [`Generator`].

pub mod config;
pub mod error;
pub mod extractor;
pub mod generator;

pub use config::{GeneratorConfig, GeneratorConfigBuilder};
pub use error::GeneratorError;
pub use extractor::{extract_parallel, MetadataExtractor};
pub use generator::Generator;
