//! CLI argument parsing using clap's derive API.
//!
//! This module defines the command-line interface structure using clap's derive macros.
//! It is purely declarative with no side effects or I/O.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// bomforge -- generate, validate, compare, merge, and sign SBOMs.
///
/// Use `bomforge <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "bomforge", version, about, long_about = None)]
pub struct Cli {
    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format for reports that support multiple renderings.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats for diff/merge reports.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// Machine-readable JSON.
    Json,
    /// Comma-separated values (diff report only).
    Csv,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Text => "text",
            OutputFormat::Json => "json",
            OutputFormat::Csv => "csv",
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate an SBOM from a component manifest.
    Generate(GenerateArgs),

    /// Validate an existing SBOM document.
    Validate(ValidateArgs),

    /// Compute a structural diff between two SBOM documents.
    Diff(DiffArgs),

    /// Merge multiple SBOM documents into one.
    Merge(MergeArgs),

    /// Sign a CycloneDX SBOM and embed the signature.
    Sign(SignArgs),

    /// Verify an embedded CycloneDX SBOM signature.
    Verify(VerifyArgs),
}

// ---- generate ----

/// Generate an SBOM document from a JSON component manifest.
///
/// The manifest is a JSON array of components in the shape produced by a
/// `MetadataExtractor` driver (see `bomforge_generator::MetadataExtractor`);
/// this CLI does not itself parse ELF/Mach-O/PE/archive metadata.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Path to a JSON file containing an array of components to ingest.
    pub manifest: PathBuf,

    /// Output SBOM format (spdx, cyclonedx).
    #[arg(long, default_value = "cyclonedx")]
    pub format: String,

    /// SPDX version to emit (2.3, 3.0.0, 3.0.1), when format is spdx.
    #[arg(long, default_value = "2.3")]
    pub spdx_version: String,

    /// CycloneDX version to emit (1.4, 1.5, 1.6), when format is cyclonedx.
    #[arg(long, default_value = "1.6")]
    pub cyclonedx_version: String,

    /// Disable transitive dependency walking (enabled by default).
    #[arg(long)]
    pub no_transitive: bool,

    /// Path to write the generated SBOM to.
    #[arg(short, long)]
    pub output_path: PathBuf,
}

// ---- validate ----

/// Validate an SBOM document, auto-detecting its format and version.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Path to the SBOM document to validate.
    pub path: PathBuf,
}

// ---- diff ----

/// Compare two SBOM documents and report added/removed/modified/unchanged components.
#[derive(Args, Debug)]
pub struct DiffArgs {
    /// Path to the "old" SBOM document.
    pub old: PathBuf,

    /// Path to the "new" SBOM document.
    pub new: PathBuf,
}

// ---- merge ----

/// Merge multiple SBOM documents, keyed by `name:version`.
#[derive(Args, Debug)]
pub struct MergeArgs {
    /// Paths to the SBOM documents to merge.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Output SBOM format (spdx, cyclonedx).
    #[arg(long, default_value = "cyclonedx")]
    pub format: String,

    /// Output format version.
    #[arg(long, default_value = "1.6")]
    pub version: String,

    /// Path to write the merged SBOM to.
    #[arg(short, long)]
    pub output_path: PathBuf,
}

// ---- sign ----

/// Sign a CycloneDX SBOM document and embed the signature at its root.
#[derive(Args, Debug)]
pub struct SignArgs {
    /// Path to the CycloneDX SBOM document to sign.
    pub path: PathBuf,

    /// Path to a PEM private key.
    #[arg(long)]
    pub private_key: PathBuf,

    /// Optional password for an encrypted private key.
    #[arg(long)]
    pub password: Option<String>,

    /// Optional PEM X.509 certificate to embed alongside the signature.
    #[arg(long)]
    pub certificate: Option<PathBuf>,

    /// Signature algorithm.
    #[arg(long, default_value = "RS256")]
    pub algorithm: String,

    /// Path to write the signed SBOM to.
    #[arg(short, long)]
    pub output_path: PathBuf,
}

// ---- verify ----

/// Verify an embedded CycloneDX SBOM signature.
#[derive(Args, Debug)]
pub struct VerifyArgs {
    /// Path to the signed CycloneDX SBOM document.
    pub path: PathBuf,

    /// Path to a PEM public key. Mutually exclusive with `--certificate`.
    #[arg(long)]
    pub public_key: Option<PathBuf>,

    /// Path to a PEM X.509 certificate to derive the public key from.
    #[arg(long)]
    pub certificate: Option<PathBuf>,

    /// Signature algorithm the key/certificate correspond to.
    #[arg(long, default_value = "RS256")]
    pub algorithm: String,
}
