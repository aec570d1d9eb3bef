//! CLI-specific error types and exit code mapping

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering or manifest parsing.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Component generation failed.
    #[error(transparent)]
    Generator(#[from] bomforge_generator::GeneratorError),

    /// Format handler resolution, emission, or parsing failed.
    #[error(transparent)]
    Format(#[from] bomforge_formats::FormatError),

    /// Validation, comparison, or merge failed.
    #[error(transparent)]
    Audit(#[from] bomforge_audit::AuditError),

    /// Signing or verification failed.
    #[error(transparent)]
    Signer(#[from] bomforge_signer::SignerError),

    /// Core data model construction failed (e.g. an empty component name).
    #[error(transparent)]
    Core(#[from] bomforge_core::CoreError),

    /// An SBOM document failed validation.
    #[error("SBOM is not valid")]
    InvalidSbom,

    /// A signature verification check returned false.
    #[error("signature verification failed")]
    VerificationFailed,
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                        |
    /// |------|----------------------------------|
    /// | 0    | Success                          |
    /// | 1    | General / command error          |
    /// | 2    | SBOM failed validation           |
    /// | 3    | Signature verification failed    |
    /// | 10   | IO error                         |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::InvalidSbom => 2,
            Self::VerificationFailed => 3,
            Self::Io(_) => 10,
            _ => 1,
        }
    }
}
