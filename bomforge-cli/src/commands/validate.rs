//! `bomforge validate` -- check an SBOM document for structural validity.

use bomforge_audit::Validator;

use crate::cli::ValidateArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

impl Render for bomforge_core::ValidationResult {
    fn render_text(&self, w: &mut dyn std::io::Write) -> std::io::Result<()> {
        if self.valid {
            writeln!(w, "valid")?;
        } else {
            writeln!(w, "invalid")?;
        }
        for error in &self.errors {
            writeln!(w, "  error: {error}")?;
        }
        for warning in &self.warnings {
            writeln!(w, "  warning: {warning}")?;
        }
        Ok(())
    }
}

pub async fn execute(args: ValidateArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let path = args.path.to_string_lossy();
    let result = match Validator::validate_file(&path) {
        Ok(result) => result,
        Err(bomforge_audit::AuditError::UndetectableFormat) => {
            let mut result = bomforge_core::ValidationResult::ok();
            result.add_error("could not detect SBOM format from content");
            result
        }
        Err(e) => return Err(e.into()),
    };

    for error in &result.errors {
        eprintln!("[ERROR] {error}");
    }
    for warning in &result.warnings {
        eprintln!("[WARNING] {warning}");
    }

    writer.render(&result)?;

    if result.valid {
        Ok(())
    } else {
        Err(CliError::InvalidSbom)
    }
}
