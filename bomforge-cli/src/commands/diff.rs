//! `bomforge diff` -- structural comparison between two SBOM documents.

use bomforge_audit::{report, Comparator};

use crate::cli::{DiffArgs, OutputFormat};
use crate::error::CliError;

pub async fn execute(args: DiffArgs, format: OutputFormat) -> Result<(), CliError> {
    let old_content = std::fs::read_to_string(&args.old)?;
    let new_content = std::fs::read_to_string(&args.new)?;

    let (differences, _stats) = Comparator::compare_content(&old_content, &new_content)?;

    println!("{}", report::render(&differences, format.as_str()));
    Ok(())
}
