//! `bomforge merge` -- union multiple SBOM documents into one.

use serde::Serialize;

use bomforge_audit::Merger;

use crate::cli::MergeArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

#[derive(Debug, Serialize)]
struct MergeResult {
    inputs: usize,
    format: String,
    version: String,
    output_path: String,
}

impl Render for MergeResult {
    fn render_text(&self, w: &mut dyn std::io::Write) -> std::io::Result<()> {
        writeln!(
            w,
            "Merged {} document(s) into {} {} -> {}",
            self.inputs, self.format, self.version, self.output_path
        )
    }
}

pub async fn execute(args: MergeArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let contents: Vec<String> = args
        .inputs
        .iter()
        .map(std::fs::read_to_string)
        .collect::<Result<_, _>>()?;

    let rendered = Merger::merge_and_emit(&contents, &args.format, &args.version)?;
    let output_path = args.output_path.to_string_lossy().into_owned();
    std::fs::write(&output_path, rendered)?;

    writer.render(&MergeResult {
        inputs: contents.len(),
        format: args.format,
        version: args.version,
        output_path,
    })
}
