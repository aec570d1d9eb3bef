//! `bomforge generate` -- ingest a component manifest and emit an SBOM.

use serde::Serialize;

use bomforge_core::Component;
use bomforge_generator::{Generator, GeneratorConfigBuilder};

use crate::cli::GenerateArgs;
use crate::error::CliError;
use crate::output::{OutputWriter, Render};

#[derive(Debug, Serialize)]
struct GenerateResult {
    format: String,
    version: String,
    component_count: usize,
    output_path: String,
}

impl Render for GenerateResult {
    fn render_text(&self, w: &mut dyn std::io::Write) -> std::io::Result<()> {
        writeln!(
            w,
            "Generated {} {} SBOM with {} component(s) -> {}",
            self.format, self.version, self.component_count, self.output_path
        )
    }
}

pub async fn execute(args: GenerateArgs, writer: &OutputWriter) -> Result<(), CliError> {
    let manifest_content = std::fs::read_to_string(&args.manifest)?;
    let components: Vec<Component> = serde_json::from_str(&manifest_content)?;

    let config = GeneratorConfigBuilder::new()
        .format(args.format.as_str())
        .spdx_version(args.spdx_version.as_str())
        .cyclonedx_version(args.cyclonedx_version.as_str())
        .transitive_dependencies(!args.no_transitive)
        .build()?;
    let version = config.active_version().to_owned();

    let mut generator = Generator::new(config)?;
    for component in components {
        generator.process(component);
    }

    let output_path = args.output_path.to_string_lossy().into_owned();
    generator.generate_to_file(&output_path)?;

    writer.render(&GenerateResult {
        format: args.format,
        version,
        component_count: generator.component_count(),
        output_path,
    })
}
