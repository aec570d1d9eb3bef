//! bomforge-cli -- Command-line interface for generating, validating,
//! comparing, merging, and signing Software Bills of Materials.
//!
//! This binary is a thin wrapper over the `bomforge-generator`,
//! `bomforge-audit`, and `bomforge-signer` crates: argument parsing here,
//! all real logic there.

use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use error::CliError;
use output::OutputWriter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Structured JSON would be noisy for interactive use, so we use compact format.
    // Logs go to stderr, command output goes to stdout.
    let log_level = cli.log_level.as_deref().unwrap_or("warn");
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();

    let writer = OutputWriter::new(cli.output);
    let format = cli.output;

    let result = run(cli.command, &writer, format).await;

    match result {
        Ok(()) => std::process::exit(0),
        Err(e) => {
            tracing::error!(error = %e, "command failed");
            eprintln!("error: {e}");
            std::process::exit(e.exit_code());
        }
    }
}

async fn run(command: Commands, writer: &OutputWriter, format: cli::OutputFormat) -> Result<(), CliError> {
    match command {
        Commands::Generate(args) => commands::generate::execute(args, writer).await,
        Commands::Validate(args) => commands::validate::execute(args, writer).await,
        Commands::Diff(args) => commands::diff::execute(args, format).await,
        Commands::Merge(args) => commands::merge::execute(args, writer).await,
        Commands::Sign(args) => commands::sign::execute(args, writer).await,
        Commands::Verify(args) => commands::verify::execute(args, writer).await,
    }
}
