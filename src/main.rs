//! cifra CLI entry point

use cifra::commands::{self, Output};
use cifra::config::Cli;
use cifra::CliError;
use clap::Parser;
use std::fs;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli);

    match commands::run(&cli).and_then(write_output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(cli: &Cli) {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cli.log_filter())),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn write_output(output: Output) -> Result<(), CliError> {
    match output.path {
        Some(path) => {
            fs::write(&path, &output.text).map_err(|source| CliError::Write { path: path.clone(), source })?;
            tracing::info!(path = %path.display(), "wrote output");
        }
        None => println!("{}", output.text),
    }
    Ok(())
}
