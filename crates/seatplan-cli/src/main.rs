//! Seatplan CLI - Command-line interface
//!
//! This is the main CLI adapter for the Seatplan system.

mod cli;
mod commands;
mod config_loader;
mod dry_run;
mod errors;
mod output;
mod output_types;
mod storage;

use clap::Parser;
use cli::Cli;
use errors::CliError;
use output::OutputWriter;

fn main() {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    // Parse CLI arguments
    let cli = Cli::parse();
    let json = cli.json;

    // Execute the command
    if let Err(error) = commands::execute(cli) {
        let error = match error.downcast::<CliError>() {
            Ok(cli_error) => cli_error,
            Err(other) => errors::from_anyhow(other),
        };

        if json {
            OutputWriter::new(true).error(&error);
        } else {
            error.display();
        }
        std::process::exit(1);
    }
}
