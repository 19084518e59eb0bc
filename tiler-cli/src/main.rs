//! Tiler CLI - cut an image into a deep-zoom tile pyramid.

mod args;
mod error;
mod progress;
mod run;
mod settings;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use tiler::config::ConfigFile;
use tiler::logging::init_logging;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::args::Cli;
use crate::error::CliError;
use crate::settings::Settings;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match try_main(&cli) {
        Ok(code) => ExitCode::from(code),
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(e.exit_code())
        }
    }
}

fn try_main(cli: &Cli) -> Result<u8, CliError> {
    let config = load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(cli, &config)?;
    let _logging = init_logging(&settings.logging)?;

    let cancellation = CancellationToken::new();
    let handler_token = cancellation.clone();
    if let Err(e) = ctrlc::set_handler(move || {
        eprintln!();
        eprintln!("Received interrupt, finishing tiles in progress...");
        handler_token.cancel();
    }) {
        warn!(error = %e, "Failed to install Ctrl-C handler");
    }

    let report = run::run(&settings, cancellation)?;
    run::print_summary(&settings, &report);
    Ok(run::exit_code(&report))
}

/// Load the config file if one was given.
fn load_config(path: Option<&Path>) -> Result<ConfigFile, CliError> {
    match path {
        Some(path) => Ok(ConfigFile::load(path)?),
        None => Ok(ConfigFile::default()),
    }
}
