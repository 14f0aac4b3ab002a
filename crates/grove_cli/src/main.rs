//! Grove CLI
//!
//! Loads parse trees described as JSON and renders, walks or queries them.

mod cli;
mod commands;
mod config;
mod document;
mod error;

use std::process::ExitCode;

use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use config::GroveConfig;

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match cli.config {
        Some(ref path) => GroveConfig::from_file(path).into_diagnostic()?,
        None => find_config()?,
    };

    match &cli.command {
        Commands::Text { input } => commands::text::run(input, &config),
        Commands::Tree { input } => commands::tree::run(input, &config),
        Commands::Walk { input } => commands::walk::run(input, &config),
        Commands::Stats { input } => commands::stats::run(input, &config),
        Commands::Find(args) => commands::find::run(args, &config),
    }
}

fn find_config() -> Result<GroveConfig> {
    if let Some(path) = GroveConfig::discover(".") {
        info!("Using config: {}", path.display());
        return GroveConfig::from_file(&path).into_diagnostic();
    }

    debug!("No config file found, using defaults");
    Ok(GroveConfig::default())
}
