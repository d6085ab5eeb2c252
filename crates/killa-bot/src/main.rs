//! Main entry point for Killa Bot.

use anyhow::{Context, Result};
use clap::Parser;
use killa_bot::{logging_config, KillaBot};
use killa_common::logging::init_logging;
use killa_config::ConfigLoader;
use std::path::PathBuf;
use tracing::info;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level, overriding the configuration file
    #[arg(short, long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path),
        None => ConfigLoader::load(),
    }
    .context("Failed to load configuration")?;

    let _log_guard = init_logging(&logging_config(&config.logging, args.log_level.as_deref()))
        .context("Failed to initialize logging")?;

    info!("Starting Killa Bot v{}", env!("CARGO_PKG_VERSION"));

    KillaBot::new(config).run().await?;

    info!("Killa Bot has shut down");
    Ok(())
}
