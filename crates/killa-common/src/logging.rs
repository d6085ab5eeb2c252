//! Structured logging infrastructure for Killa Bot

use crate::error::KillaError;
use std::path::PathBuf;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Configuration for the logging system
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter used when `RUST_LOG` is unset (e.g. "info", "killa_store=debug")
    pub level: String,
    /// Emit JSON lines on the console instead of human-readable output
    pub json_format: bool,
    /// Directory for daily-rolling log files; console only when `None`
    pub directory: Option<PathBuf>,
    /// File name prefix for rolled log files
    pub file_prefix: String,
    /// Whether to include target module information
    pub include_targets: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_format: false,
            directory: None,
            file_prefix: "killa-bot.log".to_string(),
            include_targets: true,
        }
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `config.level`. When file output is
/// enabled the returned guard must be held for the life of the process, or
/// buffered lines are lost on exit.
pub fn init_logging(config: &LoggingConfig) -> Result<Option<WorkerGuard>, KillaError> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| {
            KillaError::config_with_source(format!("Invalid log level '{}'", config.level), e)
        })?;

    let console = if config.json_format {
        fmt::layer()
            .json()
            .with_target(config.include_targets)
            .boxed()
    } else {
        fmt::layer().with_target(config.include_targets).boxed()
    };

    let (file_layer, guard) = match &config.directory {
        Some(directory) => {
            std::fs::create_dir_all(directory)?;
            let appender = tracing_appender::rolling::daily(directory, &config.file_prefix);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer()
                .with_ansi(false)
                .with_target(config.include_targets)
                .with_writer(writer)
                .boxed();
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console)
        .with(file_layer)
        .try_init()
        .map_err(|e| KillaError::with_source("Failed to install tracing subscriber", e))?;

    Ok(guard)
}
