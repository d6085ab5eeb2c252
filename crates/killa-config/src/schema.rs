//! Configuration schema definitions using serde.

use chrono_tz::Tz;
use killa_common::KillaError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Largest progress bar the embed can render without wrapping on mobile.
pub const MAX_PROGRESS_BAR_SIZE: usize = 64;

/// Main configuration structure for Killa Bot.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Discord configuration.
    pub discord: DiscordConfig,
    /// Storage configuration.
    pub database: DatabaseConfig,
    /// Counter presentation and day-boundary configuration.
    pub killa: KillaConfig,
    /// Logging configuration.
    pub logging: LogConfig,
}

/// Discord bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscordConfig {
    /// Discord bot token.
    pub token: String,
    /// Register slash commands in this guild only; globally when unset.
    pub guild_id: Option<u64>,
}

/// SQLite storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path of the SQLite database file.
    pub path: PathBuf,
    /// Connection pool size.
    pub max_connections: u32,
}

/// Counter presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KillaConfig {
    /// Total kill goal shown next to the running total and used by the progress bar.
    pub goal: u64,
    /// Emoji rendered in the embed title.
    pub emoji: String,
    /// Embed footer text.
    pub footer: String,
    /// Embed accent colour as 0xRRGGBB.
    pub color: u32,
    /// Number of glyphs in the progress bar.
    pub progress_bar_size: usize,
    /// IANA timezone deciding when "today" starts; server local time when unset.
    pub timezone: Option<String>,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    pub level: String,
    /// Emit JSON lines on the console.
    pub json: bool,
    /// Directory for daily-rolling log files.
    pub directory: Option<PathBuf>,
}

impl KillaConfig {
    /// Parses the configured timezone, if any.
    pub fn parsed_timezone(&self) -> Result<Option<Tz>, KillaError> {
        self.timezone
            .as_deref()
            .map(|name| {
                name.parse::<Tz>().map_err(|_| {
                    KillaError::validation_field(format!("Unknown timezone '{name}'"), "killa.timezone")
                })
            })
            .transpose()
    }
}

impl Config {
    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), KillaError> {
        if self.discord.token.trim().is_empty() {
            return Err(KillaError::config("Discord token cannot be empty"));
        }

        if self.database.path.as_os_str().is_empty() {
            return Err(KillaError::validation_field(
                "Database path cannot be empty",
                "database.path",
            ));
        }

        if self.database.max_connections == 0 {
            return Err(KillaError::validation_field(
                "Database pool needs at least one connection",
                "database.max_connections",
            ));
        }

        if self.killa.goal == 0 {
            return Err(KillaError::validation_field(
                "Kill goal must be at least 1",
                "killa.goal",
            ));
        }

        if !(1..=MAX_PROGRESS_BAR_SIZE).contains(&self.killa.progress_bar_size) {
            return Err(KillaError::validation_field(
                format!("Progress bar size must be between 1 and {MAX_PROGRESS_BAR_SIZE}"),
                "killa.progress_bar_size",
            ));
        }

        if self.killa.color > 0x00FF_FFFF {
            return Err(KillaError::validation_field(
                "Embed colour must fit in 0xRRGGBB",
                "killa.color",
            ));
        }

        self.killa.parsed_timezone()?;

        Ok(())
    }
}
