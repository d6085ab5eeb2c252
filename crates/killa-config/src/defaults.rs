//! Default values for every configuration section.

use crate::schema::*;
use std::path::PathBuf;

/// Default location of the SQLite database, relative to the working directory.
pub const DEFAULT_DATABASE_PATH: &str = "db/sqlite/killa.sqlite";

/// Default total kill goal.
pub const DEFAULT_GOAL: u64 = 100;

/// Default progress bar width in glyphs.
pub const DEFAULT_PROGRESS_BAR_SIZE: usize = 14;

impl Default for Config {
    fn default() -> Self {
        Self {
            discord: DiscordConfig::default(),
            database: DatabaseConfig::default(),
            killa: KillaConfig::default(),
            logging: LogConfig::default(),
        }
    }
}

impl Default for DiscordConfig {
    fn default() -> Self {
        Self {
            token: String::new(),
            guild_id: None,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(DEFAULT_DATABASE_PATH),
            max_connections: 5,
        }
    }
}

impl Default for KillaConfig {
    fn default() -> Self {
        Self {
            goal: DEFAULT_GOAL,
            emoji: "<:killa:1192623748017299566>".to_string(),
            footer: "Tracksuit Soon™".to_string(),
            color: 0x00AE86,
            progress_bar_size: DEFAULT_PROGRESS_BAR_SIZE,
            timezone: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
            directory: None,
        }
    }
}
