//! Configuration loading from YAML files and environment variables.

use crate::schema::Config;
use killa_common::KillaError;
use std::env;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Environment variable naming an explicit configuration file.
pub const CONFIG_PATH_ENV: &str = "KILLA_CONFIG_PATH";

/// Configuration file names probed in the working directory, in order.
const DEFAULT_CONFIG_FILES: [&str; 2] = ["config.yaml", "config.yml"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O error when reading configuration file
    #[error("Failed to read configuration file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML parsing error
    #[error("Failed to parse YAML configuration: {0}")]
    Parse(#[from] serde_yaml::Error),

    /// Environment variable parsing error
    #[error("Failed to parse environment variable '{var}': {source}")]
    EnvParse {
        var: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Configuration validation error
    #[error(transparent)]
    Validation(#[from] KillaError),
}

impl From<ConfigError> for KillaError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Validation(inner) => inner,
            other => Self::config_with_source("Configuration loading failed", other),
        }
    }
}

/// Configuration loader for the application
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from `KILLA_CONFIG_PATH`, `config.yaml`/`config.yml`, or defaults,
    /// then apply environment overrides and validate.
    pub fn load() -> Result<Config, ConfigError> {
        let explicit = env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let discovered = DEFAULT_CONFIG_FILES
            .iter()
            .map(PathBuf::from)
            .find(|candidate| candidate.exists());

        match explicit.or(discovered) {
            Some(path) => Self::load_from_file(path),
            None => {
                info!("No configuration file found, using defaults");
                Self::finish(Config::default())
            }
        }
    }

    /// Load configuration from a specific YAML file with environment overrides
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        info!("Loading configuration from {}", path.display());

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::finish(Self::parse(&content)?)
    }

    /// Parse YAML content without applying overrides or validation
    pub fn parse(content: &str) -> Result<Config, ConfigError> {
        Ok(serde_yaml::from_str(content)?)
    }

    fn finish(mut config: Config) -> Result<Config, ConfigError> {
        Self::apply_overrides(&mut config, |key| env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides using `lookup` to resolve variable names.
    ///
    /// Recognised variables: `DISCORD_TOKEN`, `KILLA_GUILD_ID`,
    /// `KILLA_DATABASE_PATH`, `KILLA_TIMEZONE`, `KILLA_LOG_LEVEL`.
    pub fn apply_overrides<F>(config: &mut Config, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(token) = lookup("DISCORD_TOKEN") {
            debug!("Discord token taken from environment");
            config.discord.token = token;
        }

        if let Some(guild_id) = lookup("KILLA_GUILD_ID") {
            config.discord.guild_id =
                Some(guild_id.trim().parse().map_err(|e| ConfigError::EnvParse {
                    var: "KILLA_GUILD_ID".to_string(),
                    source: Box::new(e),
                })?);
        }

        if let Some(path) = lookup("KILLA_DATABASE_PATH") {
            config.database.path = PathBuf::from(path);
        }

        if let Some(timezone) = lookup("KILLA_TIMEZONE") {
            config.killa.timezone = Some(timezone);
        }

        if let Some(level) = lookup("KILLA_LOG_LEVEL") {
            config.logging.level = level;
        }

        Ok(())
    }
}
