//! Bot lifecycle: storage, framework setup, the gateway client and shutdown.

use crate::error::BotResult;
use killa_commands::{framework_options, CommandRegistry, Data};
use killa_common::logging::LoggingConfig;
use killa_config::{Config, LogConfig};
use killa_stats::{DayBoundary, StatsEngine};
use killa_store::{KillTracker, SqliteKillStore};
use poise::serenity_prelude::{self as serenity, GatewayIntents};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Custom status shown under the bot's name.
pub fn presence() -> serenity::ActivityData {
    serenity::ActivityData::custom(format!("v{}", env!("CARGO_PKG_VERSION")))
}

/// Logging settings from the config file, with an optional level override
/// from the command line.
pub fn logging_config(config: &LogConfig, level_override: Option<&str>) -> LoggingConfig {
    LoggingConfig {
        level: level_override.map_or_else(|| config.level.clone(), str::to_string),
        json_format: config.json,
        directory: config.directory.clone(),
        ..LoggingConfig::default()
    }
}

/// Main bot structure.
pub struct KillaBot {
    config: Arc<Config>,
}

impl KillaBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// The loaded configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Stats engine using the configured day boundary.
    pub fn stats_engine(&self) -> BotResult<StatsEngine> {
        let boundary = DayBoundary::from_timezone(self.config.killa.parsed_timezone()?);
        debug!("Day boundary: {:?}", boundary);
        Ok(StatsEngine::new(boundary))
    }

    /// Opens the configured SQLite database.
    pub async fn open_store(&self) -> BotResult<SqliteKillStore> {
        let database = &self.config.database;
        Ok(SqliteKillStore::open(&database.path, database.max_connections).await?)
    }

    /// Runs the bot until the gateway connection ends or Ctrl-C is pressed.
    pub async fn run(self) -> BotResult<()> {
        let store = self.open_store().await?;
        let tracker = Arc::new(KillTracker::with_system_clock(
            Arc::new(store.clone()),
            self.stats_engine()?,
        ));

        let registry = CommandRegistry::with_default_commands()?;
        for command in registry.describe() {
            debug!(
                "Command /{} (guild only: {}, subcommands: {:?})",
                command.name, command.guild_only, command.subcommands
            );
        }

        let config = Arc::clone(&self.config);
        let guild_id = self.config.discord.guild_id;

        let framework = poise::Framework::builder()
            .options(framework_options(registry))
            .setup(move |ctx, ready, framework| {
                Box::pin(async move {
                    info!("Bot connected as: {}", ready.user.name);
                    info!("Connected to {} guilds", ready.guilds.len());

                    let commands = &framework.options().commands;
                    match guild_id {
                        Some(id) => {
                            poise::builtins::register_in_guild(ctx, commands, serenity::GuildId::new(id))
                                .await?;
                            info!("Slash commands registered in guild {}", id);
                        }
                        None => {
                            poise::builtins::register_globally(ctx, commands).await?;
                            info!("Slash commands registered globally");
                        }
                    }

                    ctx.set_activity(Some(presence()));

                    Ok(Data { config, tracker })
                })
            })
            .build();

        let mut client = serenity::ClientBuilder::new(&self.config.discord.token, GatewayIntents::GUILDS)
            .framework(framework)
            .await?;

        let shard_manager = client.shard_manager.clone();
        tokio::spawn(async move {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {:?}", e);
                return;
            }
            info!("Received shutdown signal, starting graceful shutdown");
            shard_manager.shutdown_all().await;
        });

        info!("Killa bot is starting up...");
        let result = client.start().await;

        store.close().await;
        result?;
        Ok(())
    }
}
