//! Poise framework setup: shared data, error handling and event routing.

use crate::buttons::handle_component;
use crate::registry::CommandRegistry;
use killa_config::Config;
use killa_store::KillTracker;
use poise::serenity_prelude as serenity;
use std::sync::Arc;
use tracing::{debug, error, warn};

/// Shown when a command fails for reasons the user cannot fix.
pub const COMMAND_ERROR_MESSAGE: &str = "There was an error while executing this command!";

/// Shown when a guild-only command is used in a DM.
pub const GUILD_ONLY_MESSAGE: &str = "This command can only be used in a server.";

/// Application data accessible in all commands and event handlers.
pub struct Data {
    /// Application configuration.
    pub config: Arc<Config>,
    /// Kill tracking service.
    pub tracker: Arc<KillTracker>,
}

impl std::fmt::Debug for Data {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Data")
            .field("config", &"<Config>")
            .field("tracker", &self.tracker)
            .finish()
    }
}

/// Application error type for commands.
pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// Command context type.
pub type Context<'a> = poise::Context<'a, Data, Error>;

/// Framework options wired to the registry's commands, the error handler and
/// the button router.
pub fn framework_options(registry: CommandRegistry) -> poise::FrameworkOptions<Data, Error> {
    poise::FrameworkOptions {
        commands: registry.into_commands(),
        on_error: |error| Box::pin(on_error(error)),
        event_handler: |ctx, event, framework, data| {
            Box::pin(event_handler(ctx, event, framework, data))
        },
        ..Default::default()
    }
}

/// Global error handler for the framework.
pub async fn on_error(error: poise::FrameworkError<'_, Data, Error>) {
    match error {
        poise::FrameworkError::Setup { error, .. } => {
            error!("Failed to start bot: {:?}", error);
        }
        poise::FrameworkError::Command { error, ctx, .. } => {
            error!("Error in command '{}': {:?}", ctx.command().name, error);
            let reply = poise::CreateReply::default()
                .content(COMMAND_ERROR_MESSAGE)
                .ephemeral(true);
            if let Err(e) = ctx.send(reply).await {
                error!("Failed to report command error: {:?}", e);
            }
        }
        poise::FrameworkError::GuildOnly { ctx, .. } => {
            debug!("Rejected '{}' outside a guild", ctx.command().name);
            if let Err(e) = ctx.say(GUILD_ONLY_MESSAGE).await {
                error!("Failed to send guild-only notice: {:?}", e);
            }
        }
        poise::FrameworkError::EventHandler { error, event, .. } => {
            error!(
                "Error in event handler for {:?}: {:?}",
                event.snake_case_name(),
                error
            );
        }
        error => {
            if let Err(e) = poise::builtins::on_error(error).await {
                warn!("Error while handling error: {:?}", e);
            }
        }
    }
}

/// Central event handler for Discord events.
pub async fn event_handler(
    ctx: &serenity::Context,
    event: &serenity::FullEvent,
    _framework: poise::FrameworkContext<'_, Data, Error>,
    data: &Data,
) -> Result<(), Error> {
    match event {
        serenity::FullEvent::InteractionCreate {
            interaction: serenity::Interaction::Component(component),
        } => handle_component(ctx, component, data).await,
        _ => Ok(()),
    }
}
