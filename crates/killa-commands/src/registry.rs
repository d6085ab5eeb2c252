//! Explicit name → command mapping built once at startup.

use crate::framework::{Data, Error};
use killa_common::{KillaError, Result};
use tracing::{debug, info};

/// A registered poise command.
pub type Command = poise::Command<Data, Error>;

/// Name and description of a registered command, for logs and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInfo {
    /// Slash command name.
    pub name: String,
    /// Description shown in the Discord client.
    pub description: Option<String>,
    /// Whether Discord only offers the command inside servers.
    pub guild_only: bool,
    /// Names of subcommands, in registration order.
    pub subcommands: Vec<String>,
}

impl CommandInfo {
    fn of(command: &Command) -> Self {
        Self {
            name: command.name.clone(),
            description: command.description.clone(),
            guild_only: command.guild_only,
            subcommands: command.subcommands.iter().map(|c| c.name.clone()).collect(),
        }
    }
}

/// Registry for the bot's slash commands.
#[derive(Default)]
pub struct CommandRegistry {
    commands: Vec<Command>,
}

impl std::fmt::Debug for CommandRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRegistry")
            .field("commands", &self.names())
            .finish()
    }
}

impl CommandRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `/killa`, `/ping` and `/user`.
    pub fn with_default_commands() -> Result<Self> {
        let mut registry = Self::new();
        registry.register(crate::killa::killa())?;
        registry.register(crate::utility::ping())?;
        registry.register(crate::utility::user())?;
        info!("Registered {} commands: {:?}", registry.len(), registry.names());
        Ok(registry)
    }

    /// Adds a command. Names must be unique.
    pub fn register(&mut self, command: Command) -> Result<()> {
        if self.get(&command.name).is_some() {
            return Err(KillaError::validation_field(
                format!("Command '{}' is already registered", command.name),
                "name",
            ));
        }
        debug!("Registering command '{}'", command.name);
        self.commands.push(command);
        Ok(())
    }

    /// Looks up a command by name.
    pub fn get(&self, name: &str) -> Option<&Command> {
        self.commands.iter().find(|c| c.name == name)
    }

    /// Registered command names, in registration order.
    pub fn names(&self) -> Vec<&str> {
        self.commands.iter().map(|c| c.name.as_str()).collect()
    }

    /// Summaries of every registered command.
    pub fn describe(&self) -> Vec<CommandInfo> {
        self.commands.iter().map(CommandInfo::of).collect()
    }

    /// Number of registered commands.
    pub fn len(&self) -> usize {
        self.commands.len()
    }

    /// Whether no command has been registered.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Hands the commands over to the framework.
    pub fn into_commands(self) -> Vec<Command> {
        self.commands
    }
}
