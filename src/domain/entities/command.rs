use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{Message, SupportList};
use crate::domain::traits::ChatPlatform;

/// Everything a command handler may touch while executing.
pub struct CommandContext<'a> {
    pub platform: &'a dyn ChatPlatform,
    pub registry: &'a CommandRegistry,
    pub support: &'a SupportList,
}

/// Capability implemented by every named command handler.
#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext<'_>, message: &Message) -> Result<(), BotError>;
}

/// A registered bot command
pub struct Command {
    pub name: String,
    pub description: String,
    pub handler: Arc<dyn CommandHandler>,
}

impl Command {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        handler: Arc<dyn CommandHandler>,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            handler,
        }
    }
}

/// Command registry for managing available commands.
///
/// Keys are unique; lookups are exact-string and case-sensitive.
#[derive(Default)]
pub struct CommandRegistry {
    commands: HashMap<String, Command>,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the entry under the command's name.
    pub fn register(&mut self, command: Command) {
        self.commands.insert(command.name.clone(), command);
    }

    /// A miss is a normal outcome handled by the caller, not an error.
    pub fn lookup(&self, name: &str) -> Option<&Command> {
        self.commands.get(name)
    }

    /// Iteration order is unspecified.
    pub fn all(&self) -> impl Iterator<Item = &Command> {
        self.commands.values()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}
