//! Built-in command handlers
//!
//! Each handler is a named object behind the `CommandHandler` capability,
//! registered under its command key at startup.

use std::sync::Arc;

use async_trait::async_trait;

use crate::application::errors::BotError;
use crate::domain::entities::{Command, CommandContext, CommandHandler, CommandRegistry, Message};

/// `!hello` - greet the author.
pub struct Hello;

#[async_trait]
impl CommandHandler for Hello {
    async fn handle(&self, ctx: &CommandContext<'_>, message: &Message) -> Result<(), BotError> {
        let reply = format!("Hey {}, what's up?", message.sender.display_name());
        ctx.platform.send_message(&message.channel_id, &reply).await?;
        Ok(())
    }
}

/// `!list` - enumerate every registered command.
pub struct List;

#[async_trait]
impl CommandHandler for List {
    async fn handle(&self, ctx: &CommandContext<'_>, message: &Message) -> Result<(), BotError> {
        let mut reply = String::from(" === Available commands ===\n");
        for command in ctx.registry.all() {
            reply.push_str(&format!("!{}\t{}\n", command.name, command.description));
        }
        ctx.platform.send_message(&message.channel_id, &reply).await?;
        Ok(())
    }
}

/// `!supportme` - start backing the author up with reactions.
pub struct SupportMe;

#[async_trait]
impl CommandHandler for SupportMe {
    async fn handle(&self, ctx: &CommandContext<'_>, message: &Message) -> Result<(), BotError> {
        ctx.support.add(&message.sender.display_name());
        let reply = format!("I am supporting {} now", ctx.support.joined(","));
        ctx.platform.send_message(&message.channel_id, &reply).await?;
        Ok(())
    }
}

/// `!stopsupport` - withdraw support for the author. Sends no reply.
pub struct StopSupport;

#[async_trait]
impl CommandHandler for StopSupport {
    async fn handle(&self, ctx: &CommandContext<'_>, message: &Message) -> Result<(), BotError> {
        ctx.support.withdraw(&message.sender.display_name());
        Ok(())
    }
}

/// Register the default command set.
pub fn register_defaults(registry: &mut CommandRegistry) {
    registry.register(Command::new("hello", "Say hello", Arc::new(Hello)));
    registry.register(Command::new(
        "supportme",
        "Helps you win an argument with your friends",
        Arc::new(SupportMe),
    ));
    registry.register(Command::new(
        "stopsupport",
        "Stops helping you in an argument",
        Arc::new(StopSupport),
    ));
    registry.register(Command::new("list", "List all commands", Arc::new(List)));
}
