//! Message router - decides what, if anything, to do with each incoming
//! message: self-filter, command dispatch, or the passive support reaction.

use crate::domain::entities::{CommandContext, CommandRegistry, Message, SupportList};
use crate::domain::traits::ChatPlatform;

/// Reserved prefix marking a message as a command.
pub const COMMAND_PREFIX: char = '!';

/// Emoji attached to messages from supported users.
const SUPPORT_REACTION: &str = "\u{1F44D}";

/// Routes incoming messages to command handlers or the passive support
/// reaction. Owns the registry and the support list; the platform is
/// injected per dispatch.
pub struct MessageRouter {
    registry: CommandRegistry,
    support: SupportList,
}

impl MessageRouter {
    pub fn new(registry: CommandRegistry) -> Self {
        Self {
            registry,
            support: SupportList::new(),
        }
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub fn support(&self) -> &SupportList {
        &self.support
    }

    /// Handle one incoming message. Never fails: downstream send and react
    /// failures are logged, the event source expects no outcome.
    pub async fn dispatch(&self, platform: &dyn ChatPlatform, message: &Message) {
        // Ignore the bot itself
        if message.sender.id == platform.bot_info().id {
            tracing::debug!("message from myself");
            return;
        }

        let Some(key) = message.text.strip_prefix(COMMAND_PREFIX) else {
            self.support_pass(platform, message).await;
            return;
        };

        match self.registry.lookup(key) {
            Some(command) => {
                let ctx = CommandContext {
                    platform,
                    registry: &self.registry,
                    support: &self.support,
                };
                if let Err(e) = command.handler.handle(&ctx, message).await {
                    tracing::warn!("command {} failed: {}", command.name, e);
                }
            }
            None => {
                // A miss is terminal: reply and stop.
                let reply = format!("Unknown command {}{}", COMMAND_PREFIX, key);
                if let Err(e) = platform.send_message(&message.channel_id, &reply).await {
                    tracing::warn!("error sending back message: {}", e);
                }
            }
        }
    }

    /// Non-command text: react if the author is on the support list.
    async fn support_pass(&self, platform: &dyn ChatPlatform, message: &Message) {
        let name = message.sender.display_name();
        if !self.support.needs_support(&name) {
            tracing::debug!("no one needs my support");
            return;
        }

        tracing::debug!("{} needs my support", name);
        if let Err(e) = platform
            .add_reaction(&message.channel_id, &message.id, SUPPORT_REACTION)
            .await
        {
            tracing::warn!("error supporting {}: {}", name, e);
        }
    }
}
