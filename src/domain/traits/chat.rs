use async_trait::async_trait;

use crate::application::errors::BotError;

/// ChatPlatform trait - the capability surface the bot consumes from a
/// messaging platform adapter. Connection lifecycle and event delivery stay
/// on the concrete adapter.
#[async_trait]
pub trait ChatPlatform: Send + Sync {
    /// Send a text message to a channel. Returns the platform message id.
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError>;

    /// Attach an emoji reaction to a message.
    async fn add_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<(), BotError>;

    /// The bot's own identity as reported by the platform.
    fn bot_info(&self) -> BotInfo;
}

/// Bot identity
#[derive(Debug, Clone)]
pub struct BotInfo {
    pub id: String,
    pub name: String,
    pub username: String,
}
