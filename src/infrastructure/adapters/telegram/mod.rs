//! Telegram adapter

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::application::errors::BotError;
use crate::domain::entities::{Message, User};
use crate::domain::traits::{BotInfo, ChatPlatform};

/// Telegram API base URL
const API_BASE: &str = "https://api.telegram.org";

/// Telegram update type
#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<ApiMessage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiMessage {
    pub message_id: i64,
    pub from: Option<ApiUser>,
    pub chat: ApiChat,
    pub date: i64,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiUser {
    pub id: i64,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiChat {
    pub id: i64,
}

/// Telegram platform adapter - long-polls getUpdates and maps the wire
/// types into domain messages.
pub struct TelegramAdapter {
    token: String,
    client: Client,
    info: BotInfo,
}

impl TelegramAdapter {
    pub fn new(token: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            client: Client::new(),
            info: BotInfo {
                id: "unknown".to_string(),
                name: name.into(),
                username: "unknown".to_string(),
            },
        }
    }

    /// Get the API URL for a method
    fn api_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", API_BASE, self.token, method)
    }

    /// Open the connection: resolve the bot's own identity via getMe.
    pub async fn connect(&mut self) -> Result<(), BotError> {
        #[derive(Deserialize)]
        struct Response {
            result: Me,
        }

        #[derive(Deserialize)]
        struct Me {
            id: i64,
            first_name: String,
            username: String,
        }

        let url = self.api_url("getMe");
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        // The configured display name stays; the platform-side identity is
        // what the router needs for self-filtering.
        self.info.id = data.result.id.to_string();
        self.info.username = data.result.username;
        tracing::debug!("{} connected as {}", self.info.name, data.result.first_name);

        Ok(())
    }

    /// Close the connection. Long polling holds no session on our side, so
    /// there is nothing to tear down beyond announcing the shutdown.
    pub async fn close(&self) -> Result<(), BotError> {
        tracing::info!("closing connection to Telegram");
        Ok(())
    }

    /// Long-poll for updates using the getUpdates API.
    pub async fn get_updates(&self, offset: i64, timeout: i64) -> Result<Vec<Update>, BotError> {
        #[derive(Serialize)]
        struct GetUpdatesRequest {
            offset: i64,
            timeout: i64,
            allowed_updates: Vec<String>,
        }

        #[derive(Deserialize)]
        struct Response {
            result: Vec<Update>,
        }

        let url = self.api_url("getUpdates");
        let request = GetUpdatesRequest {
            offset,
            timeout,
            allowed_updates: vec!["message".to_string()],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data.result)
    }

    /// Offset confirming every update in `updates`; never moves backwards.
    pub fn next_offset(updates: &[Update], current: i64) -> i64 {
        updates
            .iter()
            .map(|u| u.update_id + 1)
            .max()
            .unwrap_or(current)
            .max(current)
    }

    /// Map a wire update into a domain message. Updates that are not text
    /// messages from an identifiable sender are skipped.
    pub fn incoming(update: &Update) -> Option<Message> {
        let msg = update.message.as_ref()?;
        let text = msg.text.clone()?;
        let from = msg.from.as_ref()?;

        let mut sender = User::new(from.id.to_string());
        if let Some(username) = &from.username {
            sender = sender.with_username(username);
        }
        if let Some(first) = &from.first_name {
            sender = sender.with_name(first, from.last_name.as_deref());
        }

        let timestamp = DateTime::from_timestamp(msg.date, 0).unwrap_or_else(Utc::now);

        Some(
            Message::new(
                msg.message_id.to_string(),
                msg.chat.id.to_string(),
                sender,
                text,
            )
            .with_timestamp(timestamp),
        )
    }
}

#[async_trait]
impl ChatPlatform for TelegramAdapter {
    async fn send_message(&self, channel_id: &str, text: &str) -> Result<String, BotError> {
        #[derive(Serialize)]
        struct SendMessageRequest {
            chat_id: String,
            text: String,
        }

        #[derive(Deserialize)]
        struct Response {
            result: MessageResult,
        }

        #[derive(Deserialize)]
        struct MessageResult {
            message_id: i64,
        }

        tracing::debug!("sending to {}: {}", channel_id, text);

        let url = self.api_url("sendMessage");
        let request = SendMessageRequest {
            chat_id: channel_id.to_string(),
            text: text.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }

        let data: Response = response
            .json()
            .await
            .map_err(|e| BotError::Parse(e.to_string()))?;

        Ok(data.result.message_id.to_string())
    }

    async fn add_reaction(
        &self,
        channel_id: &str,
        message_id: &str,
        emoji: &str,
    ) -> Result<(), BotError> {
        #[derive(Serialize)]
        struct ReactionEmoji {
            #[serde(rename = "type")]
            kind: String,
            emoji: String,
        }

        #[derive(Serialize)]
        struct SetReactionRequest {
            chat_id: String,
            message_id: i64,
            reaction: Vec<ReactionEmoji>,
        }

        // setMessageReaction wants the numeric message id.
        let message_id: i64 = message_id
            .parse()
            .map_err(|_| BotError::Parse(format!("invalid message id: {}", message_id)))?;

        let url = self.api_url("setMessageReaction");
        let request = SetReactionRequest {
            chat_id: channel_id.to_string(),
            message_id,
            reaction: vec![ReactionEmoji {
                kind: "emoji".to_string(),
                emoji: emoji.to_string(),
            }],
        };

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| BotError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BotError::Network(format!(
                "Telegram API error: {}",
                response.status()
            )));
        }

        Ok(())
    }

    fn bot_info(&self) -> BotInfo {
        self.info.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_updates() -> Vec<Update> {
        let payload = serde_json::json!([
            {
                "update_id": 101,
                "message": {
                    "message_id": 7,
                    "from": {
                        "id": 42,
                        "is_bot": false,
                        "first_name": "Alice",
                        "last_name": "Smith",
                        "username": "alice"
                    },
                    "chat": { "id": -100, "type": "group", "title": "friends" },
                    "date": 1_700_000_000,
                    "text": "!hello"
                }
            },
            {
                "update_id": 102,
                "message": {
                    "message_id": 8,
                    "chat": { "id": -100, "type": "group" },
                    "date": 1_700_000_001,
                    "new_chat_title": "renamed"
                }
            }
        ]);
        serde_json::from_value(payload).expect("wire payload should deserialize")
    }

    #[test]
    fn deserializes_wire_updates() {
        let updates = sample_updates();
        assert_eq!(updates.len(), 2);
        assert_eq!(updates[0].update_id, 101);

        let msg = updates[0].message.as_ref().unwrap();
        assert_eq!(msg.message_id, 7);
        assert_eq!(msg.text.as_deref(), Some("!hello"));
        assert_eq!(msg.from.as_ref().unwrap().username.as_deref(), Some("alice"));
    }

    #[test]
    fn incoming_maps_text_messages() {
        let updates = sample_updates();
        let message = TelegramAdapter::incoming(&updates[0]).expect("text message should map");

        assert_eq!(message.id, "7");
        assert_eq!(message.channel_id, "-100");
        assert_eq!(message.text, "!hello");
        assert_eq!(message.sender.id, "42");
        assert_eq!(message.sender.display_name(), "alice");
        assert_eq!(message.timestamp.timestamp(), 1_700_000_000);
    }

    #[test]
    fn incoming_skips_non_text_updates() {
        let updates = sample_updates();
        assert!(TelegramAdapter::incoming(&updates[1]).is_none());
    }

    #[test]
    fn incoming_falls_back_to_first_name() {
        let update: Update = serde_json::from_value(serde_json::json!({
            "update_id": 103,
            "message": {
                "message_id": 9,
                "from": { "id": 43, "first_name": "Bob" },
                "chat": { "id": 55 },
                "date": 1_700_000_002,
                "text": "hi"
            }
        }))
        .unwrap();

        let message = TelegramAdapter::incoming(&update).unwrap();
        assert_eq!(message.sender.display_name(), "Bob");
    }

    #[test]
    fn next_offset_advances_past_latest_update() {
        let updates = sample_updates();
        assert_eq!(TelegramAdapter::next_offset(&updates, 0), 103);
    }

    #[test]
    fn next_offset_holds_on_empty_batch() {
        assert_eq!(TelegramAdapter::next_offset(&[], 103), 103);
    }
}
