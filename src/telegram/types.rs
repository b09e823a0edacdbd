//! Serde types for the Telegram Bot API.
//!
//! Only the fields the bot reads are modelled; everything else in an update
//! is ignored.

use serde::{Deserialize, Serialize};

/// Envelope of every Bot API method response.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub error_code: Option<i64>,
    pub result: Option<T>,
}

#[derive(Debug, Deserialize)]
pub struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<Message>,
}

#[derive(Debug, Deserialize)]
pub struct Message {
    pub message_id: i64,
    #[serde(default)]
    pub from: Option<User>,
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct User {
    pub id: i64,
    #[serde(default)]
    pub is_bot: bool,
    #[serde(default)]
    pub username: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Chat {
    pub id: i64,
    #[serde(rename = "type", default)]
    pub chat_type: Option<String>,
}

/// `getWebhookInfo` result.
#[derive(Debug, Default, Deserialize)]
pub struct WebhookInfo {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub pending_update_count: u64,
    #[serde(default)]
    pub last_error_date: Option<i64>,
    #[serde(default)]
    pub last_error_message: Option<String>,
    #[serde(default)]
    pub allowed_updates: Option<Vec<String>>,
}

/// A `sendMessage` call returned as the webhook response body.
///
/// Telegram executes it on the bot's behalf, so no outbound request is needed
/// to answer a command.
#[derive(Debug, Serialize)]
pub struct SendMessageReply {
    pub method: &'static str,
    pub chat_id: i64,
    pub text: String,
}

impl SendMessageReply {
    pub fn new(chat_id: i64, text: String) -> Self {
        Self {
            method: "sendMessage",
            chat_id,
            text,
        }
    }
}
