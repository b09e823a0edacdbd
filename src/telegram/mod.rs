//! Telegram Bot API transport: webhook intake and webhook management.

pub mod api;
pub mod types;
pub mod webhook;

pub use api::TelegramApi;
pub use types::{SendMessageReply, Update, WebhookInfo};
pub use webhook::{SECRET_TOKEN_HEADER, WebhookService, WebhookState, validate_secret, webhook_routes};
