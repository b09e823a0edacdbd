//! Outbound Bot API calls for webhook management.
//!
//! Commands are answered inline from the webhook response, so the only
//! outbound traffic is `setWebhook`, `deleteWebhook` and `getWebhookInfo`,
//! issued from the CLI.

use std::time::Duration;

use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, warn};
use ureq::Agent;

use super::types::{ApiResponse, WebhookInfo};
use crate::config::TelegramConfig;
use crate::errors::{LinkbotError, Result};

/// Updates the bot subscribes to.
const ALLOWED_UPDATES: &[&str] = &["message"];

pub struct TelegramApi {
    agent: Agent,
    /// `{api_base_url}/bot{token}`; never logged.
    base_url: String,
}

impl TelegramApi {
    pub fn new(bot_token: &str, api_base_url: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            // Bot API 错误也返回 JSON（ok=false + description），需要读取 body
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: format!("{}/bot{}", api_base_url.trim_end_matches('/'), bot_token),
        }
    }

    pub fn from_config(config: &TelegramConfig) -> Self {
        Self::new(
            &config.bot_token,
            &config.api_base_url,
            Duration::from_secs(30),
        )
    }

    /// Register `url` as the webhook; Telegram echoes `secret` back in
    /// `X-Telegram-Bot-Api-Secret-Token` on every delivery.
    pub async fn set_webhook(&self, url: &str, secret: &str) -> Result<bool> {
        let body = json!({
            "url": url,
            "secret_token": secret,
            "allowed_updates": ALLOWED_UPDATES,
        });
        self.call("setWebhook", Some(body)).await
    }

    pub async fn delete_webhook(&self, drop_pending_updates: bool) -> Result<bool> {
        let body = json!({ "drop_pending_updates": drop_pending_updates });
        self.call("deleteWebhook", Some(body)).await
    }

    pub async fn get_webhook_info(&self) -> Result<WebhookInfo> {
        self.call("getWebhookInfo", None).await
    }

    async fn call<T>(&self, method: &'static str, body: Option<serde_json::Value>) -> Result<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        debug!("Telegram API call: {}", method);
        let agent = self.agent.clone();
        let url = format!("{}/{}", self.base_url, method);

        tokio::task::spawn_blocking(move || Self::call_sync(agent, url, method, body))
            .await
            .map_err(|e| LinkbotError::transport(format!("blocking task failed: {}", e)))?
            .inspect_err(|e| warn!("Telegram API {} failed: {}", method, e))
    }

    fn call_sync<T: DeserializeOwned>(
        agent: Agent,
        url: String,
        method: &str,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let resp = match body {
            Some(body) => agent.post(&url).send_json(&body),
            None => agent.get(&url).call(),
        }
        // ureq 的错误信息里带完整 URL（含 bot token），这里不透传
        .map_err(|_| LinkbotError::transport(format!("{}: request failed", method)))?;

        let status = resp.status().as_u16();
        let parsed: ApiResponse<T> = resp.into_body().read_json().map_err(|e| {
            LinkbotError::serialization(format!(
                "{}: invalid response (HTTP {}): {}",
                method, status, e
            ))
        })?;

        match (parsed.ok, parsed.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err(LinkbotError::telegram(format!(
                "{}: response has no result",
                method
            ))),
            (false, _) => Err(LinkbotError::telegram(format!(
                "{} rejected ({}): {}",
                method,
                parsed.error_code.unwrap_or(status.into()),
                parsed.description.unwrap_or_else(|| "no description".to_string())
            ))),
        }
    }
}
