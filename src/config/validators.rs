//! 配置校验
//!
//! Collects every problem in one pass so an operator sees the whole list of
//! missing keys at once.

use super::AppConfig;
use crate::auth::parse_allow_list;
use crate::errors::{LinkbotError, Result};
use crate::utils::url_validator::validate_url;

/// Valid `logging.format` values
pub const LOG_FORMATS: &[&str] = &["text", "json"];

pub fn validate_app_config(config: &AppConfig) -> Result<()> {
    let mut problems: Vec<String> = Vec::new();

    require(&mut problems, "backend.base_url", &config.backend.base_url);
    require(&mut problems, "backend.admin_token", &config.backend.admin_token);
    require(&mut problems, "telegram.bot_token", &config.telegram.bot_token);
    require(
        &mut problems,
        "telegram.webhook_secret",
        &config.telegram.webhook_secret,
    );

    if parse_allow_list(&config.auth.allowed_users).is_empty() {
        problems.push("auth.allowed_users is required (comma-separated sender ids)".to_string());
    }

    if !config.backend.base_url.trim().is_empty()
        && let Err(e) = validate_url(&config.backend.base_url)
    {
        problems.push(format!("backend.base_url: {}", e));
    }

    if let Some(public) = &config.links.public_base_url
        && let Err(e) = validate_url(public)
    {
        problems.push(format!("links.public_base_url: {}", e));
    }

    if !config.telegram.webhook_path.starts_with('/') {
        problems.push(format!(
            "telegram.webhook_path must start with '/': {}",
            config.telegram.webhook_path
        ));
    }

    if config.backend.timeout_secs == 0 {
        problems.push("backend.timeout_secs must be greater than 0".to_string());
    }

    if !LOG_FORMATS.contains(&config.logging.format.as_str()) {
        problems.push(format!(
            "logging.format must be one of {:?}, got '{}'",
            LOG_FORMATS, config.logging.format
        ));
    }

    if problems.is_empty() {
        Ok(())
    } else {
        Err(LinkbotError::config(format!(
            "invalid configuration:\n  - {}",
            problems.join("\n  - ")
        )))
    }
}

fn require(problems: &mut Vec<String>, key: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{} is required", key));
    }
}
