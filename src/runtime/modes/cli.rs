//! CLI mode
//!
//! Webhook registration and config helpers. None of these start the server.

use std::path::Path;

use colored::Colorize;

use crate::cli::{CliCommand, ConfigCommands, WebhookCommands};
use crate::config::AppConfig;
use crate::errors::{LinkbotError, Result};
use crate::telegram::TelegramApi;

/// Run a non-server command. `config_path` is the `-c/--config` override.
pub async fn run_cli(cmd: CliCommand, config_path: Option<&str>) -> Result<()> {
    match cmd {
        // generate 不需要有效配置
        CliCommand::Config(ConfigCommands::Generate { output_path, force }) => {
            config_generate(output_path, force)
        }
        CliCommand::Config(ConfigCommands::Check) => config_check(config_path),
        CliCommand::Webhook(action) => {
            let config = AppConfig::load(config_path)?;
            run_webhook_command(&config, action).await
        }
    }
}

async fn run_webhook_command(config: &AppConfig, action: WebhookCommands) -> Result<()> {
    let api = TelegramApi::from_config(&config.telegram);

    match action {
        WebhookCommands::Set { url } => {
            let url = match url {
                Some(url) => url,
                None => default_webhook_url(config)?,
            };
            api.set_webhook(&url, &config.telegram.webhook_secret).await?;
            println!("{} {}", "Webhook registered:".green(), url.blue());
        }
        WebhookCommands::Delete {
            drop_pending_updates,
        } => {
            api.delete_webhook(drop_pending_updates).await?;
            println!("{}", "Webhook removed".green());
        }
        WebhookCommands::Info => {
            let info = api.get_webhook_info().await?;
            if info.url.is_empty() {
                println!("{}", "No webhook registered".yellow());
            } else {
                println!("{} {}", "URL:".bold(), info.url.blue());
            }
            println!("{} {}", "Pending updates:".bold(), info.pending_update_count);
            if let Some(allowed) = info.allowed_updates {
                println!("{} {}", "Allowed updates:".bold(), allowed.join(", "));
            }
            if let Some(msg) = info.last_error_message {
                println!("{} {}", "Last error:".bold(), msg.red());
            }
        }
    }
    Ok(())
}

/// `links.public_base_url` + `telegram.webhook_path`.
pub fn default_webhook_url(config: &AppConfig) -> Result<String> {
    let base = config.links.public_base_url.as_deref().ok_or_else(|| {
        LinkbotError::config("no webhook URL given and links.public_base_url is not set")
    })?;
    Ok(format!(
        "{}{}",
        base.trim_end_matches('/'),
        config.telegram.webhook_path
    ))
}

fn config_generate(output_path: Option<String>, force: bool) -> Result<()> {
    let Some(path) = output_path else {
        print!("{}", AppConfig::generate_sample_config()?);
        return Ok(());
    };

    if !force && Path::new(&path).exists() {
        return Err(LinkbotError::file_operation(format!(
            "{} already exists, pass --force to overwrite",
            path
        )));
    }

    AppConfig::save_sample_config(&path)?;
    println!(
        "  {} {}",
        "Configuration file generated successfully".green(),
        path.blue()
    );
    println!(
        "  {}",
        "Fill in the backend, telegram and auth sections before starting".yellow()
    );
    Ok(())
}

fn config_check(config_path: Option<&str>) -> Result<()> {
    let config = AppConfig::load(config_path)?;
    println!("{}", "Configuration OK".green().bold());
    println!("  {} {}", "Backend:".bold(), config.backend.base_url);
    println!("  {} {}", "Webhook path:".bold(), config.telegram.webhook_path);
    println!(
        "  {} {}",
        "Allowed senders:".bold(),
        crate::auth::parse_allow_list(&config.auth.allowed_users).len()
    );
    Ok(())
}
