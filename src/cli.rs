//! Command-line interface definitions using clap

use clap::{Parser, Subcommand};

/// linkbot - Telegram front end for a remote URL shortener
#[derive(Parser)]
#[command(name = "linkbot")]
#[command(version)]
#[command(about = "Telegram slash-command front end for a URL shortener", long_about = None)]
pub struct Cli {
    /// Configuration file (default: config.toml, optional)
    #[arg(long, short = 'c', global = true)]
    pub config: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the webhook and redirect server (default)
    Serve,

    /// Manage the Telegram webhook registration
    Webhook {
        #[command(subcommand)]
        action: WebhookCommands,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

impl Commands {
    /// Split off the commands that run without the server. `serve` gives `None`.
    pub fn into_cli_command(self) -> Option<CliCommand> {
        match self {
            Commands::Serve => None,
            Commands::Webhook { action } => Some(CliCommand::Webhook(action)),
            Commands::Config { action } => Some(CliCommand::Config(action)),
        }
    }
}

/// A subcommand handled by [`crate::runtime::modes::run_cli`].
pub enum CliCommand {
    Webhook(WebhookCommands),
    Config(ConfigCommands),
}

#[derive(Subcommand)]
pub enum WebhookCommands {
    /// Point Telegram at this bot's webhook endpoint
    Set {
        /// Public webhook URL (default: links.public_base_url + telegram.webhook_path)
        url: Option<String>,
    },

    /// Remove the webhook registration
    Delete {
        /// Discard updates Telegram is still holding
        #[arg(long)]
        drop_pending_updates: bool,
    },

    /// Show the current webhook registration
    Info,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Generate {
        /// Output path (default: print to stdout)
        output_path: Option<String>,

        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },

    /// Load and validate the configuration, then exit
    Check,
}
