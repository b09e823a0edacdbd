//! Outcome → reply text
//!
//! The single place where outcomes become user-facing text. Replies are plain
//! text so slugs and URLs never need escaping.

use super::dispatcher::Outcome;
use super::parser::{CommandKind, ValidationError};
use crate::store::Link;
use crate::utils::MAX_SLUG_LENGTH;
use crate::utils::url_validator::validation_error_message;

pub const HELP_TEXT: &str = "Welcome to the Link Shortener Bot! 🔗\n\n\
    Available commands:\n\
    • /create <slug> <url> - Create a short URL\n\
    • /delete <slug> - Delete a short URL\n\
    • /check <slug> - Check information about a short URL";

pub const UNKNOWN_COMMAND_TEXT: &str = "Unknown command. Use /start to see available commands.";

#[derive(Debug, Clone, Default)]
pub struct ReplyRenderer {
    public_base_url: Option<String>,
}

impl ReplyRenderer {
    pub fn new(public_base_url: Option<String>) -> Self {
        Self {
            public_base_url: public_base_url.map(|u| u.trim_end_matches('/').to_string()),
        }
    }

    /// `{public_base_url}/{slug}`, when a public base is configured.
    pub fn short_url(&self, slug: &str) -> Option<String> {
        self.public_base_url
            .as_ref()
            .map(|base| format!("{}/{}", base, slug))
    }

    pub fn render(&self, outcome: &Outcome) -> String {
        match outcome {
            Outcome::Help => HELP_TEXT.to_string(),
            Outcome::Created { slug, target } => {
                let mut text = format!("✅ Short URL created!\n\nSlug: {}\n", slug);
                if let Some(short) = self.short_url(slug) {
                    text.push_str(&format!("Short URL: {}\n", short));
                }
                text.push_str(&format!("Target: {}", target));
                text
            }
            Outcome::AlreadyExists(existing) => format!(
                "Slug {} already exists, pointing to {}",
                existing.slug, existing.target
            ),
            Outcome::Deleted { slug } => format!("✅ Short URL {} has been deleted.", slug),
            Outcome::NotFoundForDelete { slug } => {
                format!("Short URL {} not found, nothing to delete.", slug)
            }
            Outcome::Found(link) => self.render_found(link),
            Outcome::NotFoundForCheck { slug } => format!("Short URL {} not found.", slug),
            Outcome::ValidationFailed(err) => Self::render_validation(err),
            Outcome::StoreFailed { operation, .. } => {
                let verb = match operation {
                    CommandKind::Create => "creating",
                    CommandKind::Delete => "deleting",
                    CommandKind::Check => "checking",
                };
                format!("❌ Error {} short URL. Please try again.", verb)
            }
            Outcome::UnknownCommand => UNKNOWN_COMMAND_TEXT.to_string(),
        }
    }

    fn render_found(&self, link: &Link) -> String {
        let mut text = format!("ℹ️ Information for {}:\n\n", link.slug);
        if let Some(short) = self.short_url(&link.slug) {
            text.push_str(&format!("Short URL: {}\n", short));
        }
        text.push_str(&format!("Target: {}", link.target));
        if let Some(created_at) = &link.metadata.created_at {
            text.push_str(&format!("\nCreated: {}", created_at));
        }
        text
    }

    fn render_validation(err: &ValidationError) -> String {
        match err {
            ValidationError::MalformedArguments(kind) => {
                format!("Usage: {}\n\nExample: {}", kind.usage(), kind.example())
            }
            ValidationError::InvalidTarget { reason, .. } => format!(
                "Invalid URL provided ({}). Please provide a valid URL starting with http:// or https://",
                validation_error_message(reason)
            ),
            ValidationError::InvalidSlug {
                slug,
                reserved: true,
            } => format!("Slug {} is reserved, please choose another one.", slug),
            ValidationError::InvalidSlug { slug, .. } => format!(
                "Invalid slug {}. Use 1-{} characters: letters, digits, '-', '_' or '.'.",
                slug, MAX_SLUG_LENGTH
            ),
        }
    }
}
