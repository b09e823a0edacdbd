//! Slash-command parsing and validation
//!
//! Turns message text into a [`Command`] or a [`ValidationError`]. Nothing
//! here touches the store.

use std::fmt;

use crate::utils::SlugPolicy;
use crate::utils::url_validator::{UrlValidationError, validate_url};

/// Commands that take arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandKind {
    Create,
    Delete,
    Check,
}

impl CommandKind {
    pub fn name(&self) -> &'static str {
        match self {
            CommandKind::Create => "create",
            CommandKind::Delete => "delete",
            CommandKind::Check => "check",
        }
    }

    pub fn usage(&self) -> &'static str {
        match self {
            CommandKind::Create => "/create <slug> <url>",
            CommandKind::Delete => "/delete <slug>",
            CommandKind::Check => "/check <slug>",
        }
    }

    pub fn example(&self) -> &'static str {
        match self {
            CommandKind::Create => "/create google https://google.com",
            CommandKind::Delete => "/delete google",
            CommandKind::Check => "/check google",
        }
    }
}

impl fmt::Display for CommandKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A syntactically valid command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Start,
    Create { slug: String, target: String },
    Delete { slug: String },
    Check { slug: String },
    /// Any other `/name`; carries the raw command token.
    Unknown(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Wrong number of arguments for the command.
    MalformedArguments(CommandKind),
    /// Target is not an absolute http(s) URL.
    InvalidTarget {
        target: String,
        reason: UrlValidationError,
    },
    /// Slug has characters outside `[A-Za-z0-9_.-]`, is too long, or is reserved.
    InvalidSlug { slug: String, reserved: bool },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::MalformedArguments(kind) => {
                write!(f, "malformed arguments, usage: {}", kind.usage())
            }
            ValidationError::InvalidTarget { target, reason } => {
                write!(f, "invalid target '{}': {}", target, reason)
            }
            ValidationError::InvalidSlug {
                slug,
                reserved: true,
            } => write!(f, "slug '{}' is reserved", slug),
            ValidationError::InvalidSlug { slug, .. } => write!(f, "invalid slug '{}'", slug),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Whether a message is a slash command at all.
#[inline]
pub fn is_command(text: &str) -> bool {
    text.trim_start().starts_with('/')
}

/// `/create@MyBot` → `create`. `None` when the token is not a command.
fn command_name(token: &str) -> Option<&str> {
    let name = token.strip_prefix('/')?;
    Some(name.split_once('@').map_or(name, |(name, _)| name))
}

#[derive(Debug, Clone, Default)]
pub struct CommandValidator {
    slugs: SlugPolicy,
}

impl CommandValidator {
    pub fn new(slugs: SlugPolicy) -> Self {
        Self { slugs }
    }

    /// Parse and validate one message. Command names are case-sensitive and
    /// arguments are whitespace-separated.
    pub fn validate(&self, text: &str) -> Result<Command, ValidationError> {
        let mut tokens = text.split_whitespace();
        let head = tokens.next().unwrap_or_default();
        let args: Vec<&str> = tokens.collect();

        match command_name(head) {
            Some("start") => Ok(Command::Start),
            Some("create") => {
                let [slug, target] = args.as_slice() else {
                    return Err(ValidationError::MalformedArguments(CommandKind::Create));
                };
                self.check_slug(slug, true)?;
                validate_url(target).map_err(|reason| ValidationError::InvalidTarget {
                    target: target.to_string(),
                    reason,
                })?;
                Ok(Command::Create {
                    slug: slug.to_string(),
                    target: target.to_string(),
                })
            }
            Some("delete") => {
                let slug = self.single_slug(&args, CommandKind::Delete)?;
                Ok(Command::Delete { slug })
            }
            Some("check") => {
                let slug = self.single_slug(&args, CommandKind::Check)?;
                Ok(Command::Check { slug })
            }
            _ => Ok(Command::Unknown(head.to_string())),
        }
    }

    fn single_slug(&self, args: &[&str], kind: CommandKind) -> Result<String, ValidationError> {
        let [slug] = args else {
            return Err(ValidationError::MalformedArguments(kind));
        };
        // 保留路径不可能存在于存储中，查询/删除时只校验字符集
        self.check_slug(slug, false)?;
        Ok(slug.to_string())
    }

    fn check_slug(&self, slug: &str, creating: bool) -> Result<(), ValidationError> {
        if !self.slugs.is_valid(slug) {
            return Err(ValidationError::InvalidSlug {
                slug: slug.to_string(),
                reserved: false,
            });
        }
        if creating && self.slugs.is_reserved(slug) {
            return Err(ValidationError::InvalidSlug {
                slug: slug.to_string(),
                reserved: true,
            });
        }
        Ok(())
    }
}
