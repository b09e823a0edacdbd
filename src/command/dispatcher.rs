//! Command dispatch
//!
//! Routes a validated [`Command`] to the link store and folds the result into
//! a terminal [`Outcome`]. No retries happen here.
//!
//! `create` and `delete` check existence with a `get` and then write. The two
//! calls are not atomic against the remote store: two concurrent `create`s for
//! the same fresh slug can both see it absent and both `put`, and the last
//! writer wins without either caller hearing about it. The remote API has no
//! create-if-absent primitive to close this.

use std::sync::Arc;

use tracing::{debug, error, info};

use super::parser::{Command, CommandKind, ValidationError};
use crate::store::{Link, LinkStore};

/// Terminal result of one command. Each variant has exactly one reply template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Help,
    Created { slug: String, target: String },
    /// The slug is taken; carries the link that was left untouched.
    AlreadyExists(Link),
    Deleted { slug: String },
    NotFoundForDelete { slug: String },
    Found(Link),
    NotFoundForCheck { slug: String },
    ValidationFailed(ValidationError),
    StoreFailed { operation: CommandKind, slug: String },
    UnknownCommand,
}

impl Outcome {
    /// Short name for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Outcome::Help => "help",
            Outcome::Created { .. } => "created",
            Outcome::AlreadyExists(_) => "already_exists",
            Outcome::Deleted { .. } => "deleted",
            Outcome::NotFoundForDelete { .. } => "not_found_for_delete",
            Outcome::Found(_) => "found",
            Outcome::NotFoundForCheck { .. } => "not_found_for_check",
            Outcome::ValidationFailed(_) => "validation_failed",
            Outcome::StoreFailed { .. } => "store_failed",
            Outcome::UnknownCommand => "unknown_command",
        }
    }
}

pub struct Dispatcher {
    store: Arc<dyn LinkStore>,
}

impl Dispatcher {
    pub fn new(store: Arc<dyn LinkStore>) -> Self {
        Self { store }
    }

    pub async fn dispatch(&self, command: Command) -> Outcome {
        let outcome = match command {
            Command::Start => Outcome::Help,
            Command::Create { slug, target } => self.create(slug, target).await,
            Command::Delete { slug } => self.delete(slug).await,
            Command::Check { slug } => self.check(slug).await,
            Command::Unknown(name) => {
                debug!("Unknown command: {}", name);
                Outcome::UnknownCommand
            }
        };
        debug!("Dispatch outcome: {}", outcome.label());
        outcome
    }

    async fn create(&self, slug: String, target: String) -> Outcome {
        match self.store.get(&slug).await {
            Ok(Some(existing)) => {
                info!(
                    "Refusing to overwrite '{}' (points to {})",
                    slug, existing.target
                );
                Outcome::AlreadyExists(existing)
            }
            Ok(None) => match self.store.put(&slug, &target).await {
                Ok(()) => {
                    info!("Created short link '{}' -> {}", slug, target);
                    Outcome::Created { slug, target }
                }
                Err(e) => {
                    error!("Failed to create short link '{}': {}", slug, e);
                    Self::store_failed(CommandKind::Create, slug)
                }
            },
            Err(e) => {
                error!("Existence check failed while creating '{}': {}", slug, e);
                Self::store_failed(CommandKind::Create, slug)
            }
        }
    }

    async fn delete(&self, slug: String) -> Outcome {
        match self.store.get(&slug).await {
            Ok(None) => Outcome::NotFoundForDelete { slug },
            Ok(Some(_)) => match self.store.delete(&slug).await {
                Ok(()) => {
                    info!("Deleted short link '{}'", slug);
                    Outcome::Deleted { slug }
                }
                Err(e) => {
                    error!("Failed to delete short link '{}': {}", slug, e);
                    Self::store_failed(CommandKind::Delete, slug)
                }
            },
            Err(e) => {
                error!("Existence check failed while deleting '{}': {}", slug, e);
                Self::store_failed(CommandKind::Delete, slug)
            }
        }
    }

    async fn check(&self, slug: String) -> Outcome {
        match self.store.get(&slug).await {
            Ok(Some(link)) => Outcome::Found(link),
            Ok(None) => Outcome::NotFoundForCheck { slug },
            Err(e) => {
                error!("Failed to look up short link '{}': {}", slug, e);
                Self::store_failed(CommandKind::Check, slug)
            }
        }
    }

    #[inline]
    fn store_failed(operation: CommandKind, slug: String) -> Outcome {
        Outcome::StoreFailed { operation, slug }
    }
}
