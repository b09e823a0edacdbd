//! Link storage
//!
//! The remote store is the single source of truth: nothing is cached here and
//! every operation is one round trip. [`LinkStore`] is the seam the dispatcher
//! and the redirect service depend on.

pub mod http;
pub mod memory;
mod models;

use std::fmt;

use async_trait::async_trait;

pub use http::HttpLinkStore;
pub use memory::InMemoryLinkStore;
pub use models::{Link, LinkInfoResponse, LinkItem, LinkMetadata, PutLinkRequest};

/// Failure talking to the link store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store answered with a non-success HTTP status.
    Status(u16),
    /// The request never got an answer (DNS, timeout, connection reset...).
    Transport(String),
    /// The store answered but the body could not be decoded.
    Decode(String),
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Status(status) => write!(f, "store returned HTTP {}", status),
            StoreError::Transport(msg) => write!(f, "store unreachable: {}", msg),
            StoreError::Decode(msg) => write!(f, "invalid store response: {}", msg),
        }
    }
}

impl std::error::Error for StoreError {}

/// Keyed CRUD over short links.
///
/// There is no conditional write: callers that check existence before a
/// `put` or `delete` race with other writers.
#[async_trait]
pub trait LinkStore: Send + Sync {
    /// Fetch a link. `Ok(None)` means the store positively reported it absent.
    async fn get(&self, slug: &str) -> Result<Option<Link>, StoreError>;

    /// Create or replace the link at `slug`.
    async fn put(&self, slug: &str, target: &str) -> Result<(), StoreError>;

    /// Remove the link at `slug`.
    async fn delete(&self, slug: &str) -> Result<(), StoreError>;

    fn backend_name(&self) -> &'static str;
}
