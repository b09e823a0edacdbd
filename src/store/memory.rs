//! In-process link store, used for local runs and tests.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::models::{Link, LinkMetadata, PutLinkRequest};
use super::{LinkStore, StoreError};

#[derive(Default)]
pub struct InMemoryLinkStore {
    links: RwLock<HashMap<String, Link>>,
}

impl InMemoryLinkStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store pre-populated with `(slug, target)` pairs.
    pub fn with_links<I, S, T>(links: I) -> Self
    where
        I: IntoIterator<Item = (S, T)>,
        S: Into<String>,
        T: Into<String>,
    {
        let links = links
            .into_iter()
            .map(|(slug, target)| {
                let slug = slug.into();
                (slug.clone(), Self::make_link(slug, target.into()))
            })
            .collect();
        Self {
            links: RwLock::new(links),
        }
    }

    pub async fn len(&self) -> usize {
        self.links.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.links.read().await.is_empty()
    }

    fn make_link(slug: String, target: String) -> Link {
        Link {
            slug,
            target,
            metadata: LinkMetadata {
                kind: Some(PutLinkRequest::LINK_TYPE.to_string()),
                ..LinkMetadata::default()
            },
        }
    }
}

#[async_trait]
impl LinkStore for InMemoryLinkStore {
    async fn get(&self, slug: &str) -> Result<Option<Link>, StoreError> {
        Ok(self.links.read().await.get(slug).cloned())
    }

    async fn put(&self, slug: &str, target: &str) -> Result<(), StoreError> {
        self.links.write().await.insert(
            slug.to_string(),
            Self::make_link(slug.to_string(), target.to_string()),
        );
        Ok(())
    }

    async fn delete(&self, slug: &str) -> Result<(), StoreError> {
        match self.links.write().await.remove(slug) {
            Some(_) => Ok(()),
            None => Err(StoreError::Status(404)),
        }
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
