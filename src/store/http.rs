//! Remote link store over HTTP
//!
//! Talks to `{base_url}/_/{slug}` with a bearer admin token. ureq is blocking,
//! so every call runs on the tokio blocking pool.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, trace, warn};
use ureq::Agent;

use super::models::{Link, LinkInfoResponse, PutLinkRequest};
use super::{LinkStore, StoreError};
use crate::config::BackendConfig;

pub struct HttpLinkStore {
    agent: Agent,
    base_url: String,
    bearer: Arc<str>,
}

impl HttpLinkStore {
    pub fn new(base_url: &str, admin_token: &str, timeout: Duration) -> Self {
        let agent: Agent = Agent::config_builder()
            .timeout_global(Some(timeout))
            // 状态码由我们自己区分（404 视为不存在），不让 ureq 转成错误
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
            bearer: Arc::from(format!("Bearer {}", admin_token)),
        }
    }

    pub fn from_config(config: &BackendConfig) -> Self {
        Self::new(
            &config.base_url,
            &config.admin_token,
            Duration::from_secs(config.timeout_secs),
        )
    }

    /// `{base_url}/_/{slug}` with the slug percent-encoded.
    pub fn link_url(&self, slug: &str) -> String {
        format!("{}/_/{}", self.base_url, urlencoding::encode(slug))
    }

    fn fetch_sync(
        agent: Agent,
        url: String,
        bearer: Arc<str>,
    ) -> Result<Option<LinkInfoResponse>, StoreError> {
        let resp = agent
            .get(&url)
            .header("Authorization", &*bearer)
            .header("Content-Type", "application/json")
            .call()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        let status = resp.status().as_u16();
        if status == 404 {
            return Ok(None);
        }
        if !resp.status().is_success() {
            return Err(StoreError::Status(status));
        }

        resp.into_body()
            .read_json::<LinkInfoResponse>()
            .map(Some)
            .map_err(|e| StoreError::Decode(e.to_string()))
    }

    fn put_sync(
        agent: Agent,
        url: String,
        bearer: Arc<str>,
        target: String,
    ) -> Result<(), StoreError> {
        let resp = agent
            .put(&url)
            .header("Authorization", &*bearer)
            .send_json(PutLinkRequest::link(&target))
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(StoreError::Status(resp.status().as_u16()));
        }
        Ok(())
    }

    fn delete_sync(agent: Agent, url: String, bearer: Arc<str>) -> Result<(), StoreError> {
        let resp = agent
            .delete(&url)
            .header("Authorization", &*bearer)
            .call()
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(StoreError::Status(resp.status().as_u16()));
        }
        Ok(())
    }
}

/// Run a blocking store call on the tokio blocking pool.
async fn run_blocking<T, F>(f: F) -> Result<T, StoreError>
where
    F: FnOnce() -> Result<T, StoreError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| StoreError::Transport(format!("blocking task failed: {}", e)))?
}

#[async_trait]
impl LinkStore for HttpLinkStore {
    async fn get(&self, slug: &str) -> Result<Option<Link>, StoreError> {
        let url = self.link_url(slug);
        trace!("GET {}", url);

        let (agent, bearer) = (self.agent.clone(), self.bearer.clone());
        let envelope = run_blocking(move || Self::fetch_sync(agent, url, bearer))
            .await
            .inspect_err(|e| warn!("Failed to fetch link '{}': {}", slug, e))?;

        let link = match envelope {
            Some(env) => env
                .into_link(slug)
                .map_err(|e| StoreError::Decode(e.to_string()))
                .inspect_err(|e| warn!("Failed to decode link '{}': {}", slug, e))?,
            None => None,
        };
        debug!("Store lookup for '{}': found={}", slug, link.is_some());
        Ok(link)
    }

    async fn put(&self, slug: &str, target: &str) -> Result<(), StoreError> {
        let url = self.link_url(slug);
        trace!("PUT {}", url);

        let (agent, bearer) = (self.agent.clone(), self.bearer.clone());
        let target = target.to_string();
        run_blocking(move || Self::put_sync(agent, url, bearer, target))
            .await
            .inspect_err(|e| warn!("Failed to store link '{}': {}", slug, e))
    }

    async fn delete(&self, slug: &str) -> Result<(), StoreError> {
        let url = self.link_url(slug);
        trace!("DELETE {}", url);

        let (agent, bearer) = (self.agent.clone(), self.bearer.clone());
        run_blocking(move || Self::delete_sync(agent, url, bearer))
            .await
            .inspect_err(|e| warn!("Failed to delete link '{}': {}", slug, e))
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
