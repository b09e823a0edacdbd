use std::sync::Arc;
use std::time::Instant;

use anyhow::Result;
use tracing::{debug, info};

use crate::auth::AuthorizationGate;
use crate::command::{CommandPipeline, CommandValidator, Dispatcher, ReplyRenderer};
use crate::config::AppConfig;
use crate::store::{HttpLinkStore, LinkStore};
use crate::telegram::WebhookState;
use crate::utils::SlugPolicy;

/// Everything the HTTP workers share, built once before the server starts.
pub struct StartupContext {
    pub store: Arc<dyn LinkStore>,
    pub slugs: SlugPolicy,
    pub webhook: Arc<WebhookState>,
}

/// 准备服务器启动的上下文
pub fn prepare_server_startup(config: Arc<AppConfig>) -> Result<StartupContext> {
    let store: Arc<dyn LinkStore> = Arc::new(HttpLinkStore::from_config(&config.backend));
    info!(
        "Using link store backend: {} ({})",
        store.backend_name(),
        config.backend.base_url
    );

    build_context(&config, store)
}

/// Wire the command pipeline around an existing store.
pub fn build_context(config: &AppConfig, store: Arc<dyn LinkStore>) -> Result<StartupContext> {
    let start_time = Instant::now();

    let gate = AuthorizationGate::from_allow_list(&config.auth.allowed_users);
    if gate.is_empty() {
        anyhow::bail!("auth.allowed_users has no usable ids; refusing to start");
    }
    info!("Authorization gate loaded with {} allowed sender(s)", gate.len());

    let slugs = SlugPolicy::new(config.reserved_slugs());
    let pipeline = CommandPipeline::new(
        gate,
        CommandValidator::new(slugs.clone()),
        Dispatcher::new(store.clone()),
    );
    let webhook = Arc::new(WebhookState::new(
        config.telegram.webhook_secret.clone(),
        Arc::new(pipeline),
        ReplyRenderer::new(config.links.public_base_url.clone()),
    ));

    debug!(
        "Startup context built in {} ms",
        start_time.elapsed().as_millis()
    );

    Ok(StartupContext {
        store,
        slugs,
        webhook,
    })
}
