//! Server mode
//!
//! Serves the Telegram webhook and the public redirect surface from one
//! actix-web server.

use std::sync::Arc;

use actix_web::{App, HttpServer, middleware::DefaultHeaders, web};
use anyhow::{Context, Result};
use tracing::warn;

use crate::api::services::{RedirectService, redirect_routes};
use crate::config::AppConfig;
use crate::runtime::lifetime;
use crate::runtime::lifetime::startup::StartupContext;
use crate::telegram::webhook_routes;

/// Telegram updates are small; anything bigger is not an update.
const MAX_PAYLOAD_BYTES: usize = 256 * 1024;

/// Register app data and routes. The webhook resource goes first so the
/// catch-all redirect scope never shadows it.
pub fn configure_routes(cfg: &mut web::ServiceConfig, ctx: &StartupContext, webhook_path: &str) {
    cfg.app_data(web::Data::new(ctx.store.clone()))
        .app_data(web::Data::new(ctx.slugs.clone()))
        .app_data(web::Data::from(ctx.webhook.clone()))
        .app_data(web::PayloadConfig::new(MAX_PAYLOAD_BYTES))
        .service(webhook_routes(webhook_path))
        .service(redirect_routes());
}

/// Run the HTTP server
///
/// **Note**: Logging system must be initialized before calling this function
pub async fn run_server(config: Arc<AppConfig>) -> Result<()> {
    let startup = Arc::new(
        lifetime::startup::prepare_server_startup(config.clone()).map_err(|e| {
            tracing::error!("Server startup failed: {}", e);
            e
        })?,
    );

    let cpu_count = config.server.cpu_count.clamp(1, 32);
    warn!("Using {} CPU cores for the server", cpu_count);

    let webhook_path = config.telegram.webhook_path.clone();
    warn!("Telegram webhook endpoint: POST {}", webhook_path);

    let server = HttpServer::new(move || {
        let startup = startup.clone();
        let webhook_path = webhook_path.clone();
        App::new()
            .wrap(
                DefaultHeaders::new()
                    .add(("Connection", "keep-alive"))
                    .add(("Keep-Alive", "timeout=30, max=1000")),
            )
            .configure(move |cfg| configure_routes(cfg, &startup, &webhook_path))
            .default_service(web::to(RedirectService::not_found))
    })
    .keep_alive(std::time::Duration::from_secs(30))
    .client_request_timeout(std::time::Duration::from_millis(5000))
    .client_disconnect_timeout(std::time::Duration::from_millis(1000))
    .workers(cpu_count)
    .disable_signals();

    let bind_address = format!("{}:{}", config.server.host, config.server.port);
    warn!("Starting server at http://{}", bind_address);
    let server = server
        .bind(&bind_address)
        .with_context(|| format!("Failed to bind {}", bind_address))?
        .run();
    let handle = server.handle();

    tokio::select! {
        res = server => {
            res.context("HTTP server terminated with an error")?;
        }
        _ = lifetime::shutdown::listen_for_shutdown(handle) => {
            warn!("Graceful shutdown complete");
        }
    }

    Ok(())
}
