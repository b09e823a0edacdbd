use std::time::Duration;

use actix_web::dev::ServerHandle;
use tokio::signal;
use tokio::time::timeout;
use tracing::{error, info, warn};

/// 关闭超时时间（秒）
const SHUTDOWN_TIMEOUT_SECS: u64 = 30;

/// Wait for Ctrl+C, then stop the server, letting in-flight webhook calls finish.
pub async fn listen_for_shutdown(handle: ServerHandle) {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received, draining connections..."),
        Err(e) => warn!(
            "Failed to listen for Ctrl+C: {}. Proceeding with shutdown anyway.",
            e
        ),
    }

    match timeout(Duration::from_secs(SHUTDOWN_TIMEOUT_SECS), handle.stop(true)).await {
        Ok(()) => info!("Server stopped gracefully"),
        Err(_) => {
            error!(
                "Graceful shutdown timed out after {} seconds, forcing stop",
                SHUTDOWN_TIMEOUT_SECS
            );
            handle.stop(false).await;
        }
    }
}
