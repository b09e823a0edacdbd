//! Webhook endpoint for Telegram updates.
//!
//! - The `X-Telegram-Bot-Api-Secret-Token` header is compared in constant time;
//!   a missing or wrong token is rejected with 401 before the body is parsed.
//! - Anything that is not a text message from a user is acknowledged with an
//!   empty 200 so Telegram does not redeliver it.
//! - Replies ride back inline as a `sendMessage` call in the response body.

use std::sync::Arc;

use actix_web::{HttpRequest, HttpResponse, web};
use subtle::ConstantTimeEq;
use tracing::{debug, info, warn};

use super::types::{SendMessageReply, Update};
use crate::command::{CommandPipeline, InboundCommand, ReplyRenderer};

pub const SECRET_TOKEN_HEADER: &str = "X-Telegram-Bot-Api-Secret-Token";

pub struct WebhookState {
    secret_token: String,
    pipeline: Arc<CommandPipeline>,
    renderer: ReplyRenderer,
}

impl WebhookState {
    pub fn new(secret_token: String, pipeline: Arc<CommandPipeline>, renderer: ReplyRenderer) -> Self {
        Self {
            secret_token,
            pipeline,
            renderer,
        }
    }
}

/// Constant-time token comparison; a length mismatch still burns one compare.
pub fn validate_secret(expected: &str, provided: &str) -> bool {
    let expected = expected.as_bytes();
    let provided = provided.as_bytes();

    if expected.len() != provided.len() {
        let _ = expected.ct_eq(expected);
        return false;
    }
    expected.ct_eq(provided).into()
}

pub struct WebhookService;

impl WebhookService {
    pub async fn handle_update(
        req: HttpRequest,
        body: web::Bytes,
        state: web::Data<WebhookState>,
    ) -> HttpResponse {
        let provided = req
            .headers()
            .get(SECRET_TOKEN_HEADER)
            .and_then(|v| v.to_str().ok());
        let authorized = provided.is_some_and(|token| validate_secret(&state.secret_token, token));
        if !authorized {
            warn!(
                "Webhook request with {} secret token from {}",
                if provided.is_some() { "invalid" } else { "missing" },
                req.connection_info().peer_addr().unwrap_or("unknown")
            );
            return HttpResponse::Unauthorized().finish();
        }

        let update: Update = match serde_json::from_slice(&body) {
            Ok(update) => update,
            Err(e) => {
                warn!("Discarding malformed update: {}", e);
                return HttpResponse::Ok().finish();
            }
        };

        let Some(message) = update.message else {
            debug!("Update {} carries no message, ignored", update.update_id);
            return HttpResponse::Ok().finish();
        };
        let (Some(text), Some(from)) = (message.text, message.from) else {
            debug!("Update {} is not a text message from a user", update.update_id);
            return HttpResponse::Ok().finish();
        };

        let inbound = InboundCommand::new(from.id.to_string(), text);
        match state.pipeline.handle(&inbound).await {
            Some(outcome) => {
                info!(
                    "Update {} from {} -> {}",
                    update.update_id,
                    inbound.sender_id,
                    outcome.label()
                );
                let text = state.renderer.render(&outcome);
                HttpResponse::Ok().json(SendMessageReply::new(message.chat.id, text))
            }
            None => HttpResponse::Ok().finish(),
        }
    }
}

/// Webhook route at `path` (POST only).
pub fn webhook_routes(path: &str) -> actix_web::Resource {
    web::resource(path.to_string()).route(web::post().to(WebhookService::handle_update))
}
