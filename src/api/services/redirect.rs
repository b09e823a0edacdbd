use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, Responder, web};
use tracing::{debug, error, trace};

use crate::store::LinkStore;
use crate::utils::SlugPolicy;

pub const LIVENESS_TEXT: &str = "Link Shortener Bot is running!";

pub struct RedirectService;

impl RedirectService {
    pub async fn handle_redirect(
        path: web::Path<String>,
        store: web::Data<Arc<dyn LinkStore>>,
        slugs: web::Data<SlugPolicy>,
    ) -> impl Responder {
        let slug = path.into_inner();

        if slug.is_empty() || slugs.is_reserved(&slug) {
            Self::liveness()
        } else if !slugs.is_valid(&slug) {
            // 非法短码不打到远端存储
            trace!("Invalid slug rejected: {}", &slug);
            Self::not_found_response()
        } else {
            Self::process_redirect(&slug, store.get_ref().as_ref()).await
        }
    }

    async fn process_redirect(slug: &str, store: &dyn LinkStore) -> HttpResponse {
        match store.get(slug).await {
            Ok(Some(link)) => {
                debug!("Redirecting {} -> {}", slug, link.target);
                HttpResponse::Found()
                    .insert_header(("Location", link.target))
                    .insert_header(("Cache-Control", "no-cache, no-store, must-revalidate"))
                    .finish()
            }
            Ok(None) => {
                debug!("Redirect link not found: {}", slug);
                Self::not_found_response()
            }
            Err(e) => {
                error!("Store error during redirect lookup for '{}': {}", slug, e);
                Self::error_response()
            }
        }
    }

    /// `GET /` and reserved paths.
    pub fn liveness() -> HttpResponse {
        HttpResponse::Ok()
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body(LIVENESS_TEXT)
    }

    /// Fallback for unrouted requests.
    pub async fn not_found() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Not Found")
    }

    #[inline]
    fn not_found_response() -> HttpResponse {
        HttpResponse::build(StatusCode::NOT_FOUND)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Short URL not found")
    }

    #[inline]
    fn error_response() -> HttpResponse {
        HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
            .insert_header(("Content-Type", "text/plain; charset=utf-8"))
            .body("Internal Server Error")
    }
}

/// Redirect 路由配置
pub fn redirect_routes() -> actix_web::Scope {
    web::scope("")
        .route("/{path}*", web::get().to(RedirectService::handle_redirect))
        .route("/{path}*", web::head().to(RedirectService::handle_redirect))
}
