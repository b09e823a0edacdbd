//! Shared test fixtures: a mock of the remote storage API and store doubles.

#![allow(dead_code)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use actix_web::dev::ServerHandle;
use actix_web::{App, HttpRequest, HttpResponse, HttpServer, web};
use async_trait::async_trait;
use serde_json::json;

use linkbot::config::AppConfig;
use linkbot::store::{Link, LinkStore, StoreError};

pub const ADMIN_TOKEN: &str = "test-admin-token";
pub const ALLOWED_USER: &str = "1001";
pub const WEBHOOK_SECRET: &str = "hook-secret";

// =============================================================================
// Mock remote storage API
// =============================================================================

/// In-process stand-in for the remote `/_/{slug}` API.
#[derive(Default)]
pub struct MockBackend {
    pub links: Mutex<HashMap<String, String>>,
    /// Answer absent slugs with HTTP 404 instead of `{"found": false}`.
    pub absent_as_404: bool,
    /// Answer every request with this status.
    pub force_status: Option<u16>,
    /// Answer GET with a body that is not JSON.
    pub garbage_body: bool,
    /// Answer absent slugs with this envelope instead of `{"found": false}`.
    pub absent_body: Option<serde_json::Value>,
    pub requests: AtomicUsize,
    pub last_put_body: Mutex<Option<serde_json::Value>>,
}

impl MockBackend {
    pub fn with_links(links: &[(&str, &str)]) -> Self {
        Self {
            links: Mutex::new(
                links
                    .iter()
                    .map(|(s, t)| (s.to_string(), t.to_string()))
                    .collect(),
            ),
            ..Self::default()
        }
    }

    pub fn target_of(&self, slug: &str) -> Option<String> {
        self.links.lock().unwrap().get(slug).cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }
}

fn precheck(req: &HttpRequest, backend: &MockBackend) -> Option<HttpResponse> {
    backend.requests.fetch_add(1, Ordering::SeqCst);

    let authorized = req
        .headers()
        .get("Authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {}", ADMIN_TOKEN));
    if !authorized {
        return Some(HttpResponse::Unauthorized().json(json!({"error": "unauthorized"})));
    }
    backend.force_status.map(|status| {
        HttpResponse::build(actix_web::http::StatusCode::from_u16(status).unwrap())
            .json(json!({"error": "forced"}))
    })
}

async fn mock_get(
    req: HttpRequest,
    slug: web::Path<String>,
    backend: web::Data<MockBackend>,
) -> HttpResponse {
    if let Some(resp) = precheck(&req, &backend) {
        return resp;
    }
    if backend.garbage_body {
        return HttpResponse::Ok().body("<html>oops</html>");
    }
    match backend.target_of(&slug) {
        Some(target) => HttpResponse::Ok().json(json!({
            "found": true,
            "item": {
                "type": "link",
                "payload": target,
                "createdAt": "2026-01-02T03:04:05Z",
                "inheritParam": false
            }
        })),
        None if backend.absent_as_404 => HttpResponse::NotFound().finish(),
        None if backend.absent_body.is_some() => {
            HttpResponse::Ok().json(backend.absent_body.clone().unwrap_or_default())
        }
        None => HttpResponse::Ok().json(json!({"found": false})),
    }
}

async fn mock_put(
    req: HttpRequest,
    slug: web::Path<String>,
    body: web::Json<serde_json::Value>,
    backend: web::Data<MockBackend>,
) -> HttpResponse {
    if let Some(resp) = precheck(&req, &backend) {
        return resp;
    }
    let body = body.into_inner();
    let payload = body["payload"].as_str().unwrap_or_default().to_string();
    *backend.last_put_body.lock().unwrap() = Some(body);
    backend
        .links
        .lock()
        .unwrap()
        .insert(slug.into_inner(), payload);
    HttpResponse::Ok().json(json!({"ok": true}))
}

async fn mock_delete(
    req: HttpRequest,
    slug: web::Path<String>,
    backend: web::Data<MockBackend>,
) -> HttpResponse {
    if let Some(resp) = precheck(&req, &backend) {
        return resp;
    }
    match backend.links.lock().unwrap().remove(slug.as_str()) {
        Some(_) => HttpResponse::Ok().json(json!({"ok": true})),
        None => HttpResponse::NotFound().finish(),
    }
}

pub struct MockServer {
    pub addr: SocketAddr,
    pub backend: web::Data<MockBackend>,
    handle: ServerHandle,
}

impl MockServer {
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub async fn stop(self) {
        self.handle.stop(false).await;
    }
}

/// Start the mock API on an ephemeral port. Must run inside an actix system.
pub fn start_mock_backend(backend: MockBackend) -> MockServer {
    let backend = web::Data::new(backend);
    let data = backend.clone();

    let server = HttpServer::new(move || {
        App::new().app_data(data.clone()).service(
            web::resource("/_/{slug}")
                .route(web::get().to(mock_get))
                .route(web::put().to(mock_put))
                .route(web::delete().to(mock_delete)),
        )
    })
    .workers(1)
    .disable_signals()
    .bind(("127.0.0.1", 0))
    .expect("bind mock backend");

    let addr = server.addrs()[0];
    let server = server.run();
    let handle = server.handle();
    actix_rt::spawn(server);

    MockServer {
        addr,
        backend,
        handle,
    }
}

// =============================================================================
// Store doubles
// =============================================================================

/// A store whose every call fails as if the network were down.
pub struct UnreachableStore {
    pub calls: AtomicUsize,
}

impl UnreachableStore {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl LinkStore for UnreachableStore {
    async fn get(&self, _slug: &str) -> Result<Option<Link>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn put(&self, _slug: &str, _target: &str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Transport("connection refused".to_string()))
    }

    async fn delete(&self, _slug: &str) -> Result<(), StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(StoreError::Transport("connection refused".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "unreachable"
    }
}

// =============================================================================
// Config
// =============================================================================

/// A complete, valid configuration pointing at `base_url`.
pub fn test_config(base_url: &str) -> AppConfig {
    let mut config = AppConfig::default();
    config.backend.base_url = base_url.to_string();
    config.backend.admin_token = ADMIN_TOKEN.to_string();
    config.backend.timeout_secs = 5;
    config.telegram.bot_token = "123456:TEST".to_string();
    config.telegram.webhook_secret = WEBHOOK_SECRET.to_string();
    config.auth.allowed_users = ALLOWED_USER.to_string();
    config.links.public_base_url = Some("https://s.example.com".to_string());
    config
}
