//! Webhook endpoint tests
//!
//! Full request path: secret check → update parsing → gate → validator →
//! dispatcher → inline `sendMessage` reply.

mod common;

use std::sync::Arc;

use actix_web::http::StatusCode;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};
use serde_json::{Value, json};

use linkbot::api::services::RedirectService;
use linkbot::command::{HELP_TEXT, UNKNOWN_COMMAND_TEXT};
use linkbot::runtime::lifetime::startup::build_context;
use linkbot::runtime::modes::server::configure_routes;
use linkbot::store::{InMemoryLinkStore, LinkStore};
use linkbot::telegram::SECRET_TOKEN_HEADER;

use common::{ALLOWED_USER, WEBHOOK_SECRET, test_config};

const CHAT_ID: i64 = 555;

macro_rules! webhook_app {
    ($store:expr) => {{
        let config = test_config("http://store.invalid");
        let store: Arc<dyn LinkStore> = $store;
        let ctx = Arc::new(build_context(&config, store).expect("context"));
        let path = config.telegram.webhook_path.clone();
        test::init_service(
            App::new()
                .configure(move |cfg| configure_routes(cfg, &ctx, &path))
                .default_service(web::to(RedirectService::not_found)),
        )
        .await
    }};
}

fn update(sender: i64, text: &str) -> Value {
    json!({
        "update_id": 1,
        "message": {
            "message_id": 7,
            "from": {"id": sender, "is_bot": false, "first_name": "T"},
            "chat": {"id": CHAT_ID, "type": "private"},
            "date": 1700000000,
            "text": text
        }
    })
}

fn allowed_sender() -> i64 {
    ALLOWED_USER.parse().unwrap()
}

fn post_update(body: &Value) -> TestRequest {
    TestRequest::post()
        .uri("/webhook")
        .insert_header((SECRET_TOKEN_HEADER, WEBHOOK_SECRET))
        .set_json(body)
}

// =============================================================================
// Secret token
// =============================================================================

#[tokio::test]
async fn test_missing_secret_is_401() {
    let store = Arc::new(InMemoryLinkStore::new());
    let app = webhook_app!(store.clone());

    let req = TestRequest::post()
        .uri("/webhook")
        .set_json(update(allowed_sender(), "/create g https://g.com"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_wrong_secret_is_401() {
    let app = webhook_app!(Arc::new(InMemoryLinkStore::new()));

    let req = TestRequest::post()
        .uri("/webhook")
        .insert_header((SECRET_TOKEN_HEADER, "not-the-secret"))
        .set_json(update(allowed_sender(), "/start"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

// =============================================================================
// Replies
// =============================================================================

#[tokio::test]
async fn test_start_returns_help_inline() {
    let app = webhook_app!(Arc::new(InMemoryLinkStore::new()));

    let req = post_update(&update(allowed_sender(), "/start")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["method"], "sendMessage");
    assert_eq!(body["chat_id"], CHAT_ID);
    assert_eq!(body["text"], HELP_TEXT);
}

#[tokio::test]
async fn test_create_via_webhook_stores_link() {
    let store = Arc::new(InMemoryLinkStore::new());
    let app = webhook_app!(store.clone());

    let req = post_update(&update(allowed_sender(), "/create g https://google.com")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    let text = body["text"].as_str().unwrap();
    assert!(text.contains("Short URL: https://s.example.com/g"), "{}", text);
    let link = store.get("g").await.unwrap().unwrap();
    assert_eq!(link.target, "https://google.com");
}

#[tokio::test]
async fn test_create_existing_reports_current_target() {
    let store = Arc::new(InMemoryLinkStore::with_links([("g", "https://first.example")]));
    let app = webhook_app!(store.clone());

    let req =
        post_update(&update(allowed_sender(), "/create g https://second.example")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(
        body["text"],
        "Slug g already exists, pointing to https://first.example"
    );
    assert_eq!(
        store.get("g").await.unwrap().unwrap().target,
        "https://first.example"
    );
}

#[tokio::test]
async fn test_webhook_slug_cannot_be_created() {
    let store = Arc::new(InMemoryLinkStore::new());
    let app = webhook_app!(store.clone());

    let req = post_update(&update(allowed_sender(), "/create webhook https://x.com")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert!(body["text"].as_str().unwrap().contains("reserved"));
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_plain_text_gets_unknown_command() {
    let app = webhook_app!(Arc::new(InMemoryLinkStore::new()));

    // 非白名单用户的普通文本也会得到提示
    let req = post_update(&update(42, "hello")).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["text"], UNKNOWN_COMMAND_TEXT);
}

// =============================================================================
// Silence
// =============================================================================

#[tokio::test]
async fn test_unauthorized_sender_gets_empty_200() {
    let store = Arc::new(InMemoryLinkStore::new());
    let app = webhook_app!(store.clone());

    for text in ["/start", "/create g https://g.com", "/bogus"] {
        let req = post_update(&update(42, text)).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let body = test::read_body(resp).await;
        assert!(body.is_empty(), "{} produced a reply", text);
    }
    assert!(store.is_empty().await);
}

#[tokio::test]
async fn test_malformed_update_is_acknowledged() {
    let app = webhook_app!(Arc::new(InMemoryLinkStore::new()));

    let req = TestRequest::post()
        .uri("/webhook")
        .insert_header((SECRET_TOKEN_HEADER, WEBHOOK_SECRET))
        .insert_header(("Content-Type", "application/json"))
        .set_payload("{not json")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(test::read_body(resp).await.is_empty());
}

#[tokio::test]
async fn test_non_text_update_is_acknowledged() {
    let app = webhook_app!(Arc::new(InMemoryLinkStore::new()));

    let sticker = json!({
        "update_id": 2,
        "message": {
            "message_id": 8,
            "from": {"id": allowed_sender(), "is_bot": false, "first_name": "T"},
            "chat": {"id": CHAT_ID, "type": "private"},
            "date": 1700000000,
            "sticker": {"file_id": "abc"}
        }
    });
    let req = post_update(&sticker).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert!(test::read_body(resp).await.is_empty());
}

// =============================================================================
// Routing
// =============================================================================

#[tokio::test]
async fn test_redirects_served_alongside_webhook() {
    let app = webhook_app!(Arc::new(InMemoryLinkStore::with_links([(
        "g",
        "https://google.com"
    )])));

    let req = TestRequest::get().uri("/g").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::FOUND);
}
