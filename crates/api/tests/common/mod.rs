#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tally_api::config::ServerConfig;
use tally_api::middleware::auth::TOKEN_HEADER;
use tally_api::router::build_app_router;
use tally_api::state::AppState;
use tally_core::auth::token::TokenConfig;
use tally_core::service::AccountService;
use tally_core::store::InMemoryAccountStore;

pub const TEST_SECRET: &str = "integration-test-secret";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        database_url: "postgres://unused".to_string(),
        cors_origins: vec!["http://localhost:5173".parse().unwrap()],
        request_timeout_secs: 30,
        tokens: TokenConfig::new(TEST_SECRET),
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Uses [`build_app_router`] so tests exercise the production middleware
/// stack. The returned store lets tests inspect state directly.
pub fn build_test_app() -> (Router, Arc<InMemoryAccountStore>) {
    let config = test_config();
    let store = Arc::new(InMemoryAccountStore::new());
    let state = AppState {
        accounts: AccountService::new(store.clone(), &config.tokens),
    };
    (build_app_router(state, &config), store)
}

pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn with_token(app: &Router, method: Method, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(TOKEN_HEADER, token)
        .body(Body::empty())
        .unwrap();
    send(app, request).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Create an account over HTTP and return its JSON representation.
pub async fn create_account(app: &Router, first: &str, password: &str) -> serde_json::Value {
    let body = serde_json::json!({
        "first_name": first,
        "last_name": "Smith",
        "password": password,
    });
    let response = post_json(app, "/account", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}

/// Log in over HTTP and return the token.
pub async fn login(app: &Router, account_number: i64, password: &str) -> String {
    let body = serde_json::json!({ "account_number": account_number, "password": password });
    let response = post_json(app, "/login", body).await;
    assert_eq!(response.status(), axum::http::StatusCode::OK);
    let json = body_json(response).await;
    json["token"].as_str().unwrap().to_string()
}
