#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use tracker_api::auth::jwt::JwtConfig;
use tracker_api::config::{LogFormat, ServerConfig};
use tracker_api::router::build_app_router;
use tracker_api::state::AppState;
use tracker_db::MemoryStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        db_max_connections: 1,
        log_format: LogFormat::Text,
        jwt: JwtConfig {
            secret: "test-secret-that-is-long-enough-for-hmac".to_string(),
            expiry_days: 30,
            cookie_secure: true,
        },
    }
}

/// Build the full application router over a fresh in-memory store.
///
/// Uses the same [`build_app_router`] as `main.rs`, so tests exercise the
/// production middleware stack. Clones of the returned router share the store.
pub fn build_test_app() -> Router {
    build_test_app_with(Arc::new(MemoryStore::new()))
}

/// Same as [`build_test_app`], over a caller-provided store.
pub fn build_test_app_with(store: Arc<MemoryStore>) -> Router {
    let config = test_config();
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
    };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
    cookie: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(COOKIE, cookie);
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn get_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, Some(cookie)).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), None).await
}

pub async fn post_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(body), Some(cookie)).await
}

pub async fn put_json_auth(
    app: Router,
    uri: &str,
    body: serde_json::Value,
    cookie: &str,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body), Some(cookie)).await
}

pub async fn delete_auth(app: Router, uri: &str, cookie: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None, Some(cookie)).await
}

/// Send a raw body with a JSON content type.
pub async fn post_raw_auth(app: Router, uri: &str, body: &str, cookie: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// The raw `Set-Cookie` header for the session cookie, if any.
pub fn set_cookie_header(response: &Response<Body>) -> Option<String> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with("jwt="))
        .map(str::to_string)
}

/// `jwt=<token>` pair suitable for a `Cookie` request header.
pub fn session_cookie(response: &Response<Body>) -> String {
    let header = set_cookie_header(response).expect("response should set the jwt cookie");
    header.split(';').next().unwrap().to_string()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// Register a user through the API and return their session cookie.
pub async fn register(app: &Router, name: &str, email: &str) -> String {
    let body = serde_json::json!({
        "name": name,
        "email": email,
        "password": "secret1",
        "country": "US",
    });
    let response = post_json(app.clone(), "/api/users", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    session_cookie(&response)
}

/// Create a project through the API and return its id.
pub async fn create_project(app: &Router, cookie: &str, title: &str) -> i64 {
    let body = serde_json::json!({ "title": title, "description": "Things to do" });
    let response = post_json_auth(app.clone(), "/api/projects", body, cookie).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    body_json(response).await["id"].as_i64().unwrap()
}
