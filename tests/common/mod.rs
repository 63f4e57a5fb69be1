//! Shared helpers for router-level tests.

#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt; // for oneshot

use hoots::http_server::{HttpServer, HttpServerConfig};
use hoots::posts::CommentPolicy;

pub const TEST_SECRET: &str = "hoots-test-signing-secret";

pub fn test_config() -> HttpServerConfig {
    HttpServerConfig {
        jwt_secret: TEST_SECRET.to_string(),
        ..HttpServerConfig::default()
    }
}

pub fn test_app() -> Router {
    HttpServer::with_config(test_config()).router()
}

pub fn test_app_with_policy(policy: CommentPolicy) -> Router {
    let config = HttpServerConfig {
        comment_policy: policy,
        ..test_config()
    };
    HttpServer::with_config(config).router()
}

/// Send one request and return the status plus the body parsed as JSON
/// (or as a JSON string when the body is not JSON).
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .unwrap();

    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

/// Register a user and return (token, user id)
pub async fn sign_up(app: &Router, username: &str) -> (String, String) {
    let (status, body) = send(
        app,
        Method::POST,
        "/auth/sign-up",
        None,
        Some(json!({ "username": username, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "sign-up failed: {}", body);

    let token = body["token"].as_str().unwrap().to_string();
    let id = body["user"]["_id"].as_str().unwrap().to_string();
    (token, id)
}

/// Create a post as `token` and return its id
pub async fn create_hoot(app: &Router, token: &str, title: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/hoots",
        Some(token),
        Some(json!({ "title": title, "text": "body text", "category": "News" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create failed: {}", body);
    body["_id"].as_str().unwrap().to_string()
}

/// Add a comment as `token` and return its id
pub async fn add_comment(app: &Router, token: &str, hoot_id: &str, text: &str) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        &format!("/hoots/{}/comments", hoot_id),
        Some(token),
        Some(json!({ "text": text })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "comment failed: {}", body);
    body["_id"].as_str().unwrap().to_string()
}
