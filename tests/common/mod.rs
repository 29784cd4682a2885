//! Helpers for driving the router in-process.
#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{HeaderMap, Request, StatusCode},
    Router,
};
use serde_json::Value;
use tower::ServiceExt;

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

impl TestResponse {
    pub fn content_type(&self) -> &str {
        self.headers
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("")
    }
}

/// Send a request with an optional raw body. No `Content-Type` is set.
pub async fn send(app: &Router, method: &str, uri: &str, body: Option<&str>) -> TestResponse {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .body(body.map(|b| Body::from(b.to_string())).unwrap_or_else(Body::empty))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    TestResponse { status, headers, body }
}

pub async fn send_json(app: &Router, method: &str, uri: &str, body: Value) -> TestResponse {
    send(app, method, uri, Some(&body.to_string())).await
}

pub async fn create_programmer(app: &Router, body: Value) -> TestResponse {
    let response = send_json(app, "POST", "/api/programmers", body).await;
    assert_eq!(response.status, StatusCode::CREATED, "{}", response.body);
    response
}
