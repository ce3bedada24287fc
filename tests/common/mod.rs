#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use contacts_api::{app, connect_memory, ensure_resource_tables, resolve, AppState, FullConfig, Settings};
use serde_json::Value;
use tower::ServiceExt;

pub async fn test_state() -> AppState {
    let model = resolve(&FullConfig::contacts()).expect("builtin model resolves");
    let pool = connect_memory().await.expect("in-memory database opens");
    ensure_resource_tables(&pool, &model).await.expect("tables created");
    AppState::new(pool, model)
}

pub async fn test_app() -> (Router, AppState) {
    let state = test_state().await;
    (app(state.clone(), &Settings::default()), state)
}

pub async fn send(router: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(v.to_string())),
        None => builder.body(Body::empty()),
    }
    .expect("request builds");
    send_request(router, request).await
}

pub async fn send_request(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.expect("router responds");
    let status = response.status();
    let bytes = to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body reads");
    let value = serde_json::from_slice(&bytes)
        .unwrap_or_else(|e| panic!("body is not JSON ({e}): {}", String::from_utf8_lossy(&bytes)));
    (status, value)
}

pub async fn get(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::GET, uri, None).await
}

pub async fn post(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::POST, uri, Some(body)).await
}

pub async fn put(router: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(router, Method::PUT, uri, Some(body)).await
}

pub async fn delete(router: &Router, uri: &str) -> (StatusCode, Value) {
    send(router, Method::DELETE, uri, None).await
}

/// Creates a contact and returns its id.
pub async fn create_contact(router: &Router, name: &str, phone: &str) -> i64 {
    let (status, body) = post(router, "/api/contacts", serde_json::json!({"name": name, "phone": phone})).await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    body["data"]["id"].as_i64().expect("created row has an id")
}
