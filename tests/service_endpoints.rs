mod common;

use axum::http::StatusCode;
use common::*;
use serde_json::json;

#[tokio::test]
async fn health_and_version() {
    let (router, _) = test_app().await;

    let (status, body) = get(&router, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"code": 0, "msg": "ok"}));

    let (status, body) = get(&router, "/version").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["name"], "contacts-api");
    assert!(body["data"]["version"].is_string());
}

#[tokio::test]
async fn ready_reflects_store_availability() {
    let (router, state) = test_app().await;

    let (status, body) = get(&router, "/ready").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 0);

    state.pool.close().await;
    let (status, body) = get(&router, "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body, json!({"code": -1, "msg": "database unavailable"}));
}

#[tokio::test]
async fn closed_store_yields_database_error_on_crud() {
    let (router, state) = test_app().await;
    state.pool.close().await;

    let (status, body) = get(&router, "/api/contacts/1").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"code": 3, "msg": "database error"}));
}

#[tokio::test]
async fn unknown_route_is_an_envelope() {
    let (router, _) = test_app().await;

    let (status, body) = get(&router, "/nope/at/all").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"code": 2, "msg": "route not found"}));
}

#[tokio::test]
async fn unsupported_method_is_an_envelope() {
    let (router, _) = test_app().await;

    let (status, body) = delete(&router, "/api/contacts").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body, json!({"code": 2, "msg": "method not allowed"}));

    let (status, body) = get(&router, "/api/contacts/import").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 2);

    let (status, body) = post(&router, "/health", json!({})).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["msg"], "method not allowed");
}
