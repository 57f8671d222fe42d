mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::CountingBackend;
use redirect_api::utils::id_codec::encode_id;
use serde_json::json;

fn upsert_body() -> serde_json::Value {
    json!({ "from": "/economy/old-path", "to": "/economy/new-path" })
}

fn upsert_path() -> String {
    format!("/v1/redirects/{}", encode_id("/economy/old-path"))
}

#[tokio::test]
async fn test_put_without_token_is_unauthorized() {
    let backend = Arc::new(CountingBackend::new());
    let server = common::server_with_auth(common::create_test_state(backend.clone()));

    let response = server.put(&upsert_path()).json(&upsert_body()).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(backend.total_calls(), 0);
}

#[tokio::test]
async fn test_put_with_unknown_token_is_unauthorized() {
    let backend = Arc::new(CountingBackend::new());
    let server = common::server_with_auth(common::create_test_state(backend));

    let response = server
        .put(&upsert_path())
        .add_header("Authorization", "Bearer not-a-real-token")
        .json(&upsert_body())
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_put_with_token_lacking_permission_is_forbidden() {
    let backend = Arc::new(CountingBackend::new());
    let server = common::server_with_auth(common::create_test_state(backend));

    let response = server
        .put(&upsert_path())
        .add_header(
            "Authorization",
            format!("Bearer {}", common::READ_ONLY_TOKEN),
        )
        .json(&upsert_body())
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_put_with_edit_token_succeeds() {
    let backend = Arc::new(CountingBackend::new());
    let server = common::server_with_auth(common::create_test_state(backend));

    let response = server
        .put(&upsert_path())
        .add_header("Authorization", format!("Bearer {}", common::EDIT_TOKEN))
        .json(&upsert_body())
        .await;

    response.assert_status(StatusCode::CREATED);
}

#[tokio::test]
async fn test_delete_without_token_is_unauthorized() {
    let backend = Arc::new(CountingBackend::new());
    backend.seed("/economy/old-path", "/economy/new-path").await;

    let server = common::server_with_auth(common::create_test_state(backend.clone()));

    let response = server.delete(&upsert_path()).await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    assert_eq!(backend.total_calls(), 0);
}

#[tokio::test]
async fn test_delete_with_edit_token_succeeds() {
    let backend = Arc::new(CountingBackend::new());
    backend.seed("/economy/old-path", "/economy/new-path").await;

    let server = common::server_with_auth(common::create_test_state(backend));

    let response = server
        .delete(&upsert_path())
        .add_header("Authorization", format!("Bearer {}", common::EDIT_TOKEN))
        .await;

    response.assert_status(StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_reads_require_no_token() {
    let backend = Arc::new(CountingBackend::new());
    backend.seed("/economy/old-path", "/economy/new-path").await;

    let server = common::server_with_auth(common::create_test_state(backend));

    server.get("/v1/redirects").await.assert_status_ok();
    server.get(&upsert_path()).await.assert_status_ok();
}
