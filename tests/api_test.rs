//! Integration tests for API endpoints.
//!
//! These tests drive the full router over an in-memory store, so no database
//! is required.

use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use tower::ServiceExt;

use command_api::api::{create_router, AppState};
use command_api::errors::{AppError, AppResult};
use command_api::infra::{CommandContext, ContextFactory};
use command_api::MemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

fn test_app() -> (Router, MemoryStore) {
    let store = MemoryStore::new();
    let app = create_router(AppState::new(Arc::new(store.clone())));
    (app, store)
}

/// Store whose backend is unreachable
struct UnreachableStore;

#[async_trait]
impl ContextFactory for UnreachableStore {
    fn open(&self) -> Box<dyn CommandContext> {
        MemoryStore::new().open()
    }

    async fn ping(&self) -> AppResult<()> {
        Err(AppError::internal("connection refused"))
    }
}

struct TestResponse {
    status: StatusCode,
    location: Option<String>,
    body: Value,
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };

    TestResponse {
        status,
        location,
        body,
    }
}

async fn create(app: &Router, how_to: &str, platform: &str, command_line: &str) -> i64 {
    let response = send(
        app,
        Method::POST,
        "/api/commands",
        Some(json!({"howTo": how_to, "platform": platform, "commandLine": command_line})),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["id"].as_i64().unwrap()
}

// =============================================================================
// Ambient Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_root_endpoint_returns_welcome_message() {
    let (app, _) = test_app();

    let response = send(&app, Method::GET, "/", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, Value::String("Welcome to Command API".into()));
}

#[tokio::test]
async fn test_health_reports_store_status() {
    let (app, _) = test_app();

    let response = send(&app, Method::GET, "/health", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "healthy");
    assert_eq!(response.body["services"]["store"]["status"], "healthy");
}

#[tokio::test]
async fn test_health_degrades_when_store_is_unreachable() {
    let app = create_router(AppState::new(Arc::new(UnreachableStore)));

    let response = send(&app, Method::GET, "/health", None).await;

    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(response.body["status"], "degraded");
    assert_eq!(response.body["services"]["store"]["status"], "unhealthy");
    assert!(response.body["services"]["store"]["error"].is_string());
}

#[tokio::test]
async fn test_openapi_document_is_served() {
    let (app, _) = test_app();

    let response = send(&app, Method::GET, "/api-docs/openapi.json", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert!(response.body["paths"]["/api/commands/{id}"].is_object());
}

// =============================================================================
// Command Endpoint Tests
// =============================================================================

#[tokio::test]
async fn test_list_empty_store() {
    let (app, _) = test_app();

    let response = send(&app, Method::GET, "/api/commands", None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!([]));
}

#[tokio::test]
async fn test_get_unknown_id_returns_404() {
    let (app, _) = test_app();

    let response = send(&app, Method::GET, "/api/commands/0", None).await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"]["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_non_integer_path_id_returns_json_400() {
    let (app, _) = test_app();

    let response = send(&app, Method::GET, "/api/commands/abc", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn test_non_integer_query_id_returns_json_400() {
    let (app, store) = test_app();
    create(&app, "a", "p", "c").await;

    let response = send(&app, Method::DELETE, "/api/commands?id=abc", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "BAD_REQUEST");
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_create_returns_location_of_new_command() {
    let (app, store) = test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/commands",
        Some(json!({"id": 77, "howTo": "List files", "platform": "linux", "commandLine": "ls"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_i64().unwrap();
    assert_ne!(id, 77);
    assert_eq!(response.location, Some(format!("/api/commands/{}", id)));
    assert_eq!(store.len().await, 1);

    let fetched = send(&app, Method::GET, &format!("/api/commands/{}", id), None).await;
    assert_eq!(fetched.status, StatusCode::OK);
    assert_eq!(fetched.body["howTo"], "List files");
}

#[tokio::test]
async fn test_create_accepts_pascal_case_body() {
    let (app, _) = test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/commands",
        Some(json!({"HowTo": "Build", "Platform": "dotnet", "CommandLine": "dotnet build"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(response.body["commandLine"], "dotnet build");
}

#[tokio::test]
async fn test_create_with_oversized_platform_returns_400() {
    let (app, store) = test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/commands",
        Some(json!({"howTo": "a", "platform": "Some Platform", "commandLine": "c"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_create_with_malformed_body_returns_400() {
    let (app, store) = test_app();

    let response = send(
        &app,
        Method::POST,
        "/api/commands",
        Some(json!({"howTo": "missing the other fields"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(response.body["error"]["code"], "BAD_REQUEST");
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_update_with_mismatched_id_returns_400_and_changes_nothing() {
    let (app, _) = test_app();
    let id = create(&app, "a", "p", "c").await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/commands?id={}", id),
        Some(json!({"id": id + 1, "howTo": "b", "platform": "p", "commandLine": "c"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let fetched = send(&app, Method::GET, &format!("/api/commands/{}", id), None).await;
    assert_eq!(fetched.body["howTo"], "a");
}

#[tokio::test]
async fn test_update_without_id_param_binds_zero() {
    let (app, _) = test_app();
    let id = create(&app, "a", "p", "c").await;

    let response = send(
        &app,
        Method::PUT,
        "/api/commands",
        Some(json!({"id": id, "howTo": "b", "platform": "p", "commandLine": "c"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_update_by_path_overwrites_every_field() {
    let (app, _) = test_app();
    let id = create(&app, "a", "p", "c").await;

    let response = send(
        &app,
        Method::PUT,
        &format!("/api/commands/{}", id),
        Some(json!({"id": id, "howTo": "b", "platform": "q", "commandLine": "d"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::NO_CONTENT);
    assert_eq!(response.body, Value::Null);

    let fetched = send(&app, Method::GET, &format!("/api/commands/{}", id), None).await;
    assert_eq!(
        fetched.body,
        json!({"id": id, "howTo": "b", "platform": "q", "commandLine": "d"})
    );
}

#[tokio::test]
async fn test_update_of_missing_row_surfaces_store_error() {
    let (app, store) = test_app();

    let response = send(
        &app,
        Method::PUT,
        "/api/commands?id=42",
        Some(json!({"id": 42, "howTo": "b", "platform": "p", "commandLine": "c"})),
    )
    .await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(store.len().await, 0);
}

#[tokio::test]
async fn test_delete_unknown_id_returns_400() {
    let (app, store) = test_app();
    create(&app, "a", "p", "c").await;

    let response = send(&app, Method::DELETE, "/api/commands?id=999", None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn test_delete_by_path_removes_only_that_row() {
    let (app, store) = test_app();
    let first = create(&app, "a", "p", "c").await;
    let second = create(&app, "b", "p", "c").await;

    let response = send(&app, Method::DELETE, &format!("/api/commands/{}", first), None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["id"], first);
    assert_eq!(store.len().await, 1);

    let listed = send(&app, Method::GET, "/api/commands", None).await;
    assert_eq!(listed.body.as_array().unwrap().len(), 1);
    assert_eq!(listed.body[0]["id"], second);
}

// =============================================================================
// End-to-end Scenario
// =============================================================================

#[tokio::test]
async fn test_full_lifecycle() {
    let (app, store) = test_app();

    // Create
    let response = send(
        &app,
        Method::POST,
        "/api/commands",
        Some(json!({"howTo": "a", "platform": "p", "commandLine": "c"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::CREATED);
    assert_eq!(store.len().await, 1);
    let id = response.body["id"].as_i64().unwrap();
    let location = response.location.unwrap();

    // Read back through the Location header
    let response = send(&app, Method::GET, &location, None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({"id": id, "howTo": "a", "platform": "p", "commandLine": "c"})
    );

    // Replace
    let response = send(
        &app,
        Method::PUT,
        &format!("/api/commands?id={}", id),
        Some(json!({"id": id, "howTo": "b", "platform": "p", "commandLine": "c"})),
    )
    .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);

    let response = send(&app, Method::GET, &location, None).await;
    assert_eq!(response.body["howTo"], "b");

    // Delete
    let response = send(&app, Method::DELETE, &format!("/api/commands?id={}", id), None).await;
    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(store.len().await, 0);

    let response = send(&app, Method::GET, &location, None).await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);
}
