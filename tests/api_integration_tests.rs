//! Integration Tests for API Endpoints
//!
//! Tests full request/response cycle for each data service endpoint.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use monopoly_data::{
    api::create_router, schema::DatasetSchema, storage::DatasetStore, AppState,
};
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// == Helper Functions ==

fn create_test_app(dir: &TempDir) -> Router {
    let store = DatasetStore::new(dir.path(), DatasetSchema::game());
    create_router(AppState::new(store), None)
}

async fn body_to_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

fn post_json(uri: &str, body: &'static str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

// == Status Endpoint Tests ==

#[tokio::test]
async fn test_status_endpoint() {
    let dir = TempDir::new().unwrap();

    let response = create_test_app(&dir).oneshot(get("/api/status")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], json!(true));
    assert!(json["timestamp"].is_string());
}

// == Load Endpoint Tests ==

#[tokio::test]
async fn test_load_never_saved_dataset() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir);

    let response = app.clone().oneshot(get("/api/data/users")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json, json!({"success": true, "data": []}));

    let response = app.oneshot(get("/api/data/game_states")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["data"], json!({}));
}

#[tokio::test]
async fn test_load_unknown_dataset() {
    let dir = TempDir::new().unwrap();

    let response = create_test_app(&dir)
        .oneshot(get("/api/data/players"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], json!(false));
    assert!(json["error"].as_str().unwrap().contains("players"));
}

// == Save Endpoint Tests ==

#[tokio::test]
async fn test_save_then_load() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/data/leaderboard",
            r#"[{"player":"alice","score":3200}]"#,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], json!(true));
    assert!(json["message"].as_str().unwrap().contains("leaderboard"));

    let response = app.oneshot(get("/api/data/leaderboard")).await.unwrap();
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["data"], json!([{"player": "alice", "score": 3200}]));

    // Persisted to disk
    assert!(dir.path().join("leaderboard.json").exists());
}

#[tokio::test]
async fn test_save_null_body() {
    let dir = TempDir::new().unwrap();

    let response = create_test_app(&dir)
        .oneshot(post_json("/api/data/users", "null"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json, json!({"success": false, "error": "No data"}));
}

#[tokio::test]
async fn test_save_wrong_shape() {
    let dir = TempDir::new().unwrap();

    let response = create_test_app(&dir)
        .oneshot(post_json("/api/data/shopping_carts", "[1,2,3]"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["success"], json!(false));
}

#[tokio::test]
async fn test_save_unknown_dataset() {
    let dir = TempDir::new().unwrap();

    let response = create_test_app(&dir)
        .oneshot(post_json("/api/data/players", "[]"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// == All-Data Endpoint Tests ==

#[tokio::test]
async fn test_all_data_endpoint() {
    let dir = TempDir::new().unwrap();
    let app = create_test_app(&dir);

    app.clone()
        .oneshot(post_json("/api/data/game_states", r#"{"turn":7}"#))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/all-data")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_to_json(response.into_body()).await;
    let data = json["data"].as_object().unwrap();
    assert_eq!(data.len(), 10);
    assert_eq!(data["game_states"], json!({"turn": 7}));
    assert_eq!(data["purchase_requests"], json!([]));
}

// == Routing Tests ==

#[tokio::test]
async fn test_unknown_api_route() {
    let dir = TempDir::new().unwrap();

    let response = create_test_app(&dir)
        .oneshot(get("/api/upload-everything"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = body_to_json(response.into_body()).await;
    assert_eq!(json["error"], json!("API route not found"));
}

#[tokio::test]
async fn test_cors_headers_present() {
    let dir = TempDir::new().unwrap();

    let response = create_test_app(&dir)
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response
        .headers()
        .contains_key("access-control-allow-origin"));
}
