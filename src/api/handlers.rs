//! API Handlers
//!
//! HTTP request handlers for each data service endpoint.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use serde_json::Value;
use tracing::info;

use crate::error::{ServiceError, ServiceResult};
use crate::models::ApiResponse;
use crate::schema::DatasetSchema;
use crate::storage::DatasetStore;

/// Application state shared across all handlers.
///
/// Contains the dataset store wrapped in Arc<RwLock<>>; saves take the write lock.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<DatasetStore>>,
}

impl AppState {
    /// Creates a new AppState with the given dataset store.
    pub fn new(store: DatasetStore) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    /// Creates a new AppState from configuration, serving the game's datasets.
    pub fn from_config(config: &crate::config::ServerConfig) -> Self {
        Self::new(DatasetStore::new(
            config.data_dir.clone(),
            DatasetSchema::game(),
        ))
    }
}

/// Handler for GET /api/status
pub async fn status_handler() -> Json<ApiResponse> {
    Json(ApiResponse::running())
}

/// Handler for GET /api/data/:dataset
///
/// Never-saved datasets come back as their empty value.
pub async fn load_handler(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
) -> ServiceResult<Json<ApiResponse>> {
    let store = state.store.read().await;
    let value = store.load(&dataset).await?;

    Ok(Json(ApiResponse::with_data(value)))
}

/// Handler for POST /api/data/:dataset
///
/// The body is the raw dataset value. A missing or `null` body is rejected.
pub async fn save_handler(
    State(state): State<AppState>,
    Path(dataset): Path<String>,
    body: Bytes,
) -> ServiceResult<Json<ApiResponse>> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(ServiceError::MissingBody);
    }
    let value: Value = serde_json::from_slice(&body)
        .map_err(|e| ServiceError::InvalidPayload(e.to_string()))?;
    if value.is_null() {
        return Err(ServiceError::MissingBody);
    }

    let store = state.store.write().await;
    store.save(&dataset, &value).await?;
    info!(dataset = %dataset, "Dataset saved");

    Ok(Json(ApiResponse::ok(format!("Dataset {} saved", dataset))))
}

/// Handler for GET /api/all-data
pub async fn load_all_handler(State(state): State<AppState>) -> ServiceResult<Json<ApiResponse>> {
    let store = state.store.read().await;
    let all = store.load_all().await?;

    Ok(Json(ApiResponse::with_data(Value::Object(all))))
}

/// Fallback for unknown routes under /api
pub async fn api_not_found_handler() -> ServiceError {
    ServiceError::RouteNotFound
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn test_state(dir: &TempDir) -> AppState {
        AppState::new(DatasetStore::new(dir.path(), DatasetSchema::game()))
    }

    #[tokio::test]
    async fn test_save_and_load_handler() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let body = Bytes::from_static(br#"[{"id":1,"task":"buy a street"}]"#);
        let result = save_handler(State(state.clone()), Path("cell_tasks".to_string()), body).await;
        assert!(result.is_ok());

        let response = load_handler(State(state), Path("cell_tasks".to_string()))
            .await
            .unwrap();
        assert!(response.success);
        assert_eq!(response.data, Some(json!([{"id": 1, "task": "buy a street"}])));
    }

    #[tokio::test]
    async fn test_load_unknown_dataset() {
        let dir = TempDir::new().unwrap();

        let result = load_handler(State(test_state(&dir)), Path("players".to_string())).await;
        assert!(matches!(result, Err(ServiceError::UnknownDataset(_))));
    }

    #[tokio::test]
    async fn test_save_null_body() {
        let dir = TempDir::new().unwrap();
        let state = test_state(&dir);

        let result = save_handler(
            State(state.clone()),
            Path("users".to_string()),
            Bytes::from_static(b"null"),
        )
        .await;
        assert!(matches!(result, Err(ServiceError::MissingBody)));

        let result = save_handler(State(state), Path("users".to_string()), Bytes::new()).await;
        assert!(matches!(result, Err(ServiceError::MissingBody)));
    }

    #[tokio::test]
    async fn test_save_malformed_body() {
        let dir = TempDir::new().unwrap();

        let result = save_handler(
            State(test_state(&dir)),
            Path("users".to_string()),
            Bytes::from_static(b"[1, 2"),
        )
        .await;
        assert!(matches!(result, Err(ServiceError::InvalidPayload(_))));
    }

    #[tokio::test]
    async fn test_status_handler() {
        let response = status_handler().await;
        assert!(response.success);
    }
}
