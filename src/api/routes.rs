//! API Routes
//!
//! Configures the Axum router with all data service endpoints.

use std::path::Path;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use super::handlers::{
    api_not_found_handler, load_all_handler, load_handler, save_handler, status_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/status` - Service status
/// - `GET /api/data/:dataset` - Load one dataset
/// - `POST /api/data/:dataset` - Save one dataset
/// - `GET /api/all-data` - Load every dataset
///
/// When `static_dir` is given, other paths are served from it with
/// `index.html` as the fallback for client-side routes.
pub fn create_router(state: AppState, static_dir: Option<&Path>) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route("/status", get(status_handler))
        .route("/data/:dataset", get(load_handler).post(save_handler))
        .route("/all-data", get(load_all_handler))
        .fallback(api_not_found_handler)
        .with_state(state);

    let mut router = Router::new().nest("/api", api);

    if let Some(dir) = static_dir {
        let spa = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
        router = router.fallback_service(spa);
    }

    router.layer(cors).layer(TraceLayer::new_for_http())
}
