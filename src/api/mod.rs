//! API Module
//!
//! HTTP handlers and routing for the data service.
//!
//! # Endpoints
//! - `GET /api/status` - Service status
//! - `GET /api/data/:dataset` - Load a dataset
//! - `POST /api/data/:dataset` - Save a dataset
//! - `GET /api/all-data` - Load every dataset

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
