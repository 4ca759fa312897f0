//! Monopoly Data - game dataset client and service
//!
//! `DataClient` loads and saves named datasets over HTTP and keeps a
//! short-lived cache of them. The `api` and `storage` modules implement the
//! JSON service it talks to.

pub mod api;
pub mod cache;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod schema;
pub mod storage;

pub use api::AppState;
pub use client::DataClient;
pub use config::{ClientConfig, ServerConfig};
pub use error::{ClientError, FailureKind};
