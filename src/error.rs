//! Error types for the data client and the data service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ApiResponse;

// == Failure Kind ==
/// Coarse classification of a client failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    /// Network unreachable, non-JSON body, or an envelope missing its fields
    Transport,
    /// The service answered but reported `success: false`
    Application,
    /// A dataset name or payload was rejected by the schema
    Validation,
}

// == Client Error Enum ==
/// Error returned by [`crate::client::DataClient`] operations.
#[derive(Error, Debug)]
pub enum ClientError {
    /// The request could not be sent or the body could not be decoded
    #[error("Transport failure: {0}")]
    Transport(#[from] reqwest::Error),

    /// The response decoded but was not the expected envelope shape
    #[error("Malformed response: {0}")]
    Malformed(String),

    /// The service reported `success: false`
    #[error("Service rejected request: {0}")]
    Rejected(String),

    /// The dataset name cannot be used as a path segment
    #[error("Invalid dataset type: {0}")]
    InvalidDataset(String),

    /// A payload did not match the dataset's schema
    #[error("Dataset '{dataset}' violates schema: {reason}")]
    Schema { dataset: String, reason: String },

    /// A payload could not be converted to or from the caller's type
    #[error("Dataset '{dataset}' could not be converted: {source}")]
    Conversion {
        dataset: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ClientError {
    /// Returns which side of the boundary the failure came from.
    pub fn kind(&self) -> FailureKind {
        match self {
            ClientError::Transport(_) | ClientError::Malformed(_) => FailureKind::Transport,
            ClientError::Rejected(_) => FailureKind::Application,
            ClientError::InvalidDataset(_)
            | ClientError::Schema { .. }
            | ClientError::Conversion { .. } => FailureKind::Validation,
        }
    }
}

// == Service Error Enum ==
/// Error type for the data service handlers.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Dataset type is not registered
    #[error("Unknown dataset type: {0}")]
    UnknownDataset(String),

    /// Request carried no usable body
    #[error("No data")]
    MissingBody,

    /// Payload does not match the dataset's shape
    #[error("Invalid payload: {0}")]
    InvalidPayload(String),

    /// Route under /api that does not exist
    #[error("API route not found")]
    RouteNotFound,

    /// Reading or writing a dataset file failed
    #[error("Storage error: {0}")]
    Storage(#[from] std::io::Error),

    /// Serializing a dataset failed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// == IntoResponse Implementation ==
impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            ServiceError::UnknownDataset(_)
            | ServiceError::MissingBody
            | ServiceError::InvalidPayload(_) => StatusCode::BAD_REQUEST,
            ServiceError::RouteNotFound => StatusCode::NOT_FOUND,
            ServiceError::Storage(_) | ServiceError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ApiResponse::failure(self.to_string()))).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for client operations.
pub type Result<T> = std::result::Result<T, ClientError>;

/// Convenience Result type for service handlers.
pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_kinds() {
        assert_eq!(
            ClientError::Rejected("not found".into()).kind(),
            FailureKind::Application
        );
        assert_eq!(
            ClientError::Malformed("missing data".into()).kind(),
            FailureKind::Transport
        );
        assert_eq!(
            ClientError::InvalidDataset("a/b".into()).kind(),
            FailureKind::Validation
        );
    }

    #[test]
    fn test_service_error_status_codes() {
        let resp = ServiceError::UnknownDataset("x".into()).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let resp = ServiceError::RouteNotFound.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
        let resp = ServiceError::Storage(io).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
