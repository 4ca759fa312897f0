//! Response envelope for the data service API
//!
//! `{ success, data?, message?, error?, timestamp? }`

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Envelope carried by every response of the data service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse {
    /// Whether the service accepted the request
    pub success: bool,
    /// Payload for data endpoints; `Some(Value::Null)` when the body says `"data": null`
    #[serde(
        default,
        deserialize_with = "present_value",
        skip_serializing_if = "Option::is_none"
    )]
    pub data: Option<Value>,
    /// Human-readable confirmation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Human-readable failure reason
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// RFC 3339 timestamp, only set by the status endpoint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

impl ApiResponse {
    /// Successful response carrying a payload.
    pub fn with_data(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            timestamp: None,
        }
    }

    /// Successful response carrying only a message.
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
            error: None,
            timestamp: None,
        }
    }

    /// Status endpoint response stamped with the current time.
    pub fn running() -> Self {
        Self {
            timestamp: Some(chrono::Utc::now().to_rfc3339()),
            ..Self::ok("Server is running")
        }
    }

    /// Failed response with a reason.
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: None,
            error: Some(error.into()),
            timestamp: None,
        }
    }

    /// Failure reason, or a placeholder when the service gave none.
    pub fn error_message(&self) -> &str {
        self.error.as_deref().unwrap_or("unknown error")
    }
}

// A present field always yields `Some`, even for JSON null.
fn present_value<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}
