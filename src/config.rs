//! Configuration Module
//!
//! Handles loading client and service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::cache::DEFAULT_TTL;

/// Base URL of the data service API when none is configured
pub const DEFAULT_API_URL: &str = "http://localhost:5000/api";

/// Data client configuration.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the data service API, without a trailing slash
    pub base_url: String,
    /// Freshness window of cached datasets
    pub cache_ttl: Duration,
    /// Transport-level timeout handed to the HTTP client; None leaves it unbounded
    pub request_timeout: Option<Duration>,
}

impl ClientConfig {
    /// Creates a config for the given base URL with default cache settings.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(base_url.into()),
            ..Self::default()
        }
    }

    /// Overrides the cache freshness window.
    pub fn with_cache_ttl(mut self, ttl: Duration) -> Self {
        self.cache_ttl = ttl;
        self
    }

    /// Sets a transport timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Creates a new ClientConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MONOPOLY_API_URL` - Data service base URL (default: http://localhost:5000/api)
    /// - `CACHE_TTL_MS` - Cache freshness window in milliseconds (default: 5000)
    /// - `REQUEST_TIMEOUT_MS` - Transport timeout in milliseconds (default: none)
    pub fn from_env() -> Self {
        Self {
            base_url: normalize_base_url(
                env::var("MONOPOLY_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            ),
            cache_ttl: env::var("CACHE_TTL_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis)
                .unwrap_or(DEFAULT_TTL),
            request_timeout: env::var("REQUEST_TIMEOUT_MS")
                .ok()
                .and_then(|v| v.parse().ok())
                .map(Duration::from_millis),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            cache_ttl: DEFAULT_TTL,
            request_timeout: None,
        }
    }
}

fn normalize_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}

/// Data service configuration.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP server port
    pub server_port: u16,
    /// Directory holding one JSON file per dataset
    pub data_dir: PathBuf,
    /// Optional directory of frontend files served outside /api
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    /// Creates a new ServerConfig by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `PORT` - HTTP server port (default: 5000)
    /// - `DATA_DIR` - Dataset directory (default: data)
    /// - `STATIC_DIR` - Frontend directory (default: none)
    pub fn from_env() -> Self {
        Self {
            server_port: env::var("PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(5000),
            data_dir: env::var("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("data")),
            static_dir: env::var("STATIC_DIR").ok().map(PathBuf::from),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            server_port: 5000,
            data_dir: PathBuf::from("data"),
            static_dir: None,
        }
    }
}
