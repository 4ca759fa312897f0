//! Cache Module
//!
//! Client-side dataset cache with lazy TTL expiration.

mod entry;
mod stats;
mod store;


// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use stats::CacheStats;
pub use store::DataCache;

// == Public Constants ==
/// Default freshness window for cached datasets
pub const DEFAULT_TTL: std::time::Duration = std::time::Duration::from_millis(5000);
