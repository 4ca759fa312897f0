//! Cache Entry Module
//!
//! Defines the structure for individual cached datasets with freshness checks.

use std::time::Duration;

use serde_json::Value;

// == Cache Entry ==
/// A cached dataset value and the moment it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The cached dataset
    pub value: Value,
    /// Store timestamp (Unix milliseconds)
    pub stored_at: i64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry with an explicit store timestamp.
    pub fn stored_at(value: Value, stored_at: i64) -> Self {
        Self { value, stored_at }
    }

    // == Age ==
    /// Milliseconds elapsed between storing and `now`. Clock steps backwards count as zero.
    pub fn age_ms(&self, now: i64) -> u64 {
        u64::try_from(now.saturating_sub(self.stored_at)).unwrap_or(0)
    }

    // == Is Fresh ==
    /// Checks whether the entry is still within its TTL at `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is stale.
    pub fn is_fresh_at(&self, now: i64, ttl: Duration) -> bool {
        u128::from(self.age_ms(now)) < ttl.as_millis()
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
pub fn current_timestamp_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}
