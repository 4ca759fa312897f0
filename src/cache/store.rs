//! Data Cache Module
//!
//! In-memory mapping from dataset type to the last value seen for it, with
//! lazy TTL expiry. Nothing is ever evicted: a stale entry stays in place
//! until it is overwritten or the whole cache is cleared.

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats};

// == Data Cache ==
/// Expiry cache for dataset values.
#[derive(Debug)]
pub struct DataCache {
    /// Dataset type -> entry
    entries: HashMap<String, CacheEntry>,
    /// Lookup statistics
    stats: CacheStats,
    /// Freshness window shared by every entry
    ttl: Duration,
}

impl DataCache {
    // == Constructor ==
    /// Creates an empty cache with the given freshness window.
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl,
        }
    }

    /// Freshness window of this cache.
    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Get ==
    /// Returns a clone of the value if the entry is fresh.
    ///
    /// Stale entries are left in place and counted as misses.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        self.get_at(key, current_timestamp_ms())
    }

    /// [`get`](Self::get) evaluated at an explicit time.
    pub fn get_at(&mut self, key: &str, now: i64) -> Option<Value> {
        match self.entries.get(key) {
            Some(entry) if entry.is_fresh_at(now, self.ttl) => {
                self.stats.record_hit();
                Some(entry.value.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Insert ==
    /// Stores a value stamped with the current time, replacing any previous entry.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) {
        self.insert_at(key, value, current_timestamp_ms());
    }

    /// [`insert`](Self::insert) with an explicit store time.
    pub fn insert_at(&mut self, key: impl Into<String>, value: Value, now: i64) {
        self.entries
            .insert(key.into(), CacheEntry::stored_at(value, now));
        self.stats.record_write();
        self.stats.set_total_entries(self.entries.len());
    }

    /// Stores every pair with one shared timestamp. Keys not in `values` are untouched.
    pub fn insert_many<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = (String, Value)>,
    {
        let now = current_timestamp_ms();
        for (key, value) in values {
            self.insert_at(key, value, now);
        }
    }

    // == Clear ==
    /// Removes every entry. Statistics counters are kept.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Number of entries, stale ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
