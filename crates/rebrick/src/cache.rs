//! In-memory TTL cache for successful response payloads.
//!
//! One instance is owned by the request engine and shared by every call
//! going through it. Entries carry their own time-to-live and are checked
//! lazily on read; the underlying moka cache bounds the total entry count,
//! so sustained traffic over distinct cache keys cannot grow the store
//! without limit.

use std::time::{Duration, Instant};

use moka::future::Cache;
use serde_json::Value;

/// A cached payload with its expiry bookkeeping.
#[derive(Debug, Clone)]
struct CacheEntry {
    payload: Value,
    stored_at: Instant,
    ttl: Duration,
}

impl CacheEntry {
    fn is_expired_at(&self, now: Instant) -> bool {
        now.duration_since(self.stored_at) > self.ttl
    }
}

/// TTL-based key/value store keyed by request fingerprint.
#[derive(Debug, Clone)]
pub(crate) struct ResponseCache {
    entries: Cache<String, CacheEntry>,
}

impl ResponseCache {
    /// Create a store holding at most `capacity` entries.
    pub(crate) fn new(capacity: u64) -> Self {
        Self {
            entries: Cache::new(capacity),
        }
    }

    /// Look up a payload, invalidating it if its TTL has elapsed.
    pub(crate) async fn get(&self, key: &str) -> Option<Value> {
        let entry = self.entries.get(key).await?;
        if entry.is_expired_at(Instant::now()) {
            self.entries.invalidate(key).await;
            return None;
        }
        Some(entry.payload)
    }

    /// Store a payload, overwriting any existing entry under `key`.
    pub(crate) async fn set(&self, key: String, payload: Value, ttl: Duration) {
        let entry = CacheEntry {
            payload,
            stored_at: Instant::now(),
            ttl,
        };
        self.entries.insert(key, entry).await;
    }
}
