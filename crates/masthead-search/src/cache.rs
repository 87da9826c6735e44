//! TTL cache for query results.
//!
//! Time is always passed in, never read from the wall clock, so tests and
//! the request layer share one notion of "now" and nothing here sleeps.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

#[derive(Debug, Clone)]
struct CacheEntry<T> {
    value: T,
    stored_at: DateTime<Utc>,
    seq: u64,
}

/// Capacity-bounded TTL cache keyed by query string.
///
/// Entries expire `ttl` after insertion; at capacity the oldest insertion
/// is evicted first.
#[derive(Debug, Clone)]
pub struct QueryCache<T> {
    capacity: usize,
    ttl: Duration,
    next_seq: u64,
    entries: BTreeMap<String, CacheEntry<T>>,
}

impl<T> QueryCache<T> {
    /// # Panics
    ///
    /// Panics when `capacity` is 0; a cache that can hold nothing is a
    /// configuration error, not a runtime condition.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        assert!(capacity > 0, "cache capacity must be non-zero");
        Self {
            capacity,
            ttl,
            next_seq: 0,
            entries: BTreeMap::new(),
        }
    }

    /// Fetch a live entry; expired entries miss (they are evicted lazily).
    #[must_use]
    pub fn get(&self, key: &str, now: DateTime<Utc>) -> Option<&T> {
        self.entries
            .get(key)
            .filter(|entry| now - entry.stored_at < self.ttl)
            .map(|entry| &entry.value)
    }

    /// Store a value, replacing any entry under the same key.
    pub fn insert(&mut self, key: &str, value: T, now: DateTime<Utc>) {
        if !self.entries.contains_key(key) && self.entries.len() >= self.capacity {
            self.evict_oldest();
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.entries.insert(
            key.to_string(),
            CacheEntry {
                value,
                stored_at: now,
                seq,
            },
        );
    }

    /// Drop every expired entry; returns how many were removed.
    pub fn purge_expired(&mut self, now: DateTime<Utc>) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries.retain(|_, entry| now - entry.stored_at < ttl);
        let purged = before - self.entries.len();
        if purged > 0 {
            tracing::debug!(purged, "purged expired query cache entries");
        }
        purged
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn evict_oldest(&mut self) {
        let oldest = self
            .entries
            .iter()
            .min_by_key(|(_, entry)| entry.seq)
            .map(|(key, _)| key.clone());
        if let Some(key) = oldest {
            self.entries.remove(&key);
        }
    }
}
