//! Cache Store Module
//!
//! URL-keyed image cache with lazy TTL expiry.
//!
//! Expiry is a read-time predicate: `get` reports a stale entry as a miss but
//! leaves it in place, and only a later `put` for the same key replaces it.
//! There is no capacity bound, so the map grows with the number of distinct
//! URLs seen during the process lifetime.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use bytes::Bytes;
use chrono::Duration;

use crate::cache::{CacheEntry, CacheStats, Clock, SystemClock};

// == Cache Store ==
/// Process-local image cache keyed by the exact upstream URL.
#[derive(Debug)]
pub struct CacheStore {
    /// URL -> entry
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Entry lifetime
    ttl: Duration,
    /// Time source for stamping and aging entries
    clock: Arc<dyn Clock>,
}

impl CacheStore {
    // == Constructor ==
    /// Creates an empty store backed by the system clock.
    pub fn new(ttl: StdDuration) -> Self {
        Self::with_clock(ttl, Arc::new(SystemClock))
    }

    /// Creates an empty store that reads time from `clock`.
    pub fn with_clock(ttl: StdDuration, clock: Arc<dyn Clock>) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            ttl: Duration::from_std(ttl).unwrap_or_else(|_| Duration::days(365 * 100)),
            clock,
        }
    }

    // == Get ==
    /// Returns the entry for `key` if it exists and is younger than the TTL.
    ///
    /// Absent and expired keys are indistinguishable to the caller.
    pub fn get(&mut self, key: &str) -> Option<CacheEntry> {
        let now = self.clock.now();

        match self.entries.get(key) {
            Some(entry) if entry.is_fresh(now, self.ttl) => {
                self.stats.record_hit();
                Some(entry.clone())
            }
            _ => {
                self.stats.record_miss();
                None
            }
        }
    }

    // == Put ==
    /// Stores `data` under `key`, replacing any previous entry.
    pub fn put(&mut self, key: impl Into<String>, data: Bytes, content_type: impl Into<String>) {
        let entry = CacheEntry::new(data, content_type, self.clock.now());
        self.entries.insert(key.into(), entry);
        self.stats.set_total_entries(self.entries.len());
    }

    // == Contains ==
    /// True when an entry is physically present, fresh or not.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    // == Length ==
    /// Returns the number of entries held, expired ones included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
