//! Cache Entry Module
//!
//! Defines the structure for a cached image and its freshness check.

use bytes::Bytes;
use chrono::{DateTime, Duration, Utc};

/// Content type used when upstream does not report one.
pub const DEFAULT_CONTENT_TYPE: &str = "image/jpeg";

// == Cache Entry ==
/// A fetched image together with the moment it was stored.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// Raw image bytes
    pub data: Bytes,
    /// MIME type reported by upstream
    pub content_type: String,
    /// When the entry was written
    pub timestamp: DateTime<Utc>,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new cache entry stamped with `timestamp`.
    pub fn new(data: Bytes, content_type: impl Into<String>, timestamp: DateTime<Utc>) -> Self {
        Self {
            data,
            content_type: content_type.into(),
            timestamp,
        }
    }

    // == Is Fresh ==
    /// Checks whether the entry is still valid at `now`.
    ///
    /// Boundary condition: an entry whose age equals the TTL is no longer
    /// fresh. Validity requires `now - timestamp < ttl`.
    pub fn is_fresh(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        now.signed_duration_since(self.timestamp) < ttl
    }
}
