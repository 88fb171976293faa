//! Cache Module
//!
//! Provides the in-memory image cache with lazy TTL expiration.

mod clock;
mod entry;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::{CacheEntry, DEFAULT_CONTENT_TYPE};
pub use stats::CacheStats;
pub use store::CacheStore;
