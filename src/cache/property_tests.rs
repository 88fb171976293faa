//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the store's read/write behavior over generated keys and payloads.

use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration as StdDuration;

use bytes::Bytes;
use chrono::Duration;

use crate::cache::{CacheStore, Clock, ManualClock};

// == Test Configuration ==
const TEST_TTL: StdDuration = StdDuration::from_secs(24 * 60 * 60);

// == Strategies ==
/// Generates image URLs in the shape the proxy receives
fn url_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{3,12}", "w(92|154|342|500|780)", "[a-zA-Z0-9]{4,24}")
        .prop_map(|(host, size, name)| format!("https://{}.org/t/p/{}/{}.jpg", host, size, name))
}

fn payload_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..512)
}

fn content_type_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("image/jpeg".to_string()),
        Just("image/png".to_string()),
        Just("image/webp".to_string()),
        Just("image/avif".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // Storing an image then reading it back before expiry returns exactly
    // the bytes and content type that were stored.
    #[test]
    fn prop_roundtrip_storage(
        url in url_strategy(),
        payload in payload_strategy(),
        content_type in content_type_strategy(),
    ) {
        let mut store = CacheStore::new(TEST_TTL);

        store.put(url.clone(), Bytes::from(payload.clone()), content_type.clone());
        let entry = store.get(&url).unwrap();

        prop_assert_eq!(&entry.data[..], &payload[..]);
        prop_assert_eq!(entry.content_type, content_type);
    }

    // Keys that were never written always miss.
    #[test]
    fn prop_unwritten_keys_miss(
        written in prop::collection::vec(url_strategy(), 0..20),
        probes in prop::collection::vec(url_strategy(), 1..20),
    ) {
        let mut store = CacheStore::new(TEST_TTL);
        let written_set: HashSet<String> = written.iter().cloned().collect();

        for url in &written {
            store.put(url.clone(), Bytes::from_static(b"x"), "image/jpeg");
        }

        for probe in probes.iter().filter(|p| !written_set.contains(*p)) {
            prop_assert!(store.get(probe).is_none(), "unexpected hit for {}", probe);
        }
        prop_assert_eq!(store.len(), written_set.len());
    }

    // A second put on the same key keeps only the second payload and
    // refreshes the timestamp.
    #[test]
    fn prop_last_write_wins(
        url in url_strategy(),
        first in payload_strategy(),
        second in payload_strategy(),
        gap_secs in 0i64..86_399,
    ) {
        let clock = ManualClock::default();
        let mut store = CacheStore::with_clock(TEST_TTL, Arc::new(clock.clone()));

        store.put(url.clone(), Bytes::from(first), "image/jpeg");
        clock.advance(Duration::seconds(gap_secs));
        store.put(url.clone(), Bytes::from(second.clone()), "image/png");

        let entry = store.get(&url).unwrap();
        prop_assert_eq!(&entry.data[..], &second[..]);
        prop_assert_eq!(entry.content_type, "image/png");
        prop_assert_eq!(entry.timestamp, clock.now());
        prop_assert_eq!(store.len(), 1);
    }

    // Freshness depends only on age versus TTL.
    #[test]
    fn prop_expiry_is_age_based(url in url_strategy(), age_secs in 0i64..(3 * 86_400)) {
        let clock = ManualClock::default();
        let mut store = CacheStore::with_clock(TEST_TTL, Arc::new(clock.clone()));

        store.put(url.clone(), Bytes::from_static(b"img"), "image/jpeg");
        clock.advance(Duration::seconds(age_secs));

        let hit = store.get(&url).is_some();
        prop_assert_eq!(hit, age_secs < 86_400);
        // Expired or not, the entry is never purged by a read
        prop_assert!(store.contains(&url));
    }
}

