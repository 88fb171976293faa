//! In-flight Request Coalescing
//!
//! Concurrent cache misses for the same URL join a single upstream fetch
//! instead of each issuing their own. The first caller owns the flight; later
//! callers await a clone of the same shared future.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt, Shared};
use tracing::debug;

use crate::error::Result;
use crate::upstream::FetchedImage;

type SharedFetch = Shared<BoxFuture<'static, Result<FetchedImage>>>;

#[derive(Default)]
struct Flights {
    next_id: AtomicU64,
    by_url: Mutex<HashMap<String, (u64, SharedFetch)>>,
}

// == Coalescer ==
#[derive(Clone, Default)]
pub struct Coalescer {
    flights: Arc<Flights>,
}

impl Coalescer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `start()` for `url` unless a fetch for it is already in flight,
    /// in which case the existing one is awaited.
    pub async fn run<F>(&self, url: &str, start: F) -> Result<FetchedImage>
    where
        F: FnOnce() -> BoxFuture<'static, Result<FetchedImage>>,
    {
        let (id, flight) = self.join(url, start);
        let _guard = FlightGuard {
            flights: &self.flights,
            url,
            id,
        };
        flight.await
    }

    /// Number of distinct URLs with a fetch in progress.
    pub fn in_flight(&self) -> usize {
        self.flights.lock().len()
    }

    fn join<F>(&self, url: &str, start: F) -> (u64, SharedFetch)
    where
        F: FnOnce() -> BoxFuture<'static, Result<FetchedImage>>,
    {
        let mut by_url = self.flights.lock();

        if let Some((id, flight)) = by_url.get(url) {
            debug!(url, "Joining in-flight upstream fetch");
            return (*id, flight.clone());
        }

        let id = self.flights.next_id.fetch_add(1, Ordering::Relaxed);
        let flight = start().shared();
        by_url.insert(url.to_owned(), (id, flight.clone()));
        (id, flight)
    }
}

impl Flights {
    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, (u64, SharedFetch)>> {
        self.by_url.lock().unwrap_or_else(|e| e.into_inner())
    }
}

/// Clears the flight once any waiter finishes or gives up, so the next miss
/// starts a fresh fetch rather than replaying a settled result.
struct FlightGuard<'a> {
    flights: &'a Flights,
    url: &'a str,
    id: u64,
}

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        let mut by_url = self.flights.lock();
        if matches!(by_url.get(self.url), Some((id, _)) if *id == self.id) {
            by_url.remove(self.url);
        }
    }
}
