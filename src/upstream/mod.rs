//! Upstream Module
//!
//! Time-bounded fetching of remote images, with optional coalescing of
//! concurrent fetches for the same URL.

mod coalesce;
mod fetcher;

use std::sync::Arc;
use std::time::Duration;

use futures::FutureExt;
use tracing::info;

use crate::config::Config;
use crate::error::{ProxyError, Result};

pub use coalesce::Coalescer;
pub use fetcher::{FetchedImage, HttpFetcher, ImageFetcher};

// == Image Proxy ==
/// Fetches upstream images under a timeout.
///
/// The timeout covers both the response headers and the body read. When it
/// elapses the in-flight fetch future is dropped, which aborts the outbound
/// request. The timer belongs to that same future, so it is released on
/// every exit path.
pub struct ImageProxy {
    fetcher: Arc<dyn ImageFetcher>,
    timeout: Duration,
    coalescer: Option<Coalescer>,
}

impl ImageProxy {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, timeout: Duration) -> Self {
        Self {
            fetcher,
            timeout,
            coalescer: None,
        }
    }

    /// Enables sharing one upstream fetch between concurrent misses.
    pub fn with_coalescing(mut self) -> Self {
        self.coalescer = Some(Coalescer::new());
        self
    }

    /// Builds a proxy with an [`HttpFetcher`] configured from `config`.
    pub fn from_config(config: &Config) -> Result<Self> {
        let fetcher = HttpFetcher::new(&config.user_agent)?;
        let proxy = Self::new(Arc::new(fetcher), config.fetch_timeout());

        if config.coalesce_requests {
            info!("In-flight request coalescing enabled");
            Ok(proxy.with_coalescing())
        } else {
            Ok(proxy)
        }
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn is_coalescing(&self) -> bool {
        self.coalescer.is_some()
    }

    // == Fetch ==
    /// Fetches `url`, failing with [`ProxyError::Timeout`] if it takes longer
    /// than the configured timeout.
    pub async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        let fetcher = Arc::clone(&self.fetcher);
        let limit = self.timeout;

        match &self.coalescer {
            Some(coalescer) => {
                let owned = url.to_owned();
                coalescer
                    .run(url, move || fetch_bounded(fetcher, owned, limit).boxed())
                    .await
            }
            None => fetch_bounded(fetcher, url.to_owned(), limit).await,
        }
    }
}

async fn fetch_bounded(
    fetcher: Arc<dyn ImageFetcher>,
    url: String,
    limit: Duration,
) -> Result<FetchedImage> {
    match tokio::time::timeout(limit, fetcher.fetch(&url)).await {
        Ok(result) => result,
        Err(_elapsed) => Err(ProxyError::Timeout(limit)),
    }
}
