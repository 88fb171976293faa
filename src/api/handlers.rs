//! API Handlers
//!
//! HTTP request handlers for the image proxy endpoints.

use std::sync::Arc;
use tokio::sync::RwLock;

use axum::{
    body::Body,
    extract::{RawQuery, State},
    http::{
        header::{CACHE_CONTROL, CONTENT_TYPE},
        HeaderName, HeaderValue,
    },
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use tracing::{debug, error, warn};

use crate::cache::{CacheStore, DEFAULT_CONTENT_TYPE};
use crate::config::Config;
use crate::error::{ProxyError, Result};
use crate::models::{HealthResponse, ProxyQuery, StatsResponse};
use crate::upstream::ImageProxy;

/// Cache-Control for responses served from the in-process cache.
pub const HIT_CACHE_CONTROL: &str = "public, max-age=86400";

/// Cache-Control for freshly fetched images.
pub const FRESH_CACHE_CONTROL: &str =
    "public, max-age=86400, s-maxage=86400, stale-while-revalidate=604800";

pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");

/// Application state shared across all handlers.
///
/// The cache lock is only held for a single `get` or `put`, never across an
/// upstream fetch, so concurrent misses for one URL may each fetch and write.
#[derive(Clone)]
pub struct AppState {
    /// Process-local image cache
    pub cache: Arc<RwLock<CacheStore>>,
    /// Upstream fetcher with timeout
    pub proxy: Arc<ImageProxy>,
}

impl AppState {
    /// Creates a new AppState with the given cache store and proxy.
    pub fn new(cache: CacheStore, proxy: ImageProxy) -> Self {
        Self {
            cache: Arc::new(RwLock::new(cache)),
            proxy: Arc::new(proxy),
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        let cache = CacheStore::new(config.cache_ttl());
        let proxy = ImageProxy::from_config(config)?;
        Ok(Self::new(cache, proxy))
    }
}

/// Handler for GET /api/image-proxy?url=...
///
/// Serves the image from the cache when fresh, otherwise fetches it upstream,
/// caches it, and returns it with long-lived downstream caching headers.
pub async fn proxy_handler(
    State(state): State<AppState>,
    RawQuery(raw): RawQuery,
) -> Result<Response> {
    let query = ProxyQuery::from_raw(raw.as_deref());
    let url = query.target().ok_or(ProxyError::MissingUrl)?;

    // Write lock: a lookup updates hit/miss stats
    let cached = state.cache.write().await.get(url);
    if let Some(entry) = cached {
        debug!(url, "Image cache hit");
        return Ok(image_response(
            entry.data,
            entry.content_type,
            HIT_CACHE_CONTROL,
            true,
        ));
    }

    debug!(url, "Image cache miss, fetching upstream");
    let image = match state.proxy.fetch(url).await {
        Ok(image) => image,
        Err(err @ ProxyError::UpstreamStatus(_)) => {
            warn!(url, error = %err, "Upstream rejected image request");
            return Err(err);
        }
        Err(err) => {
            // Full cause goes to the log only; the caller gets a fixed body
            error!(url, error = %err, "Image proxy error");
            return Err(err);
        }
    };

    let content_type = image
        .content_type
        .unwrap_or_else(|| DEFAULT_CONTENT_TYPE.to_string());

    state
        .cache
        .write()
        .await
        .put(url, image.data.clone(), content_type.clone());

    Ok(image_response(
        image.data,
        content_type,
        FRESH_CACHE_CONTROL,
        false,
    ))
}

fn image_response(
    data: Bytes,
    content_type: String,
    cache_control: &'static str,
    hit: bool,
) -> Response {
    let mut response = ([(CONTENT_TYPE, content_type)], Body::from(data)).into_response();

    let headers = response.headers_mut();
    headers.insert(CACHE_CONTROL, HeaderValue::from_static(cache_control));
    if hit {
        headers.insert(X_CACHE, HeaderValue::from_static("HIT"));
    }
    response
}

/// Handler for GET /stats
///
/// Returns current cache statistics.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::from(cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
