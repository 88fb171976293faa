//! Upstream Fetcher
//!
//! The seam between the proxy and the remote image host.

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;

use crate::error::{ProxyError, Result};

/// A successfully fetched upstream image.
#[derive(Debug, Clone, PartialEq)]
pub struct FetchedImage {
    pub data: Bytes,
    /// `Content-Type` as reported by upstream, if any
    pub content_type: Option<String>,
}

// == Image Fetcher ==
/// Retrieves the bytes behind an absolute image URL.
///
/// Implementations return [`ProxyError::UpstreamStatus`] for a non-success
/// status without reading the body, and [`ProxyError::Transport`] for
/// connection or body read failures. Dropping the returned future must
/// abandon the outbound request.
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<FetchedImage>;
}

// == HTTP Fetcher ==
/// `reqwest`-backed fetcher sharing one connection pool across requests.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
}

impl HttpFetcher {
    pub fn new(user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    /// Wraps an already configured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchedImage> {
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProxyError::UpstreamStatus(status));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|h| h.to_str().ok())
            .filter(|ct| !ct.trim().is_empty())
            .map(str::to_owned);

        let data = response.bytes().await?;
        debug!(url, bytes = data.len(), "Fetched upstream image");

        Ok(FetchedImage { data, content_type })
    }
}
