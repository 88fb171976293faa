//! Error types for the image proxy
//!
//! Provides unified error handling using thiserror.

use std::time::Duration;

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use thiserror::Error;

// == Response Bodies ==
pub const MISSING_URL_BODY: &str = "Missing URL parameter";
pub const UPSTREAM_FAILED_BODY: &str = "Failed to fetch image";
pub const FETCH_ERROR_BODY: &str = "Error fetching image";

// == Proxy Error Enum ==
/// Unified error type for the image proxy.
///
/// `Clone` so a single coalesced upstream result can be handed to every waiter.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProxyError {
    /// The `url` query parameter was absent or empty
    #[error("missing url query parameter")]
    MissingUrl,

    /// Upstream answered with a non-success status
    #[error("upstream responded with status {0}")]
    UpstreamStatus(StatusCode),

    /// Upstream did not answer within the configured timeout
    #[error("upstream fetch timed out after {0:?}")]
    Timeout(Duration),

    /// Connection, TLS, or body read failure
    #[error("transport error: {0}")]
    Transport(String),
}

impl ProxyError {
    /// HTTP status this error is reported with.
    pub fn status(&self) -> StatusCode {
        match self {
            ProxyError::MissingUrl => StatusCode::BAD_REQUEST,
            ProxyError::UpstreamStatus(status) => *status,
            ProxyError::Timeout(_) | ProxyError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    /// Fixed plain-text body. Never carries the underlying error text.
    pub fn body(&self) -> &'static str {
        match self {
            ProxyError::MissingUrl => MISSING_URL_BODY,
            ProxyError::UpstreamStatus(_) => UPSTREAM_FAILED_BODY,
            ProxyError::Timeout(_) | ProxyError::Transport(_) => FETCH_ERROR_BODY,
        }
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(error: reqwest::Error) -> Self {
        ProxyError::Transport(error.to_string())
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        (
            self.status(),
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            self.body(),
        )
            .into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the image proxy.
pub type Result<T> = std::result::Result<T, ProxyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_url_maps_to_bad_request() {
        let err = ProxyError::MissingUrl;
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert_eq!(err.body(), "Missing URL parameter");
    }

    #[test]
    fn test_upstream_status_is_propagated() {
        let err = ProxyError::UpstreamStatus(StatusCode::NOT_FOUND);
        assert_eq!(err.status(), StatusCode::NOT_FOUND);
        assert_eq!(err.body(), "Failed to fetch image");
    }

    #[test]
    fn test_transport_details_are_hidden() {
        let err = ProxyError::Transport("dns error: no such host".to_string());
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body(), "Error fetching image");
        assert!(err.to_string().contains("no such host"));
    }

    #[test]
    fn test_timeout_maps_to_internal_error() {
        let err = ProxyError::Timeout(Duration::from_secs(20));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.body(), "Error fetching image");
    }

    #[tokio::test]
    async fn test_into_response_is_plain_text() {
        let response = ProxyError::MissingUrl.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );

        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"Missing URL parameter");
    }
}
