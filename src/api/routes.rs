//! API Routes
//!
//! Configures the Axum router with the image proxy endpoints.

use axum::{http::Method, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{health_handler, proxy_handler, stats_handler, AppState};

/// Path the browser requests proxied images from.
pub const IMAGE_PROXY_PATH: &str = "/api/image-proxy";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/image-proxy?url=...` - Proxy and cache a remote image
/// - `GET /stats` - Get cache statistics
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows GET from any origin so `<img>` and canvas loads work cross-site
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
        .allow_headers(Any);

    Router::new()
        .route(IMAGE_PROXY_PATH, get(proxy_handler))
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
