//! API Module
//!
//! HTTP handlers and routing for the image proxy.
//!
//! # Endpoints
//! - `GET /api/image-proxy?url=...` - Proxy and cache a remote image
//! - `GET /stats` - Get cache statistics
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_router, IMAGE_PROXY_PATH};
