//! Image Proxy - A caching image proxy server
//!
//! Fetches remote images on behalf of browsers, bounds each upstream fetch
//! with a timeout, and memoizes the bytes in a process-local TTL cache.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod upstream;

pub use api::AppState;
pub use config::Config;
pub use error::ProxyError;
