//! Request and Response models for the image proxy API
//!
//! Query parameters and JSON bodies for the proxy's HTTP surface.

pub mod requests;
pub mod responses;

// Re-export commonly used types
pub use requests::ProxyQuery;
pub use responses::{HealthResponse, StatsResponse};
