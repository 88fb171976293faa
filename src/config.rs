//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::time::Duration;

/// Default entry lifetime: 24 hours.
pub const DEFAULT_CACHE_TTL_SECS: u64 = 24 * 60 * 60;

/// Default upstream fetch timeout.
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 20;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Lifetime of a cached image in seconds
    pub cache_ttl: u64,
    /// Upstream fetch timeout in seconds
    pub fetch_timeout: u64,
    /// Share one upstream fetch between concurrent misses for the same URL
    pub coalesce_requests: bool,
    /// User-Agent header sent upstream
    pub user_agent: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_TTL` - Cache entry TTL in seconds (default: 86400)
    /// - `FETCH_TIMEOUT` - Upstream timeout in seconds (default: 20)
    /// - `COALESCE_REQUESTS` - `true`/`1` to de-duplicate in-flight fetches (default: false)
    /// - `USER_AGENT` - User-Agent sent upstream (default: `image-proxy/<version>`)
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_ttl: parse_var("CACHE_TTL").unwrap_or(defaults.cache_ttl),
            fetch_timeout: parse_var("FETCH_TIMEOUT").unwrap_or(defaults.fetch_timeout),
            coalesce_requests: env::var("COALESCE_REQUESTS")
                .ok()
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.coalesce_requests),
            user_agent: env::var("USER_AGENT")
                .ok()
                .filter(|v| !v.trim().is_empty())
                .unwrap_or(defaults.user_agent),
        }
    }

    pub fn cache_ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_ttl: DEFAULT_CACHE_TTL_SECS,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT_SECS,
            coalesce_requests: false,
            user_agent: format!("image-proxy/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}
