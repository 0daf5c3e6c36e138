//! HTTP client initialization.

use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the HTTP client shared by every step of a run.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Per-request timeout from the config
/// - A TCP connect timeout capped at `TCP_CONNECT_TIMEOUT_SECS`
/// - Default redirect following
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<reqwest::Client, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let connect_timeout = timeout.min(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS));
    ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(connect_timeout)
        .user_agent(config.user_agent.clone())
        .build()
}
