//! HTTP client initialization.
//!
//! This module builds the `reqwest::Client` used for upstream AQI lookups.

use std::sync::Arc;
use std::time::Duration;

use reqwest::ClientBuilder;

use crate::config::{Config, TCP_CONNECT_TIMEOUT_SECS};

/// Initializes the upstream HTTP client.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from the config
/// - Total request timeout from the config (10 seconds by default)
/// - A shorter TCP connect timeout so an unreachable provider fails fast
/// - Rustls TLS backend (no native TLS)
///
/// # Errors
///
/// Returns a `reqwest::Error` if client creation fails.
pub fn init_client(config: &Config) -> Result<Arc<reqwest::Client>, reqwest::Error> {
    let timeout = Duration::from_secs(config.timeout_seconds);
    let client = ClientBuilder::new()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS).min(timeout))
        .user_agent(config.user_agent.clone())
        .build()?;
    Ok(Arc::new(client))
}
