//! Upstream AQI provider.
//!
//! The service talks to the provider only through `AqiProvider`, so tests (and
//! alternative providers) can stand in for the real WAQI client.

mod waqi;

use async_trait::async_trait;

use crate::error_handling::UpstreamError;

pub use waqi::{FeedData, FeedResponse, WaqiClient};

/// Looks up the current AQI for a city.
#[async_trait]
pub trait AqiProvider: Send + Sync {
    /// Fetches the current AQI for `city`, authenticating with `api_key`.
    ///
    /// Returns `Ok(None)` when the provider knows the city but reports a
    /// non-numeric value (no current data).
    ///
    /// # Errors
    ///
    /// - `UpstreamError::NotFound` when the provider answers with a non-"ok" status
    /// - `UpstreamError::Request` on network, timeout or HTTP status failures
    /// - `UpstreamError::Malformed` when an "ok" body cannot be interpreted
    async fn fetch_aqi(&self, city: &str, api_key: &str) -> Result<Option<i64>, UpstreamError>;
}
