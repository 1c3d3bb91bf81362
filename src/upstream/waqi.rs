//! WAQI feed API client.
//!
//! One GET per lookup to `{base}/feed/{city}/?token={key}`. No retries and no
//! caching: every inbound request produces exactly one upstream request.

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::AqiProvider;
use crate::classify::aqi_from_value;
use crate::config::UPSTREAM_STATUS_OK;
use crate::error_handling::{InitializationError, UpstreamError};

/// Top-level feed response.
///
/// On success `data` is an object carrying `aqi`; on failure it is usually a
/// message string such as `"Unknown station"`.
#[derive(Debug, Deserialize)]
pub struct FeedResponse {
    pub status: String,
    #[serde(default)]
    pub data: Value,
}

/// The part of a successful feed's `data` object we use.
#[derive(Debug, Deserialize)]
pub struct FeedData {
    pub aqi: Value,
}

impl FeedResponse {
    /// Interprets the response: the AQI on "ok", an error otherwise.
    pub fn into_aqi(self) -> Result<Option<i64>, UpstreamError> {
        if self.status != UPSTREAM_STATUS_OK {
            let message = match self.data {
                Value::String(message) => message,
                _ => self.status,
            };
            return Err(UpstreamError::NotFound { message });
        }

        let data: FeedData = serde_json::from_value(self.data)
            .map_err(|e| UpstreamError::Malformed(format!("missing data.aqi: {e}")))?;
        Ok(aqi_from_value(&data.aqi))
    }
}

/// `AqiProvider` backed by the WAQI feed API.
#[derive(Debug, Clone)]
pub struct WaqiClient {
    client: Arc<reqwest::Client>,
    base_url: Url,
}

impl WaqiClient {
    /// Creates a client for the provider at `base_url`.
    ///
    /// The timeout is a property of `client`; see `initialization::init_client`.
    ///
    /// # Errors
    ///
    /// Returns `InitializationError::InvalidBaseUrl` if `base_url` is not an
    /// absolute http(s) URL.
    pub fn new(client: Arc<reqwest::Client>, base_url: &str) -> Result<Self, InitializationError> {
        let invalid = |reason: String| InitializationError::InvalidBaseUrl {
            url: base_url.to_string(),
            reason,
        };
        let parsed = Url::parse(base_url).map_err(|e| invalid(e.to_string()))?;
        match parsed.scheme() {
            "http" | "https" => {}
            scheme => return Err(invalid(format!("unsupported scheme '{scheme}'"))),
        }
        if parsed.cannot_be_a_base() {
            return Err(invalid("URL cannot be a base".to_string()));
        }
        Ok(Self {
            client,
            base_url: parsed,
        })
    }

    /// Builds `{base}/feed/{city}/`. The city is percent-encoded as one path segment.
    pub fn feed_url(&self, city: &str) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push("feed").push(city).push("");
        }
        url
    }
}

#[async_trait]
impl AqiProvider for WaqiClient {
    async fn fetch_aqi(&self, city: &str, api_key: &str) -> Result<Option<i64>, UpstreamError> {
        let url = self.feed_url(city);
        // The token goes in the query string; log the URL before it is added
        debug!("Fetching AQI from {url}");

        let feed: FeedResponse = self
            .client
            .get(url)
            .query(&[("token", api_key)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        debug!("Upstream status for {city}: {}", feed.status);
        feed.into_aqi()
    }
}
