//! The lookup pipeline shared by every presentation mode.
//!
//! validate → check configuration → one upstream call → classify.

use std::sync::Arc;

use log::{info, warn};
use serde::Serialize;

use crate::classify::{classify_value, AqiCategory};
use crate::config::Config;
use crate::error_handling::{CheckError, InfoType, ProcessingStats, UpstreamError};
use crate::store::SeenEmailStore;
use crate::upstream::AqiProvider;
use crate::validation::{validate_request, AqiRequest};

/// A classified reading for one city.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AqiReading {
    pub city: String,
    /// `None` when the provider had no numeric value
    pub aqi: Option<i64>,
    pub category: AqiCategory,
}

/// Runs lookups. Holds the injected configuration, seen-email store and provider.
pub struct AqiService {
    api_key: Option<String>,
    require_email: bool,
    seen: Arc<dyn SeenEmailStore>,
    provider: Arc<dyn AqiProvider>,
    stats: Arc<ProcessingStats>,
}

impl AqiService {
    pub fn new(
        config: &Config,
        seen: Arc<dyn SeenEmailStore>,
        provider: Arc<dyn AqiProvider>,
    ) -> Self {
        Self {
            api_key: config.api_key.clone(),
            require_email: config.require_email,
            seen,
            provider,
            stats: Arc::new(ProcessingStats::new()),
        }
    }

    pub fn stats(&self) -> &Arc<ProcessingStats> {
        &self.stats
    }

    pub fn seen_emails(&self) -> &dyn SeenEmailStore {
        self.seen.as_ref()
    }

    pub fn require_email(&self) -> bool {
        self.require_email
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Counts an error raised outside `check`, e.g. an unparseable body.
    pub fn record_error(&self, err: &CheckError) {
        self.stats.increment_error(err.error_type());
    }

    /// Validates `request`, looks up its city and classifies the result.
    ///
    /// The provider is called at most once, and only after validation passed and
    /// an API key is configured.
    ///
    /// # Errors
    ///
    /// Any `CheckError`; see `validation::validate_request` for the order in which
    /// input rules apply.
    pub async fn check(&self, request: &AqiRequest) -> Result<AqiReading, CheckError> {
        let result = self.run(request).await;
        match &result {
            Ok(reading) => {
                self.stats.increment_info(InfoType::SuccessfulLookup);
                if reading.category == AqiCategory::Unknown {
                    self.stats.increment_info(InfoType::UnknownReading);
                }
            }
            Err(err) => self.record_error(err),
        }
        result
    }

    async fn run(&self, request: &AqiRequest) -> Result<AqiReading, CheckError> {
        let validated = validate_request(request, self.require_email, self.seen.as_ref())
            .inspect_err(|err| info!("Rejected lookup: {err}"))?;

        if let Some(email) = &validated.email {
            info!("Accepted email {email} for {}", validated.city);
        }

        let Some(api_key) = self.api_key.as_deref() else {
            warn!("Lookup for {} refused: API key not set", validated.city);
            return Err(CheckError::ApiKeyMissing);
        };

        let aqi = match self.provider.fetch_aqi(&validated.city, api_key).await {
            Ok(aqi) => aqi,
            Err(UpstreamError::NotFound { message }) => {
                info!("Provider has no data for {}: {message}", validated.city);
                return Err(CheckError::CityNotFound {
                    city: validated.city,
                    message,
                });
            }
            Err(err) => {
                warn!("AQI lookup for {} failed: {err}", validated.city);
                return Err(CheckError::Upstream(err));
            }
        };

        Ok(AqiReading {
            category: classify_value(aqi),
            city: validated.city,
            aqi,
        })
    }
}
