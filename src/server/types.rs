//! Server state and monitoring response types.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Instant;

use serde::Serialize;

use crate::config::ResponseMode;
use crate::render::ResponseRenderer;
use crate::service::AqiService;

/// Shared state for every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: Arc<AqiService>,
    pub renderer: Arc<dyn ResponseRenderer>,
    pub mode: ResponseMode,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(
        service: Arc<AqiService>,
        renderer: Arc<dyn ResponseRenderer>,
        mode: ResponseMode,
    ) -> Self {
        Self {
            service,
            renderer,
            mode,
            start_time: Instant::now(),
        }
    }
}

/// JSON response for `/status`
#[derive(Serialize)]
pub struct StatusResponse {
    pub mode: ResponseMode,
    pub uptime_seconds: f64,
    pub api_key_configured: bool,
    pub require_email: bool,
    pub seen_emails: usize,
    pub errors: ErrorCounts,
    pub info: InfoCounts,
}

#[derive(Serialize)]
pub struct ErrorCounts {
    pub total: usize,
    /// Keyed by `ErrorType::metric_name`
    #[serde(flatten)]
    pub by_type: BTreeMap<&'static str, usize>,
}

#[derive(Serialize)]
pub struct InfoCounts {
    pub total: usize,
    /// Keyed by `InfoType::metric_name`
    #[serde(flatten)]
    pub by_type: BTreeMap<&'static str, usize>,
}
