//! JSON status handler.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use strum::IntoEnumIterator;

use super::super::types::{AppState, ErrorCounts, InfoCounts, StatusResponse};
use crate::error_handling::{ErrorType, InfoType};

/// JSON status endpoint with uptime and per-category counters
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Response {
    let service = &state.service;
    let stats = service.stats();

    let errors: BTreeMap<_, _> = ErrorType::iter()
        .map(|error_type| (error_type.metric_name(), stats.get_error_count(error_type)))
        .collect();
    let info: BTreeMap<_, _> = InfoType::iter()
        .map(|info_type| (info_type.metric_name(), stats.get_info_count(info_type)))
        .collect();

    let response = StatusResponse {
        mode: state.mode,
        uptime_seconds: state.start_time.elapsed().as_secs_f64(),
        api_key_configured: service.has_api_key(),
        require_email: service.require_email(),
        seen_emails: service.seen_emails().len(),
        errors: ErrorCounts {
            total: stats.total_errors(),
            by_type: errors,
        },
        info: InfoCounts {
            total: stats.total_info(),
            by_type: info,
        },
    };

    (StatusCode::OK, Json(response)).into_response()
}
