//! Prometheus metrics handler.

use std::fmt::Write;
use std::sync::Arc;

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use strum::IntoEnumIterator;

use super::super::types::AppState;
use crate::error_handling::{ErrorType, InfoType};

const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4";

/// Prometheus-compatible metrics endpoint
pub async fn metrics_handler(State(state): State<Arc<AppState>>) -> Response {
    let service = &state.service;
    let stats = service.stats();

    let mut metrics = format!(
        r#"# HELP aqi_checker_uptime_seconds Seconds since the server started
# TYPE aqi_checker_uptime_seconds gauge
aqi_checker_uptime_seconds {}

# HELP aqi_checker_seen_emails Email addresses currently remembered
# TYPE aqi_checker_seen_emails gauge
aqi_checker_seen_emails {}

# HELP aqi_checker_api_key_configured Whether an upstream API key is set (1) or not (0)
# TYPE aqi_checker_api_key_configured gauge
aqi_checker_api_key_configured {}

# HELP aqi_checker_errors_total Total number of rejected or failed lookups
# TYPE aqi_checker_errors_total counter
aqi_checker_errors_total {}

# HELP aqi_checker_info_total Total number of info events
# TYPE aqi_checker_info_total counter
aqi_checker_info_total {}
"#,
        state.start_time.elapsed().as_secs_f64(),
        service.seen_emails().len(),
        u8::from(service.has_api_key()),
        stats.total_errors(),
        stats.total_info(),
    );

    // Writing to a String cannot fail
    metrics.push_str(
        "\n# HELP aqi_checker_errors Rejected or failed lookups by cause\n# TYPE aqi_checker_errors counter\n",
    );
    for error_type in ErrorType::iter() {
        let _ = writeln!(
            metrics,
            "aqi_checker_errors{{type=\"{}\"}} {}",
            error_type.metric_name(),
            stats.get_error_count(error_type)
        );
    }
    metrics.push_str(
        "\n# HELP aqi_checker_info Informational events by kind\n# TYPE aqi_checker_info counter\n",
    );
    for info_type in InfoType::iter() {
        let _ = writeln!(
            metrics,
            "aqi_checker_info{{type=\"{}\"}} {}",
            info_type.metric_name(),
            stats.get_info_count(info_type)
        );
    }

    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)],
        metrics,
    )
        .into_response()
}
