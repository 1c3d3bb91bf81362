//! Lookup handlers for both presentation modes.

use std::sync::Arc;

use axum::extract::rejection::{FormRejection, JsonRejection};
use axum::extract::State;
use axum::response::Response;
use axum::{Form, Json};

use super::super::client_ip::ClientIp;
use super::super::types::AppState;
use crate::error_handling::CheckError;
use crate::validation::AqiRequest;

/// `GET /`: the form page or the JSON usage blurb.
pub async fn index_handler(State(state): State<Arc<AppState>>) -> Response {
    state.renderer.index()
}

/// `POST /` in HTML mode.
pub async fn form_lookup_handler(
    State(state): State<Arc<AppState>>,
    ClientIp(client_ip): ClientIp,
    form: Result<Form<AqiRequest>, FormRejection>,
) -> Response {
    let parsed = form
        .map(|Form(request)| request)
        .map_err(|rejection| CheckError::InvalidBody(rejection.body_text()));
    respond(&state, parsed, &client_ip).await
}

/// `POST /check_aqi` in JSON mode.
pub async fn json_lookup_handler(
    State(state): State<Arc<AppState>>,
    ClientIp(client_ip): ClientIp,
    body: Result<Json<AqiRequest>, JsonRejection>,
) -> Response {
    let parsed = body
        .map(|Json(request)| request)
        .map_err(|rejection| CheckError::InvalidBody(rejection.body_text()));
    respond(&state, parsed, &client_ip).await
}

async fn respond(
    state: &AppState,
    parsed: Result<AqiRequest, CheckError>,
    client_ip: &str,
) -> Response {
    let request = match parsed {
        Ok(request) => request,
        Err(err) => {
            log::info!("Unparseable request body from {client_ip}: {err}");
            state.service.record_error(&err);
            return state.renderer.error(&err, client_ip);
        }
    };

    match state.service.check(&request).await {
        Ok(reading) => {
            log::info!(
                "AQI for {} is {} ({}) [client {client_ip}]",
                reading.city,
                reading
                    .aqi
                    .map(|aqi| aqi.to_string())
                    .unwrap_or_else(|| "-".to_string()),
                reading.category
            );
            state.renderer.success(&reading, client_ip)
        }
        Err(err) => state.renderer.error(&err, client_ip),
    }
}
