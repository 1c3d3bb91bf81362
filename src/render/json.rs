//! JSON API responses.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use super::ResponseRenderer;
use crate::classify::AqiCategory;
use crate::error_handling::CheckError;
use crate::service::AqiReading;

const USAGE: &str = "POST /check_aqi with JSON { city, email, website: '' }";

#[derive(Serialize)]
struct IndexBody {
    status: &'static str,
    usage: &'static str,
}

#[derive(Serialize)]
struct SuccessBody<'a> {
    status: &'static str,
    city: &'a str,
    /// `null` when the provider had no numeric value
    aqi: Option<i64>,
    label: &'static str,
    /// Empty for an unknown reading
    severity: &'static str,
}

#[derive(Serialize)]
struct ErrorBody {
    status: &'static str,
    error: String,
    code: &'static str,
}

/// `{"status": "success" | "error", ...}` bodies.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl ResponseRenderer for JsonRenderer {
    fn index(&self) -> Response {
        Json(IndexBody {
            status: "running",
            usage: USAGE,
        })
        .into_response()
    }

    fn success(&self, reading: &AqiReading, _client_ip: &str) -> Response {
        Json(SuccessBody {
            status: "success",
            city: &reading.city,
            aqi: reading.aqi,
            label: reading.category.label(),
            severity: reading.category.severity_class(),
        })
        .into_response()
    }

    fn error(&self, err: &CheckError, _client_ip: &str) -> Response {
        let body = ErrorBody {
            status: "error",
            error: err.to_string(),
            code: err.code(),
        };
        (err.status_code(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    async fn json_of(response: Response) -> (StatusCode, Value) {
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_index_usage() {
        let (status, body) = json_of(JsonRenderer.index()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert!(body["usage"].as_str().unwrap().contains("/check_aqi"));
    }

    #[tokio::test]
    async fn test_success_body() {
        let reading = AqiReading {
            city: "Delhi".into(),
            aqi: Some(180),
            category: AqiCategory::Poor,
        };
        let (status, body) = json_of(JsonRenderer.success(&reading, "127.0.0.1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "status": "success",
                "city": "Delhi",
                "aqi": 180,
                "label": "Poor",
                "severity": "poor",
            })
        );
    }

    #[tokio::test]
    async fn test_unknown_reading_has_null_aqi() {
        let reading = AqiReading {
            city: "Nowhere".into(),
            aqi: None,
            category: AqiCategory::Unknown,
        };
        let (_, body) = json_of(JsonRenderer.success(&reading, "127.0.0.1")).await;
        assert!(body["aqi"].is_null());
        assert_eq!(body["label"], "Unknown");
        assert_eq!(body["severity"], "");
    }

    #[tokio::test]
    async fn test_error_body_and_status() {
        let (status, body) =
            json_of(JsonRenderer.error(&CheckError::DuplicateEmail, "127.0.0.1")).await;
        assert_eq!(status, StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(body["status"], "error");
        assert_eq!(body["error"], "Too many requests from this email");
        assert_eq!(body["code"], CheckError::DuplicateEmail.code());
    }
}
