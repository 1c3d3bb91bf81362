//! Tests for the `/status` and `/metrics` endpoints.

mod helpers;

use reqwest::StatusCode;
use serde_json::{json, Value};
use wiremock::MockServer;

use aqi_checker::ResponseMode;
use helpers::{mock_feed, ok_feed, spawn_server, test_config};

async fn lookup(url: &str, body: Value) -> StatusCode {
    reqwest::Client::new()
        .post(url)
        .json(&body)
        .send()
        .await
        .unwrap()
        .status()
}

#[tokio::test]
async fn test_status_counts_outcomes() {
    let upstream = MockServer::start().await;
    mock_feed(&upstream, "delhi", ok_feed(json!(75)), 1).await;
    let server = spawn_server(test_config(&upstream, ResponseMode::Json, true)).await;
    let check = server.url("/check_aqi");

    assert_eq!(
        lookup(&check, json!({"city": "delhi", "email": "a@b.com"})).await,
        StatusCode::OK
    );
    assert_eq!(
        lookup(&check, json!({"city": "delhi", "email": "a@b.com"})).await,
        StatusCode::TOO_MANY_REQUESTS
    );
    assert_eq!(
        lookup(&check, json!({"city": "delhi", "email": "c@d.com", "website": "x"})).await,
        StatusCode::FORBIDDEN
    );

    let status: Value = reqwest::get(server.url("/status"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(status["mode"], "json");
    assert_eq!(status["api_key_configured"], true);
    assert_eq!(status["require_email"], true);
    assert_eq!(status["seen_emails"], 1);
    assert_eq!(status["errors"]["total"], 2);
    assert_eq!(status["errors"]["duplicate_email"], 1);
    assert_eq!(status["errors"]["bot_detected"], 1);
    assert_eq!(status["errors"]["city_not_found"], 0);
    assert_eq!(status["info"]["successful_lookup"], 1);
    assert!(status["uptime_seconds"].as_f64().unwrap() >= 0.0);
}

#[tokio::test]
async fn test_metrics_prometheus_text() {
    let upstream = MockServer::start().await;
    let server = spawn_server(test_config(&upstream, ResponseMode::Html, false)).await;

    let response = reqwest::Client::new()
        .post(server.url("/"))
        .form(&[("city", "")])
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = reqwest::get(server.url("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let text = response.text().await.unwrap();
    assert!(text.contains("# TYPE aqi_checker_errors_total counter"));
    assert!(text.contains("aqi_checker_errors_total 1"));
    assert!(text.contains(r#"aqi_checker_errors{type="missing_fields"} 1"#));
    assert!(text.contains(r#"aqi_checker_errors{type="upstream_timeout"} 0"#));
    assert!(text.contains("aqi_checker_api_key_configured 1"));
    assert!(text.contains("aqi_checker_seen_emails 0"));
}
