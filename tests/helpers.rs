// Shared test helpers for starting the server against a mocked upstream.
//
// Each test gets its own wiremock server standing in for the WAQI feed API and its
// own aqi_checker instance bound to an ephemeral port.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aqi_checker::{build_state, serve, AppState, Config, ResponseMode};

pub const TEST_TOKEN: &str = "test-token";

/// A running server; stops when dropped.
pub struct TestServer {
    pub base_url: String,
    pub state: Arc<AppState>,
    shutdown: CancellationToken,
}

impl TestServer {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

/// Config pointing at `upstream`, with an API key set.
#[allow(dead_code)] // Used by other test files
pub fn test_config(upstream: &MockServer, mode: ResponseMode, require_email: bool) -> Config {
    Config {
        api_key: Some(TEST_TOKEN.to_string()),
        host: "127.0.0.1".to_string(),
        port: 0,
        mode,
        require_email,
        api_base_url: upstream.uri(),
        ..Default::default()
    }
}

/// Starts the server for `config` on an ephemeral port.
pub async fn spawn_server(config: Config) -> TestServer {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read test address");
    let state = build_state(&config).expect("Failed to build server state");
    let shutdown = CancellationToken::new();
    tokio::spawn(serve(listener, Arc::clone(&state), shutdown.clone()));
    TestServer {
        base_url: format!("http://{}", addr),
        state,
        shutdown,
    }
}

/// Feed body for a station reporting `aqi`.
#[allow(dead_code)] // Used by other test files
pub fn ok_feed(aqi: Value) -> Value {
    json!({
        "status": "ok",
        "data": { "aqi": aqi, "idx": 1451, "city": { "name": "Test Station" } }
    })
}

/// Mounts a feed answer for `city`, expected to be requested exactly `times` times.
#[allow(dead_code)] // Used by other test files
pub async fn mock_feed(upstream: &MockServer, city: &str, body: Value, times: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/feed/{}/", city)))
        .and(query_param("token", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(times)
        .mount(upstream)
        .await;
}

/// Fails the test (when `upstream` is dropped) if any request reaches it.
#[allow(dead_code)] // Used by other test files
pub async fn expect_no_upstream_calls(upstream: &MockServer) {
    Mock::given(wiremock::matchers::any())
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_feed(json!(10))))
        .expect(0)
        .mount(upstream)
        .await;
}
