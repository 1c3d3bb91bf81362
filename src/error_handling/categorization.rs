//! Error categorization.
//!
//! This module maps upstream failures onto the `ErrorType` counters.

use super::types::{ErrorType, UpstreamError};

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Timeouts are checked first because a timed-out request can also report
/// `is_request()`.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if error.is_timeout() {
        ErrorType::UpstreamTimeout
    } else if error.is_connect() {
        ErrorType::UpstreamConnectError
    } else if error.is_status() || error.status().is_some() {
        ErrorType::UpstreamStatusError
    } else if error.is_decode() || error.is_body() {
        ErrorType::UpstreamDecodeError
    } else {
        ErrorType::UpstreamOtherError
    }
}

/// Categorizes an `UpstreamError` into an `ErrorType`.
pub fn categorize_upstream_error(error: &UpstreamError) -> ErrorType {
    match error {
        UpstreamError::NotFound { .. } => ErrorType::CityNotFound,
        UpstreamError::Request(e) => categorize_reqwest_error(e),
        UpstreamError::Malformed(_) => ErrorType::UpstreamDecodeError,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use httptest::{matchers::*, responders::*, Expectation, Server};
    use std::time::Duration;

    #[test]
    fn test_categorize_not_found_and_malformed() {
        let not_found = UpstreamError::NotFound {
            message: "Unknown station".into(),
        };
        assert_eq!(categorize_upstream_error(&not_found), ErrorType::CityNotFound);

        let malformed = UpstreamError::Malformed("missing data.aqi".into());
        assert_eq!(
            categorize_upstream_error(&malformed),
            ErrorType::UpstreamDecodeError
        );
    }

    #[tokio::test]
    async fn test_categorize_status_error() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/feed/paris/"))
                .respond_with(status_code(503)),
        );

        let err = reqwest::get(server.url("/feed/paris/").to_string())
            .await
            .expect("request should reach the test server")
            .error_for_status()
            .unwrap_err();
        assert_eq!(categorize_reqwest_error(&err), ErrorType::UpstreamStatusError);
    }

    #[tokio::test]
    async fn test_categorize_timeout() {
        let server = Server::run();
        server.expect(
            Expectation::matching(request::method_path("GET", "/slow")).respond_with(
                delay_and_then(Duration::from_secs(2), status_code(200)),
            ),
        );

        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(100))
            .build()
            .unwrap();
        let err = client
            .get(server.url("/slow").to_string())
            .send()
            .await
            .unwrap_err();
        assert_eq!(categorize_reqwest_error(&err), ErrorType::UpstreamTimeout);
    }

    #[tokio::test]
    async fn test_categorize_connect_error() {
        // Bind then drop a listener to get a port nothing is listening on
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let err = reqwest::get(format!("http://127.0.0.1:{port}/"))
            .await
            .unwrap_err();
        assert_eq!(
            categorize_reqwest_error(&err),
            ErrorType::UpstreamConnectError
        );
    }
}
