//! Error type definitions.
//!
//! This module defines the request-level error taxonomy, upstream and initialization
//! errors, and the counter categories used by `ProcessingStats`.

use axum::http::StatusCode;
use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing the HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),

    /// The configured upstream base URL cannot be parsed.
    #[error("Invalid upstream base URL '{url}': {reason}")]
    InvalidBaseUrl { url: String, reason: String },
}

/// Errors returned by an `AqiProvider`.
#[derive(Error, Debug)]
pub enum UpstreamError {
    /// The provider answered but with a status other than `"ok"`.
    ///
    /// WAQI answers `{"status":"error","data":"Unknown station"}` for cities it
    /// does not know, so this is what an unknown city looks like.
    #[error("City not found or provider error: {message}")]
    NotFound { message: String },

    /// Transport-level failure: connect, timeout, non-2xx status, body read.
    #[error("Upstream request failed: {0}")]
    Request(#[from] ReqwestError),

    /// The provider answered `"ok"` with a body we could not interpret.
    #[error("Malformed upstream response: {0}")]
    Malformed(String),
}

impl UpstreamError {
    /// Returns `true` if the failure was a timeout.
    pub fn is_timeout(&self) -> bool {
        matches!(self, UpstreamError::Request(e) if e.is_timeout())
    }
}

/// Everything that can stop a lookup request from producing a reading.
///
/// Each variant maps to one HTTP status. Client mistakes (400/403/404) are separate
/// from "try again later" conditions (429, 5xx); see [`CheckError::is_retryable`].
#[derive(Error, Debug)]
pub enum CheckError {
    /// The honeypot field was filled in.
    #[error("Bot detected")]
    BotDetected,

    /// City (or a required email) is absent or blank.
    #[error("{0}")]
    MissingFields(&'static str),

    /// The email does not look like `local@domain.tld`.
    #[error("Invalid email")]
    InvalidEmail,

    /// The body could not be parsed as JSON / form data.
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// This email has already been used.
    #[error("Too many requests from this email")]
    DuplicateEmail,

    /// The service was started without an upstream token.
    #[error("API key not set")]
    ApiKeyMissing,

    /// The provider does not know the city.
    #[error("City not found")]
    CityNotFound { city: String, message: String },

    /// Network, timeout or decoding failure talking to the provider.
    #[error("Could not reach the AQI provider, please try again later")]
    Upstream(#[source] UpstreamError),
}

impl CheckError {
    /// HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            CheckError::BotDetected => StatusCode::FORBIDDEN,
            CheckError::MissingFields(_) | CheckError::InvalidEmail | CheckError::InvalidBody(_) => {
                StatusCode::BAD_REQUEST
            }
            CheckError::DuplicateEmail => StatusCode::TOO_MANY_REQUESTS,
            CheckError::ApiKeyMissing => StatusCode::INTERNAL_SERVER_ERROR,
            CheckError::CityNotFound { .. } => StatusCode::NOT_FOUND,
            CheckError::Upstream(e) if e.is_timeout() => StatusCode::GATEWAY_TIMEOUT,
            CheckError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    /// Machine-readable error code for JSON clients.
    pub fn code(&self) -> &'static str {
        match self {
            CheckError::BotDetected => "bot_detected",
            CheckError::MissingFields(_) => "missing_fields",
            CheckError::InvalidEmail => "invalid_email",
            CheckError::InvalidBody(_) => "invalid_body",
            CheckError::DuplicateEmail => "duplicate_email",
            CheckError::ApiKeyMissing => "api_key_missing",
            CheckError::CityNotFound { .. } => "city_not_found",
            CheckError::Upstream(_) => "upstream_failure",
        }
    }

    /// Whether the same request may succeed later without being changed.
    pub fn is_retryable(&self) -> bool {
        let status = self.status_code();
        status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error()
    }

    /// Counter category for this error.
    pub fn error_type(&self) -> ErrorType {
        match self {
            CheckError::BotDetected => ErrorType::BotDetected,
            CheckError::MissingFields(_) => ErrorType::MissingFields,
            CheckError::InvalidEmail => ErrorType::InvalidEmail,
            CheckError::InvalidBody(_) => ErrorType::InvalidBody,
            CheckError::DuplicateEmail => ErrorType::DuplicateEmail,
            CheckError::ApiKeyMissing => ErrorType::ApiKeyMissing,
            CheckError::CityNotFound { .. } => ErrorType::CityNotFound,
            CheckError::Upstream(e) => super::categorize_upstream_error(e),
        }
    }
}

/// Types of errors counted by `ProcessingStats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // Validation
    BotDetected,
    MissingFields,
    InvalidEmail,
    InvalidBody,
    // Rate limiting
    DuplicateEmail,
    // Configuration
    ApiKeyMissing,
    // Upstream
    CityNotFound,
    UpstreamTimeout,
    UpstreamConnectError,
    UpstreamStatusError,
    UpstreamDecodeError,
    UpstreamOtherError,
}

/// Informational events counted by `ProcessingStats`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum InfoType {
    /// A lookup produced a reading
    SuccessfulLookup,
    /// The provider returned a non-numeric AQI
    UnknownReading,
}

impl std::fmt::Display for ErrorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::fmt::Display for InfoType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::BotDetected => "Bot detected",
            ErrorType::MissingFields => "Missing fields",
            ErrorType::InvalidEmail => "Invalid email",
            ErrorType::InvalidBody => "Invalid request body",
            ErrorType::DuplicateEmail => "Duplicate email",
            ErrorType::ApiKeyMissing => "API key not set",
            ErrorType::CityNotFound => "City not found",
            ErrorType::UpstreamTimeout => "Upstream timeout",
            ErrorType::UpstreamConnectError => "Upstream connect error",
            ErrorType::UpstreamStatusError => "Upstream HTTP status error",
            ErrorType::UpstreamDecodeError => "Upstream decode error",
            ErrorType::UpstreamOtherError => "Upstream other error",
        }
    }

    /// Snake-case name used as a Prometheus label and JSON key.
    pub fn metric_name(&self) -> &'static str {
        match self {
            ErrorType::BotDetected => "bot_detected",
            ErrorType::MissingFields => "missing_fields",
            ErrorType::InvalidEmail => "invalid_email",
            ErrorType::InvalidBody => "invalid_body",
            ErrorType::DuplicateEmail => "duplicate_email",
            ErrorType::ApiKeyMissing => "api_key_missing",
            ErrorType::CityNotFound => "city_not_found",
            ErrorType::UpstreamTimeout => "upstream_timeout",
            ErrorType::UpstreamConnectError => "upstream_connect_error",
            ErrorType::UpstreamStatusError => "upstream_status_error",
            ErrorType::UpstreamDecodeError => "upstream_decode_error",
            ErrorType::UpstreamOtherError => "upstream_other_error",
        }
    }
}

impl InfoType {
    /// Returns a human-readable string representation of the info type.
    pub fn as_str(&self) -> &'static str {
        match self {
            InfoType::SuccessfulLookup => "Successful lookup",
            InfoType::UnknownReading => "Unknown AQI reading",
        }
    }

    /// Snake-case name used as a Prometheus label and JSON key.
    pub fn metric_name(&self) -> &'static str {
        match self {
            InfoType::SuccessfulLookup => "successful_lookup",
            InfoType::UnknownReading => "unknown_reading",
        }
    }
}
