//! Configuration constants.
//!
//! This module defines the constants used as defaults throughout the application,
//! including the listening address, upstream endpoint and timeouts.

use std::time::Duration;

/// Default listening port when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;
/// Default bind address (all interfaces, as a container deployment expects).
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Base URL of the WAQI feed API.
/// Requests go to `{base}/feed/{city}/?token={key}`.
pub const DEFAULT_API_BASE_URL: &str = "https://api.waqi.info";

// Upstream timeouts
/// Total per-request timeout for the upstream AQI lookup in seconds
pub const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 10;
/// TCP connection timeout for the upstream AQI lookup in seconds
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// User-Agent sent to the upstream provider.
pub const DEFAULT_USER_AGENT: &str = concat!("aqi_checker/", env!("CARGO_PKG_VERSION"));

/// Upper bound on the accepted city length.
/// The city ends up in the upstream URL path, so absurd inputs are rejected early.
pub const MAX_CITY_LENGTH: usize = 128;
/// Upper bound on the accepted email length (RFC 5321 path limit).
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Pattern a submitted email must match: word characters, dots and hyphens on both
/// sides of a single `@`, and at least one dot in the domain.
pub const EMAIL_PATTERN: &str = r"^[\w.-]+@[\w.-]+\.\w+$";

/// Grace period given to in-flight requests once shutdown is requested.
pub const SHUTDOWN_GRACE_PERIOD: Duration = Duration::from_secs(5);

// Upstream status values
pub const UPSTREAM_STATUS_OK: &str = "ok";
