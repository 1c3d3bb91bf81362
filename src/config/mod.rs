//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (timeouts, defaults, upstream endpoint)
//! - HTTP header and form field name constants
//! - The library `Config` and the CLI/environment option parser `Opt`

mod constants;
mod headers;
mod types;

// Re-export all constants
pub use constants::*;
pub use headers::*;
pub use types::{Config, LogFormat, LogLevel, Opt, ResponseMode};
