//! Error handling and processing statistics.
//!
//! This module provides:
//! - The request-level error taxonomy (`CheckError`) and its HTTP status mapping
//! - Upstream and initialization error types
//! - Processing statistics tracking (error and info counters)
//! - Categorization of upstream failures into counter types
//!
//! Request errors fall into two groups:
//! - **Fix the input**: bot detected, missing fields, invalid email, bad body, unknown city
//! - **Try again later**: duplicate email, missing API key, upstream failure

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{categorize_reqwest_error, categorize_upstream_error};
pub use stats::ProcessingStats;
pub use types::{CheckError, ErrorType, InfoType, InitializationError, UpstreamError};
