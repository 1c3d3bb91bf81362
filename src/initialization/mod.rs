//! Application initialization and resource setup.
//!
//! This module provides functions to initialize the shared resources:
//! - Logger
//! - Upstream HTTP client and provider
//! - Seen-email store
//!
//! All initialization functions return proper error types for error handling.

mod client;
mod logger;

use std::sync::Arc;

use log::info;

use crate::config::Config;
use crate::error_handling::InitializationError;
use crate::store::{ExpiringSeenEmails, InMemorySeenEmails, SeenEmailStore};
use crate::upstream::WaqiClient;

// Re-export public API
pub use client::init_client;
pub use logger::init_logger_with;

/// Initializes the seen-email store selected by the config.
///
/// Without a TTL, accepted addresses are remembered until the process exits.
pub fn init_seen_email_store(config: &Config) -> Arc<dyn SeenEmailStore> {
    match config.email_ttl {
        Some(ttl) => {
            info!("Accepted emails are forgotten after {}s", ttl.as_secs());
            Arc::new(ExpiringSeenEmails::new(ttl))
        }
        None => Arc::new(InMemorySeenEmails::new()),
    }
}

/// Initializes the WAQI client from the config.
///
/// # Errors
///
/// Returns `InitializationError` if the HTTP client cannot be built or the base
/// URL is invalid.
pub fn init_provider(config: &Config) -> Result<WaqiClient, InitializationError> {
    let client = init_client(config)?;
    WaqiClient::new(client, &config.api_base_url)
}
