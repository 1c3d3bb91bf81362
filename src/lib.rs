//! aqi_checker library: air quality lookups behind a small web service
//!
//! A lookup takes a city (and, depending on configuration, an email), rejects bot
//! submissions through a honeypot field, allows each email address only once,
//! fetches the city's current AQI from the WAQI feed API and classifies it into a
//! severity band. Results are served either as an HTML form page or as a JSON API.
//!
//! # Example
//!
//! ```no_run
//! use aqi_checker::{run_server, Config, ResponseMode};
//!
//! # #[tokio::main]
//! # async fn main() -> anyhow::Result<()> {
//! let config = Config {
//!     api_key: Some("your-waqi-token".to_string()),
//!     mode: ResponseMode::Json,
//!     require_email: true,
//!     ..Default::default()
//! };
//!
//! run_server(config).await?;
//! # Ok(())
//! # }
//! ```
//!
//! The classifier can be used on its own:
//!
//! ```
//! use aqi_checker::{classify, AqiCategory};
//!
//! assert_eq!(classify(42), AqiCategory::Good);
//! assert_eq!(classify(250).label(), "Very Poor");
//! ```
//!
//! # Requirements
//!
//! The server and the upstream client require a Tokio runtime.

pub mod classify;
pub mod config;
pub mod error_handling;
pub mod initialization;
pub mod render;
pub mod server;
pub mod service;
pub mod store;
pub mod upstream;
pub mod validation;

// Re-export public API
pub use classify::{classify, classify_str, classify_value, AqiCategory};
pub use config::{Config, LogFormat, LogLevel, Opt, ResponseMode};
pub use error_handling::{CheckError, UpstreamError};
pub use server::{build_router, build_state, run_server, serve, AppState};
pub use service::{AqiReading, AqiService};
pub use store::{ExpiringSeenEmails, InMemorySeenEmails, SeenEmailStore};
pub use upstream::{AqiProvider, WaqiClient};
pub use validation::AqiRequest;
