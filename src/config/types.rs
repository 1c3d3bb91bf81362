//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line / environment parsing
//! and the library configuration that is injected into the service.

use std::time::Duration;

use clap::{Parser, ValueEnum};
use serde::Serialize;

use crate::config::constants::{
    DEFAULT_API_BASE_URL, DEFAULT_HOST, DEFAULT_PORT, DEFAULT_UPSTREAM_TIMEOUT_SECS,
    DEFAULT_USER_AGENT,
};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// How the service talks to its clients.
///
/// - `Html`: `GET /` serves a form, `POST /` accepts form fields and renders a page
/// - `Json`: `GET /` returns usage info, `POST /check_aqi` accepts and returns JSON
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    /// Server-rendered HTML form
    Html,
    /// JSON API
    Json,
}

/// Library configuration (no CLI dependencies).
///
/// This is the configuration struct injected into the service. It can be
/// constructed programmatically, which is what the integration tests do.
///
/// # Examples
///
/// ```no_run
/// use aqi_checker::{Config, ResponseMode};
///
/// let config = Config {
///     api_key: Some("demo".to_string()),
///     mode: ResponseMode::Json,
///     require_email: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Token for the upstream AQI provider. `None` is allowed at startup and is
    /// reported to clients as "API key not set".
    pub api_key: Option<String>,

    /// Address to bind
    pub host: String,

    /// Port to listen on
    pub port: u16,

    /// HTML form or JSON API
    pub mode: ResponseMode,

    /// Whether an email address must accompany every lookup
    pub require_email: bool,

    /// Base URL of the upstream provider
    pub api_base_url: String,

    /// Upstream request timeout in seconds
    pub timeout_seconds: u64,

    /// How long an accepted email stays blocked. `None` means until restart.
    pub email_ttl: Option<Duration>,

    /// User-Agent header sent upstream
    pub user_agent: String,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            mode: ResponseMode::Html,
            require_email: false,
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout_seconds: DEFAULT_UPSTREAM_TIMEOUT_SECS,
            email_ttl: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// Command-line options. Every option can also be supplied through the environment
/// (or a `.env` file, which the binary loads first).
#[derive(Debug, Clone, Parser)]
#[command(
    name = "aqi_checker",
    version,
    about = "Look up a city's air quality index and classify it"
)]
pub struct Opt {
    /// Token for the WAQI feed API
    #[arg(long, env = "AQI_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Address to bind
    #[arg(long, env = "AQI_HOST", default_value = DEFAULT_HOST)]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    pub port: u16,

    /// Serve an HTML form or a JSON API
    #[arg(long, env = "AQI_RESPONSE_MODE", value_enum, default_value_t = ResponseMode::Html)]
    pub mode: ResponseMode,

    /// Require an email with every lookup [default: true in json mode, false in html mode]
    #[arg(long, env = "AQI_REQUIRE_EMAIL")]
    pub require_email: Option<bool>,

    /// Base URL of the upstream AQI provider
    #[arg(long, env = "AQI_API_BASE_URL", default_value = DEFAULT_API_BASE_URL)]
    pub api_base_url: String,

    /// Upstream request timeout in seconds
    #[arg(
        long,
        env = "AQI_TIMEOUT_SECONDS",
        default_value_t = DEFAULT_UPSTREAM_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout_seconds: u64,

    /// Forget an accepted email after this many seconds (default: never)
    #[arg(long, env = "AQI_EMAIL_TTL_SECONDS")]
    pub email_ttl_seconds: Option<u64>,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Opt> for Config {
    fn from(opt: Opt) -> Self {
        // An empty variable (e.g. `AQI_API_KEY=` in a .env file) counts as unset
        let api_key = opt.api_key.filter(|key| !key.trim().is_empty());
        Self {
            api_key,
            host: opt.host,
            port: opt.port,
            mode: opt.mode,
            require_email: opt
                .require_email
                .unwrap_or(opt.mode == ResponseMode::Json),
            api_base_url: opt.api_base_url,
            timeout_seconds: opt.timeout_seconds,
            email_ttl: opt.email_ttl_seconds.map(Duration::from_secs),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            log_level: opt.log_level,
            log_format: opt.log_format,
        }
    }
}
