//! Response presentation.
//!
//! The lookup pipeline is shared; only the way its outcome is shown differs:
//! - `HtmlRenderer` - server-rendered form page with the result inline
//! - `JsonRenderer` - JSON API responses

mod html;
mod json;

use axum::response::Response;

use crate::config::ResponseMode;
use crate::error_handling::CheckError;
use crate::service::AqiReading;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;

/// Turns a lookup outcome into an HTTP response.
pub trait ResponseRenderer: Send + Sync {
    /// Response for `GET /`.
    fn index(&self) -> Response;

    /// Response for a successful lookup.
    fn success(&self, reading: &AqiReading, client_ip: &str) -> Response;

    /// Response for a rejected or failed lookup. The status is `err.status_code()`.
    fn error(&self, err: &CheckError, client_ip: &str) -> Response;
}

/// Builds the renderer for `mode`.
///
/// # Errors
///
/// Returns a `minijinja::Error` if the HTML template does not parse.
pub fn renderer_for(
    mode: ResponseMode,
    require_email: bool,
) -> Result<Box<dyn ResponseRenderer>, minijinja::Error> {
    let renderer: Box<dyn ResponseRenderer> = match mode {
        ResponseMode::Html => Box::new(HtmlRenderer::new(require_email)?),
        ResponseMode::Json => Box::new(JsonRenderer),
    };
    Ok(renderer)
}
