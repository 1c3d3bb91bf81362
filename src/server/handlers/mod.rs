//! HTTP handlers.

mod lookup;
mod metrics;
mod status;

pub use lookup::{form_lookup_handler, index_handler, json_lookup_handler};
pub use metrics::metrics_handler;
pub use status::status_handler;
