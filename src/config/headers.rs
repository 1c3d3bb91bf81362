//! HTTP header and form field name constants.

/// Header set by reverse proxies carrying the original client address.
/// Only the first (left-most) entry is used.
pub const HEADER_X_FORWARDED_FOR: &str = "X-Forwarded-For";

// Form / JSON field names
/// City to look up
pub const FIELD_CITY: &str = "city";
/// Contact email (required in JSON mode by default)
pub const FIELD_EMAIL: &str = "email";
/// Hidden honeypot field; humans leave it empty
pub const FIELD_HONEYPOT: &str = "website";
