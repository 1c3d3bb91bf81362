//! Inbound request validation.
//!
//! Rules are applied in a fixed order and the first failing rule wins:
//! honeypot, required fields, email syntax, duplicate email.

use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use crate::config::{EMAIL_PATTERN, MAX_CITY_LENGTH, MAX_EMAIL_LENGTH};
use crate::error_handling::CheckError;
use crate::store::SeenEmailStore;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(EMAIL_PATTERN).expect("EMAIL_PATTERN is a valid regex"));

/// A lookup request as submitted, from either a form or a JSON body.
///
/// Every field is optional at this stage; absence is a validation error,
/// not a parse error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AqiRequest {
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    /// Honeypot. Rendered hidden in the form; must stay empty.
    #[serde(default)]
    pub website: Option<String>,
}

/// A request that passed every rule. The email, if any, has been recorded as seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedRequest {
    pub city: String,
    pub email: Option<String>,
}

/// Returns `true` if `email` looks like `local-part@domain.tld`.
pub fn is_valid_email(email: &str) -> bool {
    email.len() <= MAX_EMAIL_LENGTH && EMAIL_RE.is_match(email)
}

// Trims and drops blank values
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Validates `request`, recording the email in `seen` on success.
///
/// The email is marked seen before any upstream call is made, so a second request
/// with the same address is rejected even while the first is still in flight.
///
/// # Errors
///
/// - `BotDetected` if the honeypot field is non-empty
/// - `MissingFields` if the city (or a required email) is blank
/// - `InvalidEmail` if a supplied email fails the syntax check
/// - `DuplicateEmail` if the email has already been accepted
pub fn validate_request(
    request: &AqiRequest,
    require_email: bool,
    seen: &dyn SeenEmailStore,
) -> Result<ValidatedRequest, CheckError> {
    // Any content at all, whitespace included, is bot traffic
    if request.website.as_deref().is_some_and(|w| !w.is_empty()) {
        return Err(CheckError::BotDetected);
    }

    let city = non_blank(request.city.as_deref());
    let email = non_blank(request.email.as_deref());

    let city = match (city, email) {
        (Some(city), Some(_)) => city,
        (Some(city), None) if !require_email => city,
        _ if require_email => return Err(CheckError::MissingFields("City and email required")),
        _ => return Err(CheckError::MissingFields("City required")),
    };

    if city.chars().count() > MAX_CITY_LENGTH {
        return Err(CheckError::InvalidBody(format!(
            "city must be at most {} characters",
            MAX_CITY_LENGTH
        )));
    }

    if let Some(email) = email {
        if !is_valid_email(email) {
            return Err(CheckError::InvalidEmail);
        }
        if !seen.mark_seen(email) {
            return Err(CheckError::DuplicateEmail);
        }
    }

    Ok(ValidatedRequest {
        city: city.to_string(),
        email: email.map(str::to_string),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemorySeenEmails;

    fn request(city: Option<&str>, email: Option<&str>, website: Option<&str>) -> AqiRequest {
        AqiRequest {
            city: city.map(String::from),
            email: email.map(String::from),
            website: website.map(String::from),
        }
    }

    #[test]
    fn test_email_syntax() {
        assert!(is_valid_email("a@b.com"));
        assert!(is_valid_email("first.last-name@sub.example.co.uk"));
        assert!(is_valid_email("user_1@example.io"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a@@b.com"));
        assert!(!is_valid_email("a b@c.com"));
        assert!(!is_valid_email("@b.com"));
        assert!(!is_valid_email(""));
    }

    #[test]
    fn test_email_too_long() {
        let email = format!("{}@example.com", "a".repeat(MAX_EMAIL_LENGTH));
        assert!(!is_valid_email(&email));
    }

    #[test]
    fn test_valid_request_records_email() {
        let seen = InMemorySeenEmails::new();
        let validated = validate_request(
            &request(Some("Delhi"), Some("x@y.com"), Some("")),
            true,
            &seen,
        )
        .unwrap();
        assert_eq!(validated.city, "Delhi");
        assert_eq!(validated.email.as_deref(), Some("x@y.com"));
        assert!(seen.has_seen("x@y.com"));
    }

    #[test]
    fn test_honeypot_checked_first() {
        let seen = InMemorySeenEmails::new();
        // Every other field is also wrong; the honeypot still wins
        let err = validate_request(&request(None, Some("bad"), Some("spam.example")), true, &seen)
            .unwrap_err();
        assert!(matches!(err, CheckError::BotDetected));
        assert!(seen.is_empty());
    }

    #[test]
    fn test_whitespace_honeypot_is_bot() {
        let seen = InMemorySeenEmails::new();
        let err =
            validate_request(&request(Some("Delhi"), Some("x@y.com"), Some(" ")), true, &seen)
                .unwrap_err();
        assert!(matches!(err, CheckError::BotDetected));
        assert!(!seen.has_seen("x@y.com"));
    }

    #[test]
    fn test_empty_honeypot_is_human() {
        let seen = InMemorySeenEmails::new();
        assert!(validate_request(&request(Some("Pune"), None, Some("")), false, &seen).is_ok());
    }

    #[test]
    fn test_missing_city() {
        let seen = InMemorySeenEmails::new();
        let err = validate_request(&request(Some("  "), None, None), false, &seen).unwrap_err();
        assert!(matches!(err, CheckError::MissingFields("City required")));

        let err =
            validate_request(&request(None, Some("x@y.com"), None), true, &seen).unwrap_err();
        assert!(matches!(
            err,
            CheckError::MissingFields("City and email required")
        ));
        assert!(seen.is_empty());
    }

    #[test]
    fn test_missing_required_email() {
        let seen = InMemorySeenEmails::new();
        let err = validate_request(&request(Some("Delhi"), None, None), true, &seen).unwrap_err();
        assert!(matches!(err, CheckError::MissingFields(_)));
    }

    #[test]
    fn test_optional_email_may_be_absent() {
        let seen = InMemorySeenEmails::new();
        let validated =
            validate_request(&request(Some(" Delhi "), Some(""), None), false, &seen).unwrap();
        assert_eq!(validated.city, "Delhi");
        assert!(validated.email.is_none());
    }

    #[test]
    fn test_optional_email_still_validated_when_present() {
        let seen = InMemorySeenEmails::new();
        let err = validate_request(&request(Some("Delhi"), Some("a@b"), None), false, &seen)
            .unwrap_err();
        assert!(matches!(err, CheckError::InvalidEmail));
        assert!(seen.is_empty());
    }

    #[test]
    fn test_duplicate_email_regardless_of_city() {
        let seen = InMemorySeenEmails::new();
        validate_request(&request(Some("Delhi"), Some("x@y.com"), None), true, &seen).unwrap();
        let err = validate_request(&request(Some("Mumbai"), Some("x@y.com"), None), true, &seen)
            .unwrap_err();
        assert!(matches!(err, CheckError::DuplicateEmail));
    }

    #[test]
    fn test_city_too_long() {
        let seen = InMemorySeenEmails::new();
        let city = "x".repeat(MAX_CITY_LENGTH + 1);
        let err = validate_request(&request(Some(&city), None, None), false, &seen).unwrap_err();
        assert!(matches!(err, CheckError::InvalidBody(_)));
    }

    #[test]
    fn test_deserialize_partial_json() {
        let parsed: AqiRequest = serde_json::from_str(r#"{"city":"Delhi"}"#).unwrap();
        assert_eq!(parsed.city.as_deref(), Some("Delhi"));
        assert!(parsed.email.is_none());
        assert!(parsed.website.is_none());
    }
}
