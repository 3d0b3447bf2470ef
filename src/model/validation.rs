use std::sync::LazyLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use regex::Regex;
use thiserror::Error;
use url::Url;

/// A single broken field rule. The `Display` text is what the user sees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("Text field is required")]
    TextRequired,
    #[error("Number field is required")]
    NumberRequired,
    #[error("Must be a number")]
    NotANumber,
    #[error("Must be positive")]
    Negative,
    #[error("Email field is required")]
    EmailRequired,
    #[error("Must be a valid email")]
    InvalidEmail,
    #[error("Date field is required")]
    DateRequired,
    #[error("Must be a valid date")]
    InvalidDate,
    #[error("URL field is required")]
    UrlRequired,
    #[error("Must be a valid URL")]
    InvalidUrl,
}

/// HTML living-standard `type=email` pattern.
static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .expect("valid hardcoded regex")
});

const URL_SCHEMES: &[&str] = &["http", "https", "ftp"];

/// Validates free text: any non-empty string.
pub fn validate_text(raw: &str) -> Result<String, FieldError> {
    if raw.is_empty() {
        Err(FieldError::TextRequired)
    } else {
        Ok(raw.to_string())
    }
}

/// Parses a non-negative finite number. Whitespace anywhere in the input is ignored.
pub fn parse_number(raw: &str) -> Result<f64, FieldError> {
    let compact: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return Err(FieldError::NumberRequired);
    }
    match compact.parse::<f64>() {
        Ok(n) if !n.is_finite() => Err(FieldError::NotANumber),
        Ok(n) if n < 0.0 => Err(FieldError::Negative),
        Ok(n) => Ok(n),
        Err(_) => Err(FieldError::NotANumber),
    }
}

/// Validates an email address (e.g., `a@b.com`).
pub fn validate_email(raw: &str) -> Result<String, FieldError> {
    match raw {
        "" => Err(FieldError::EmailRequired),
        s if EMAIL_RE.is_match(s) => Ok(s.to_string()),
        _ => Err(FieldError::InvalidEmail),
    }
}

/// Parses a calendar date or date-time into a UTC instant.
///
/// Accepted forms:
/// - RFC 3339 (`2024-01-01T12:30:00+02:00`)
/// - naive date-time, taken as UTC (`2024-01-01T12:30`, `2024-01-01T12:30:00.5`)
/// - plain date, taken as midnight UTC (`2024-01-01`)
pub fn parse_date(raw: &str) -> Result<DateTime<Utc>, FieldError> {
    let s = raw.trim();
    if s.is_empty() {
        return Err(FieldError::DateRequired);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt.and_utc());
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|d| d.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| FieldError::InvalidDate)
}

/// Validates an absolute `http`, `https` or `ftp` URL with a dotted or IPv6 host.
///
/// The scheme must be followed by a literal `://`.
pub fn validate_url(raw: &str) -> Result<String, FieldError> {
    if raw.is_empty() {
        return Err(FieldError::UrlRequired);
    }
    if raw.chars().any(|c| c.is_whitespace() || c == '\\') {
        return Err(FieldError::InvalidUrl);
    }
    let (scheme, rest) = raw.split_once("://").ok_or(FieldError::InvalidUrl)?;
    if !has_named_host(rest) {
        return Err(FieldError::InvalidUrl);
    }
    let url = Url::parse(raw).map_err(|_| FieldError::InvalidUrl)?;
    if !scheme.eq_ignore_ascii_case(url.scheme()) || !URL_SCHEMES.contains(&url.scheme()) {
        return Err(FieldError::InvalidUrl);
    }
    Ok(raw.to_string())
}

/// Host as typed, without userinfo or port: bracketed IPv6 or containing a dot.
fn has_named_host(after_scheme: &str) -> bool {
    let authority = after_scheme
        .split(['/', '?', '#'])
        .next()
        .unwrap_or_default();
    let host = authority.rsplit('@').next().unwrap_or_default();
    if host.starts_with('[') {
        return host.contains(']');
    }
    let name = host.split(':').next().unwrap_or_default();
    name.contains('.') && !name.starts_with('.') && !name.ends_with('.')
}
