//! Long URL shape validation and blacklist matching.
//!
//! URLs are validated, never rewritten: the stored long URL is exactly what
//! the caller submitted, so resolution returns it byte for byte.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL must not be empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,
}

/// Checks that `input` is an absolute `http`/`https` URL with a host.
///
/// Rejects potentially dangerous schemes like `javascript:`, `data:`, `file:`.
///
/// # Errors
///
/// Returns the first [`UrlValidationError`] that applies.
pub fn validate_long_url(input: &str) -> Result<Url, UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    // The parser strips tab and newlines, but the raw input is what gets stored
    if input.chars().any(|c| c.is_ascii_control()) {
        return Err(UrlValidationError::InvalidFormat(
            "URL contains control characters".to_string(),
        ));
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(UrlValidationError::MissingHost),
    }
}

/// Returns true if the URL host equals a blacklisted host or is a subdomain of one.
///
/// Entries are compared case-insensitively; blank entries are ignored.
pub fn is_blacklisted(url: &Url, blacklist: &[String]) -> bool {
    let Some(host) = url.host_str() else {
        return false;
    };
    let host = host.to_ascii_lowercase();

    blacklist
        .iter()
        .map(|entry| entry.trim().trim_start_matches('.').to_ascii_lowercase())
        .filter(|entry| !entry.is_empty())
        .any(|entry| host == entry || host.ends_with(&format!(".{entry}")))
}
