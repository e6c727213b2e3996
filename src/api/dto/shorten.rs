//! DTOs for the shortening endpoints (gateway and shortener).

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /shorten` and `POST /api/v1/shorten`.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ShortenRequest {
    /// The long URL to shorten. Format is checked by the shortener.
    #[validate(length(min = 1, message = "url must not be empty"))]
    pub url: String,
}

/// Query of `GET /shorten?url=...`.
#[derive(Debug, Deserialize)]
pub struct ShortenQuery {
    pub url: Option<String>,
}

/// Successful shortening result.
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub short_url: String,
}
