//! DTOs for the redirect resolver endpoint.

use serde::{Deserialize, Serialize};

/// Query of `GET /api/v1/redirect?key=...`.
#[derive(Debug, Deserialize)]
pub struct RedirectQuery {
    pub key: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RedirectResponse {
    pub original_url: String,
}
