//! DTOs for the key allocator endpoint.

use serde::{Deserialize, Serialize};

/// Query of `GET /api/v1/generate-key?url=...`.
#[derive(Debug, Deserialize)]
pub struct GenerateKeyQuery {
    pub url: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateKeyResponse {
    pub short_key: String,
}
