use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::instrument;

use super::{build_client, decode, endpoint};
use crate::api::dto::keygen::GenerateKeyResponse;
use crate::domain::clients::KeyAllocator;
use crate::error::AppError;

/// Calls the key allocator's `GET /api/v1/generate-key`.
pub struct HttpKeyAllocator {
    client: Client,
    base_url: String,
}

impl HttpKeyAllocator {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl KeyAllocator for HttpKeyAllocator {
    #[instrument(skip(self, long_url))]
    async fn allocate_key(&self, long_url: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "/api/v1/generate-key"))
            .query(&[("url", long_url)])
            .send()
            .await?;

        let body: GenerateKeyResponse = decode(response, StatusCode::OK, "key allocator").await?;
        Ok(body.short_key)
    }
}
