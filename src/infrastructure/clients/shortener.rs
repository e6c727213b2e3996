use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::instrument;

use super::{build_client, decode, endpoint};
use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::domain::clients::ShortenerClient;
use crate::error::AppError;

/// Calls the shortener's `POST /api/v1/shorten`.
pub struct HttpShortenerClient {
    client: Client,
    base_url: String,
}

impl HttpShortenerClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ShortenerClient for HttpShortenerClient {
    #[instrument(skip(self))]
    async fn shorten(&self, long_url: &str) -> Result<String, AppError> {
        let request = ShortenRequest {
            url: long_url.to_string(),
        };

        let response = self
            .client
            .post(endpoint(&self.base_url, "/api/v1/shorten"))
            .json(&request)
            .send()
            .await?;

        let body: ShortenResponse = decode(response, StatusCode::CREATED, "shortener").await?;
        Ok(body.short_url)
    }
}
