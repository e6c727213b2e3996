use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::instrument;

use super::{build_client, decode, endpoint};
use crate::api::dto::redirect::RedirectResponse;
use crate::domain::clients::ResolverClient;
use crate::error::AppError;

/// Calls the redirect resolver's `GET /api/v1/redirect`.
pub struct HttpResolverClient {
    client: Client,
    base_url: String,
}

impl HttpResolverClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, AppError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.into(),
        })
    }
}

#[async_trait]
impl ResolverClient for HttpResolverClient {
    #[instrument(skip(self))]
    async fn resolve(&self, short_key: &str) -> Result<String, AppError> {
        let response = self
            .client
            .get(endpoint(&self.base_url, "/api/v1/redirect"))
            .query(&[("key", short_key)])
            .send()
            .await?;

        let body: RedirectResponse = decode(response, StatusCode::OK, "redirect resolver").await?;
        Ok(body.original_url)
    }
}
