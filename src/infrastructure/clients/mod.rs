//! HTTP adapters for the inter-service capabilities.
//!
//! Each adapter wraps a `reqwest::Client` built with the configured request
//! timeout. Non-success responses are decoded as the shared error body and
//! turned back into the matching [`AppError`] variant.

pub mod key_allocator;
pub mod resolver;
pub mod shortener;

pub use key_allocator::HttpKeyAllocator;
pub use resolver::HttpResolverClient;
pub use shortener::HttpShortenerClient;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;

use crate::error::{AppError, ErrorBody, ErrorInfo};

/// Builds a client with a per-request timeout that never follows redirects.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, AppError> {
    Ok(Client::builder()
        .timeout(timeout)
        .redirect(reqwest::redirect::Policy::none())
        .build()?)
}

pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

/// Decodes `expected` responses as `T`; everything else as an error body.
pub(crate) async fn decode<T: DeserializeOwned>(
    response: Response,
    expected: StatusCode,
    downstream: &str,
) -> Result<T, AppError> {
    let status = response.status();

    if status == expected {
        return response.json::<T>().await.map_err(|e| {
            AppError::service(format!("{downstream} sent an undecodable body: {e}"))
        });
    }

    let info = match response.json::<ErrorBody>().await {
        Ok(body) => body.error,
        Err(_) => ErrorInfo {
            code: String::new(),
            message: format!("{downstream} responded with {status}"),
        },
    };

    tracing::debug!(downstream, %status, code = %info.code, "downstream rejected request");
    Err(AppError::from_error_info(status, &info))
}
