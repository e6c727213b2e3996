//! Public gateway composition over the shortener and the resolver.

use std::sync::Arc;

use tracing::{instrument, warn};

use crate::domain::clients::{ResolverClient, ShortenerClient};
use crate::error::AppError;

/// Delegates public operations to the shortening orchestrator and the redirect
/// resolver. Holds no business state.
///
/// # Error Classification
///
/// | Downstream | Public status |
/// |---|---|
/// | `InvalidInput` / `InvalidUrl` | 400 |
/// | `BlacklistedUrl` | 403 |
/// | `DuplicatedKey` | 409 |
/// | `UrlNotFound` | 404 |
/// | anything else | 500, generic message |
pub struct GatewayService {
    shortener: Arc<dyn ShortenerClient>,
    resolver: Arc<dyn ResolverClient>,
}

impl GatewayService {
    pub fn new(shortener: Arc<dyn ShortenerClient>, resolver: Arc<dyn ResolverClient>) -> Self {
        Self {
            shortener,
            resolver,
        }
    }

    /// Shortens `long_url` and returns the public short URL.
    ///
    /// An empty URL is rejected here without contacting the shortener.
    #[instrument(skip(self))]
    pub async fn shorten_url(&self, long_url: &str) -> Result<String, AppError> {
        if long_url.trim().is_empty() {
            return Err(AppError::invalid_url("url is required"));
        }

        self.shortener
            .shorten(long_url)
            .await
            .map_err(|e| classify("shortener", e))
    }

    /// Resolves `short_key` to the original URL.
    #[instrument(skip(self))]
    pub async fn redirect_url(&self, short_key: &str) -> Result<String, AppError> {
        if short_key.is_empty() {
            return Err(AppError::invalid_input("short key cannot be empty"));
        }

        self.resolver
            .resolve(short_key)
            .await
            .map_err(|e| classify("resolver", e))
    }
}

/// Keeps caller-facing conditions and collapses everything else into an
/// opaque service error. The downstream detail is logged, not forwarded.
fn classify(downstream: &str, error: AppError) -> AppError {
    match error {
        AppError::InvalidInput(_)
        | AppError::InvalidUrl(_)
        | AppError::BlacklistedUrl(_)
        | AppError::DuplicatedKey(_)
        | AppError::UrlNotFound(_) => error,
        AppError::Service(detail) => {
            warn!(downstream, detail = %detail, "downstream service failure");
            AppError::service(format!("{downstream} unavailable"))
        }
    }
}
