//! Capabilities the services consume from each other.
//!
//! Each capability is a trait; the concrete adapter is chosen when the service
//! is composed in [`crate::server`]:
//!
//! | Capability | HTTP adapter | In-process adapter |
//! |---|---|---|
//! | [`KeyAllocator`] | [`crate::infrastructure::clients::HttpKeyAllocator`] | [`crate::application::services::KeygenService`] |
//! | [`ShortenerClient`] | [`crate::infrastructure::clients::HttpShortenerClient`] | [`crate::application::services::ShortenerService`] |
//! | [`ResolverClient`] | [`crate::infrastructure::clients::HttpResolverClient`] | [`crate::application::services::RedirectService`] |
//!
//! HTTP adapters translate downstream status codes back into [`AppError`]
//! variants so callers see the same conditions regardless of transport.

use crate::error::AppError;
use async_trait::async_trait;

/// Produces a short key for a long URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyAllocator: Send + Sync {
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if `long_url` is empty
    /// - [`AppError::Service`] on transport or allocator failure
    async fn allocate_key(&self, long_url: &str) -> Result<String, AppError>;
}

/// Shortens a long URL and returns the full public short URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortenerClient: Send + Sync {
    /// # Errors
    ///
    /// [`AppError::InvalidUrl`], [`AppError::BlacklistedUrl`],
    /// [`AppError::DuplicatedKey`] or [`AppError::Service`].
    async fn shorten(&self, long_url: &str) -> Result<String, AppError>;
}

/// Resolves a short key to the original long URL.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ResolverClient: Send + Sync {
    /// # Errors
    ///
    /// [`AppError::InvalidInput`], [`AppError::UrlNotFound`] or
    /// [`AppError::Service`].
    async fn resolve(&self, short_key: &str) -> Result<String, AppError>;
}
