//! Key-value store trait used for redirect lookups.

use crate::error::AppError;
use async_trait::async_trait;

/// Key-value mapping `short_key -> long_url` read by the redirect resolver.
///
/// Unlike a cache, errors are not swallowed: an unreachable store must surface
/// as [`AppError::Service`] so it is never mistaken for a missing key.
///
/// # Implementations
///
/// - [`crate::infrastructure::kv::RedisUrlStore`] - Redis
/// - [`crate::infrastructure::kv::MemoryUrlStore`] - in-process map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlStore: Send + Sync {
    /// Looks up the long URL for a short key.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(url))` if present
    /// - `Ok(None)` if the store is reachable and the key is absent
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Service`] if the store cannot be queried.
    async fn get(&self, short_key: &str) -> Result<Option<String>, AppError>;

    /// Stores the mapping, overwriting any previous value.
    async fn put(&self, short_key: &str, long_url: &str) -> Result<(), AppError>;

    /// Returns true if the store answers a PING.
    async fn ping(&self) -> bool;
}
