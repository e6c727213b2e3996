//! Redirect counter trait.

use crate::error::AppError;
use async_trait::async_trait;

/// Increments the `redirects` counter of a stored URL.
///
/// Called off the request path by
/// [`crate::domain::redirect_worker::run_redirect_worker`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RedirectCounter: Send + Sync {
    /// Adds one to the counter of `short_key`.
    ///
    /// Returns `Ok(false)` when no record with that key exists.
    async fn increment_redirects(&self, short_key: &str) -> Result<bool, AppError>;
}
