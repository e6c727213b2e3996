//! Deadline helper for outbound store calls.

use std::future::Future;
use std::time::Duration;

use crate::error::AppError;

/// Awaits `fut` for at most `limit`.
///
/// An elapsed deadline becomes [`AppError::Service`] naming `operation`.
pub async fn with_timeout<T, F>(limit: Duration, operation: &str, fut: F) -> Result<T, AppError>
where
    F: Future<Output = Result<T, AppError>>,
{
    match tokio::time::timeout(limit, fut).await {
        Ok(result) => result,
        Err(_) => {
            tracing::warn!(operation, timeout_ms = limit.as_millis() as u64, "operation timed out");
            Err(AppError::service(format!(
                "{operation} timed out after {}ms",
                limit.as_millis()
            )))
        }
    }
}

/// Awaits a health probe for at most `limit`; an elapsed deadline counts as unhealthy.
pub async fn ping_within<F>(limit: Duration, operation: &str, probe: F) -> bool
where
    F: Future<Output = bool>,
{
    match tokio::time::timeout(limit, probe).await {
        Ok(healthy) => healthy,
        Err(_) => {
            tracing::warn!(
                operation,
                timeout_ms = limit.as_millis() as u64,
                "health probe timed out"
            );
            false
        }
    }
}
