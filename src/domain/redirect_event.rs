//! Redirect event model for asynchronous redirect counting.

use chrono::{DateTime, Utc};

/// A successful resolution waiting to be counted.
///
/// Sent from [`crate::application::services::RedirectService`] to
/// [`crate::domain::redirect_worker::run_redirect_worker`] over a bounded
/// channel so the counter update never sits on the redirect path.
#[derive(Debug, Clone)]
pub struct RedirectEvent {
    pub short_key: String,
    pub resolved_at: DateTime<Utc>,
}

impl RedirectEvent {
    pub fn new(short_key: impl Into<String>) -> Self {
        Self {
            short_key: short_key.into(),
            resolved_at: Utc::now(),
        }
    }
}
