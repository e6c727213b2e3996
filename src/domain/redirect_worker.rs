//! Background worker that applies redirect counter increments.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::domain::redirect_event::RedirectEvent;
use crate::domain::repositories::RedirectCounter;

/// Drains redirect events and increments the stored counters.
///
/// Failures are logged and dropped: the counter is best-effort and is never
/// retried. The worker exits once every sender has been dropped.
pub async fn run_redirect_worker(
    mut rx: mpsc::Receiver<RedirectEvent>,
    counter: Arc<dyn RedirectCounter>,
) {
    info!("Redirect worker started");

    while let Some(event) = rx.recv().await {
        match counter.increment_redirects(&event.short_key).await {
            Ok(true) => {
                debug!(short_key = %event.short_key, "redirect counted");
            }
            Ok(false) => {
                debug!(
                    short_key = %event.short_key,
                    "redirect not counted: key missing from relational store"
                );
            }
            Err(e) => {
                metrics::counter!("redirect_count_failures_total").increment(1);
                warn!(short_key = %event.short_key, error = %e, "failed to count redirect");
            }
        }
    }

    info!("Redirect worker stopped");
}
