//! Short key resolution.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, instrument, warn};

use crate::domain::clients::ResolverClient;
use crate::domain::redirect_event::RedirectEvent;
use crate::domain::repositories::{UrlRepository, UrlStore};
use crate::error::AppError;
use crate::utils::timeout::{ping_within, with_timeout};

/// Resolves short keys against the key-value store.
///
/// # Lookup Strategy
///
/// - **Store hit**: return the URL
/// - **Store miss**: consult the relational fallback if configured, re-publish
///   a hit to the store in the background
/// - **Store error**: [`AppError::Service`], never [`AppError::UrlNotFound`]
///
/// # Redirect Counting
///
/// Each successful resolution offers a [`RedirectEvent`] to a bounded channel.
/// A full or closed channel drops the event; the resolution still succeeds.
pub struct RedirectService {
    store: Arc<dyn UrlStore>,
    fallback: Option<Arc<dyn UrlRepository>>,
    events: Option<mpsc::Sender<RedirectEvent>>,
    store_timeout: Duration,
}

impl RedirectService {
    /// Creates a resolver reading from `store` with a per-call deadline.
    pub fn new(store: Arc<dyn UrlStore>, store_timeout: Duration) -> Self {
        Self {
            store,
            fallback: None,
            events: None,
            store_timeout,
        }
    }

    /// Consults `repository` when the key-value store misses.
    pub fn with_fallback(mut self, repository: Arc<dyn UrlRepository>) -> Self {
        self.fallback = Some(repository);
        self
    }

    /// Sends a [`RedirectEvent`] on `sender` for each successful resolution.
    pub fn with_redirect_events(mut self, sender: mpsc::Sender<RedirectEvent>) -> Self {
        self.events = Some(sender);
        self
    }

    /// Resolves `short_key` to its long URL.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidInput`] if `short_key` is empty
    /// - [`AppError::UrlNotFound`] if no configured store knows the key
    /// - [`AppError::Service`] if a store cannot be queried
    #[instrument(skip(self))]
    pub async fn resolve(&self, short_key: &str) -> Result<String, AppError> {
        if short_key.is_empty() {
            return Err(AppError::invalid_input("short key cannot be empty"));
        }

        let stored = with_timeout(
            self.store_timeout,
            "key-value lookup",
            self.store.get(short_key),
        )
        .await?;

        let long_url = match stored {
            Some(url) => url,
            None => self
                .lookup_fallback(short_key)
                .await?
                .ok_or_else(|| AppError::UrlNotFound(short_key.to_string()))?,
        };

        self.record_redirect(short_key);
        metrics::counter!("redirects_resolved_total").increment(1);

        Ok(long_url)
    }

    /// Returns true if the key-value store answers a PING.
    pub async fn store_healthy(&self) -> bool {
        ping_within(self.store_timeout, "key-value ping", self.store.ping()).await
    }

    /// Returns `None` if no relational fallback is configured.
    pub async fn fallback_healthy(&self) -> Option<bool> {
        match &self.fallback {
            Some(repository) => Some(
                ping_within(self.store_timeout, "relational ping", repository.ping()).await,
            ),
            None => None,
        }
    }

    /// Returns `None` if redirect counting is disabled, otherwise whether the
    /// event queue is still open together with its free capacity.
    pub fn redirect_queue(&self) -> Option<(bool, usize)> {
        self.events
            .as_ref()
            .map(|tx| (!tx.is_closed(), tx.capacity()))
    }

    async fn lookup_fallback(&self, short_key: &str) -> Result<Option<String>, AppError> {
        let Some(repository) = &self.fallback else {
            return Ok(None);
        };

        let record = with_timeout(
            self.store_timeout,
            "relational lookup",
            repository.find_by_key(short_key),
        )
        .await?;

        let Some(record) = record else {
            return Ok(None);
        };

        debug!(short_key, "key-value miss served from relational store");

        // Re-publish asynchronously (fire-and-forget)
        let store = self.store.clone();
        let timeout = self.store_timeout;
        let key = record.short_key.clone();
        let url = record.long_url.clone();
        tokio::spawn(async move {
            if let Err(e) = with_timeout(timeout, "republish mapping", store.put(&key, &url)).await
            {
                warn!(short_key = %key, error = %e, "failed to republish mapping");
            }
        });

        Ok(Some(record.long_url))
    }

    fn record_redirect(&self, short_key: &str) {
        let Some(tx) = &self.events else {
            return;
        };

        match tx.try_send(RedirectEvent::new(short_key)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                metrics::counter!("redirect_events_dropped_total").increment(1);
                debug!(short_key, "redirect queue full, event dropped");
            }
            Err(TrySendError::Closed(_)) => {
                metrics::counter!("redirect_events_dropped_total").increment(1);
                warn!(short_key, "redirect queue closed, event dropped");
            }
        }
    }
}

#[async_trait]
impl ResolverClient for RedirectService {
    async fn resolve(&self, short_key: &str) -> Result<String, AppError> {
        RedirectService::resolve(self, short_key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::ShortenedUrl;
    use crate::domain::repositories::{MockUrlRepository, MockUrlStore};

    const TIMEOUT: Duration = Duration::from_secs(1);

    /// Store whose PING never answers within the test deadline.
    struct HungStore;

    #[async_trait]
    impl UrlStore for HungStore {
        async fn get(&self, _short_key: &str) -> Result<Option<String>, AppError> {
            Ok(None)
        }

        async fn put(&self, _short_key: &str, _long_url: &str) -> Result<(), AppError> {
            Ok(())
        }

        async fn ping(&self) -> bool {
            tokio::time::sleep(Duration::from_secs(30)).await;
            true
        }
    }

    fn store_with(key: &'static str, url: &'static str) -> MockUrlStore {
        let mut store = MockUrlStore::new();
        store.expect_get().returning(move |k| {
            if k == key {
                Ok(Some(url.to_string()))
            } else {
                Ok(None)
            }
        });
        store
    }

    #[tokio::test]
    async fn test_resolve_empty_key_is_invalid() {
        let mut store = MockUrlStore::new();
        store.expect_get().times(0);

        let service = RedirectService::new(Arc::new(store), TIMEOUT);

        assert!(matches!(
            service.resolve("").await,
            Err(AppError::InvalidInput(_))
        ));
    }

    #[tokio::test]
    async fn test_resolve_hit() {
        let store = store_with("abc", "https://example.com/a");
        let service = RedirectService::new(Arc::new(store), TIMEOUT);

        let url = service.resolve("abc").await.unwrap();
        assert_eq!(url, "https://example.com/a");
    }

    #[tokio::test]
    async fn test_resolve_missing_key_is_not_found() {
        let store = store_with("abc", "https://example.com/a");
        let service = RedirectService::new(Arc::new(store), TIMEOUT);

        let result = service.resolve("nonexistent").await;
        assert!(matches!(result, Err(AppError::UrlNotFound(key)) if key == "nonexistent"));
    }

    #[tokio::test]
    async fn test_resolve_store_failure_is_service_error() {
        let mut store = MockUrlStore::new();
        store
            .expect_get()
            .returning(|_| Err(AppError::service("connection refused")));

        let service = RedirectService::new(Arc::new(store), TIMEOUT);

        let result = service.resolve("abc").await;
        assert!(matches!(result, Err(AppError::Service(_))));
    }

    #[tokio::test]
    async fn test_resolve_falls_back_to_repository_and_republishes() {
        let mut store = MockUrlStore::new();
        store.expect_get().returning(|_| Ok(None));
        store
            .expect_put()
            .withf(|key, url| key == "abc" && url == "http://a.com")
            .times(1)
            .returning(|_, _| Ok(()));

        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key()
            .withf(|key| key == "abc")
            .times(1)
            .returning(|_| {
                Ok(Some(ShortenedUrl::new(
                    "abc".to_string(),
                    "http://a.com".to_string(),
                )))
            });

        let service = RedirectService::new(Arc::new(store), TIMEOUT).with_fallback(Arc::new(repo));

        let url = service.resolve("abc").await.unwrap();
        assert_eq!(url, "http://a.com");

        // Let the republish task run
        tokio::time::sleep(Duration::from_millis(50)).await;
    }

    #[tokio::test]
    async fn test_resolve_fallback_miss_is_not_found() {
        let mut store = MockUrlStore::new();
        store.expect_get().returning(|_| Ok(None));

        let mut repo = MockUrlRepository::new();
        repo.expect_find_by_key().returning(|_| Ok(None));

        let service = RedirectService::new(Arc::new(store), TIMEOUT).with_fallback(Arc::new(repo));

        assert!(matches!(
            service.resolve("ghost").await,
            Err(AppError::UrlNotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_store_health_is_bounded_by_timeout() {
        let service = RedirectService::new(Arc::new(HungStore), Duration::from_millis(20));

        assert!(!service.store_healthy().await);
    }

    #[tokio::test]
    async fn test_resolve_emits_redirect_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let service = RedirectService::new(Arc::new(store_with("abc", "http://a.com")), TIMEOUT)
            .with_redirect_events(tx);

        service.resolve("abc").await.unwrap();

        let event = rx.try_recv().unwrap();
        assert_eq!(event.short_key, "abc");
    }

    #[tokio::test]
    async fn test_resolve_not_found_emits_no_event() {
        let (tx, mut rx) = mpsc::channel(4);
        let service = RedirectService::new(Arc::new(store_with("abc", "http://a.com")), TIMEOUT)
            .with_redirect_events(tx);

        let _ = service.resolve("other").await;

        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_resolve_succeeds_when_queue_full() {
        let (tx, _rx) = mpsc::channel(1);
        tx.try_send(RedirectEvent::new("filler")).unwrap();

        let service = RedirectService::new(Arc::new(store_with("abc", "http://a.com")), TIMEOUT)
            .with_redirect_events(tx);

        assert_eq!(service.resolve("abc").await.unwrap(), "http://a.com");
    }

    #[tokio::test]
    async fn test_resolve_succeeds_when_queue_closed() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);

        let service = RedirectService::new(Arc::new(store_with("abc", "http://a.com")), TIMEOUT)
            .with_redirect_events(tx);

        assert_eq!(service.resolve("abc").await.unwrap(), "http://a.com");
        assert_eq!(service.redirect_queue().map(|(open, _)| open), Some(false));
    }
}
