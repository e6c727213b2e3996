//! Shortening orchestration: validate, allocate, persist, publish.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, instrument, warn};

use crate::domain::clients::{KeyAllocator, ShortenerClient};
use crate::domain::entities::ShortenedUrl;
use crate::domain::repositories::{UrlRepository, UrlStore};
use crate::error::AppError;
use crate::utils::timeout::{ping_within, with_timeout};
use crate::utils::url_validation::{is_blacklisted, validate_long_url};

/// Policy knobs for [`ShortenerService`].
#[derive(Debug, Clone)]
pub struct ShortenerSettings {
    /// Public base URL prepended to keys (e.g. `http://localhost:8080`).
    pub base_url: String,
    /// Hosts (and their subdomains) that may not be shortened.
    pub blacklist: Vec<String>,
    /// Extra allocations attempted after a key collision. `0` surfaces the
    /// first collision as [`AppError::DuplicatedKey`].
    pub collision_retries: u32,
    /// Deadline for each store call.
    pub store_timeout: Duration,
}

impl Default for ShortenerSettings {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080".to_string(),
            blacklist: Vec::new(),
            collision_retries: 0,
            store_timeout: Duration::from_secs(5),
        }
    }
}

/// Orchestrates creation of shortened URLs.
///
/// The allocator and the relational store are separate network hops, so two
/// concurrent requests may be handed the same key. The store's conditional
/// insert decides the winner; the loser gets [`AppError::DuplicatedKey`].
pub struct ShortenerService {
    allocator: Arc<dyn KeyAllocator>,
    repository: Arc<dyn UrlRepository>,
    publisher: Option<Arc<dyn UrlStore>>,
    settings: ShortenerSettings,
}

impl ShortenerService {
    /// Creates a new shortener service.
    pub fn new(
        allocator: Arc<dyn KeyAllocator>,
        repository: Arc<dyn UrlRepository>,
        settings: ShortenerSettings,
    ) -> Self {
        Self {
            allocator,
            repository,
            publisher: None,
            settings,
        }
    }

    /// Publishes every new mapping to `store` so the resolver can find it.
    pub fn with_publisher(mut self, store: Arc<dyn UrlStore>) -> Self {
        self.publisher = Some(store);
        self
    }

    /// Shortens `long_url` and returns the persisted record.
    ///
    /// # Steps
    ///
    /// 1. Validate the URL shape
    /// 2. Reject blacklisted hosts
    /// 3. Allocate a key (single attempt, no retry on failure)
    /// 4. Conditionally insert the record
    /// 5. Publish to the key-value store (best-effort)
    ///
    /// The record is durably persisted before this returns `Ok`.
    ///
    /// # Errors
    ///
    /// - [`AppError::InvalidUrl`] for an empty or malformed URL
    /// - [`AppError::BlacklistedUrl`] for a rejected host
    /// - [`AppError::DuplicatedKey`] when the allocated key is already taken
    /// - [`AppError::Service`] on allocator or store failure
    #[instrument(skip(self), fields(short_key))]
    pub async fn shorten(&self, long_url: &str) -> Result<ShortenedUrl, AppError> {
        let parsed =
            validate_long_url(long_url).map_err(|e| AppError::invalid_url(e.to_string()))?;

        if is_blacklisted(&parsed, &self.settings.blacklist) {
            return Err(AppError::BlacklistedUrl(
                parsed.host_str().unwrap_or_default().to_string(),
            ));
        }

        let attempts = self.settings.collision_retries.saturating_add(1);
        let mut last_key = String::new();

        for attempt in 1..=attempts {
            let short_key = self.allocate(long_url).await?;
            tracing::Span::current().record("short_key", short_key.as_str());

            let record = ShortenedUrl::new(short_key, long_url.to_string());

            let inserted = with_timeout(
                self.settings.store_timeout,
                "insert shortened url",
                self.repository.insert_if_absent(&record),
            )
            .await?;

            if inserted {
                self.publish(&record).await;
                metrics::counter!("urls_shortened_total").increment(1);
                info!(short_key = %record.short_key, "URL shortened");
                return Ok(record);
            }

            metrics::counter!("short_key_collisions_total").increment(1);
            warn!(short_key = %record.short_key, attempt, "short key collision");
            last_key = record.short_key;
        }

        Err(AppError::DuplicatedKey(last_key))
    }

    /// Full public short URL for a record.
    pub fn short_url(&self, record: &ShortenedUrl) -> String {
        record.short_url(&self.settings.base_url)
    }

    /// Returns true if the relational store is reachable.
    pub async fn repository_healthy(&self) -> bool {
        ping_within(
            self.settings.store_timeout,
            "relational ping",
            self.repository.ping(),
        )
        .await
    }

    /// Returns `None` if no publisher is configured.
    pub async fn publisher_healthy(&self) -> Option<bool> {
        match &self.publisher {
            Some(store) => Some(
                ping_within(self.settings.store_timeout, "key-value ping", store.ping()).await,
            ),
            None => None,
        }
    }

    /// Calls the allocator; every failure becomes [`AppError::Service`].
    async fn allocate(&self, long_url: &str) -> Result<String, AppError> {
        match self.allocator.allocate_key(long_url).await {
            Ok(key) if !key.is_empty() => Ok(key),
            Ok(_) => Err(AppError::service("key allocator returned an empty key")),
            Err(AppError::Service(detail)) => Err(AppError::Service(detail)),
            Err(other) => Err(AppError::service(format!("key allocation failed: {other}"))),
        }
    }

    async fn publish(&self, record: &ShortenedUrl) {
        let Some(store) = &self.publisher else {
            return;
        };

        let result = with_timeout(
            self.settings.store_timeout,
            "publish shortened url",
            store.put(&record.short_key, &record.long_url),
        )
        .await;

        if let Err(e) = result {
            warn!(
                short_key = %record.short_key,
                error = %e,
                "failed to publish mapping to key-value store"
            );
        }
    }
}

#[async_trait]
impl ShortenerClient for ShortenerService {
    async fn shorten(&self, long_url: &str) -> Result<String, AppError> {
        let record = ShortenerService::shorten(self, long_url).await?;
        Ok(self.short_url(&record))
    }
}
