//! Redis-backed key-value store.

use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

use crate::domain::repositories::UrlStore;
use crate::error::AppError;

/// Namespace for every mapping written by the services.
pub const KEY_PREFIX: &str = "url:";

/// Redis store for `short_key -> long_url` mappings.
///
/// Uses `ConnectionManager` for connection reuse and automatic reconnects.
/// Entries carry no TTL. Errors propagate to the caller as
/// [`AppError::Service`].
pub struct RedisUrlStore {
    client: ConnectionManager,
}

impl RedisUrlStore {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Service`] if the URL is invalid, the connection
    /// cannot be established, or the PING fails.
    pub async fn connect(redis_url: &str) -> Result<Self, AppError> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url)?;
        let manager = ConnectionManager::new(client).await?;

        let mut test_conn = manager.clone();
        test_conn.ping::<()>().await?;

        info!("✓ Connected to Redis");

        Ok(Self { client: manager })
    }

    fn build_key(short_key: &str) -> String {
        format!("{KEY_PREFIX}{short_key}")
    }
}

#[async_trait]
impl UrlStore for RedisUrlStore {
    async fn get(&self, short_key: &str) -> Result<Option<String>, AppError> {
        let mut conn = self.client.clone();
        let value: Option<String> = conn.get(Self::build_key(short_key)).await?;

        match &value {
            Some(_) => debug!(short_key, "key-value hit"),
            None => debug!(short_key, "key-value miss"),
        }

        Ok(value)
    }

    async fn put(&self, short_key: &str, long_url: &str) -> Result<(), AppError> {
        let mut conn = self.client.clone();
        conn.set::<_, _, ()>(Self::build_key(short_key), long_url)
            .await?;

        debug!(short_key, "key-value mapping stored");
        Ok(())
    }

    async fn ping(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }
}
