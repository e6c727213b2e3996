//! In-process key-value store.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::domain::repositories::UrlStore;
use crate::error::AppError;

/// `DashMap`-backed store used when no Redis is configured and in tests.
///
/// Clones share the same map, so one instance can be handed to both the
/// shortener (writer) and the resolver (reader) in a single process.
#[derive(Clone, Default)]
pub struct MemoryUrlStore {
    inner: Arc<DashMap<String, String>>,
}

impl MemoryUrlStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl UrlStore for MemoryUrlStore {
    async fn get(&self, short_key: &str) -> Result<Option<String>, AppError> {
        Ok(self.inner.get(short_key).map(|v| v.value().clone()))
    }

    async fn put(&self, short_key: &str, long_url: &str) -> Result<(), AppError> {
        self.inner.insert(short_key.to_string(), long_url.to_string());
        Ok(())
    }

    async fn ping(&self) -> bool {
        true
    }
}
