//! In-process URL repository.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;

use crate::domain::entities::ShortenedUrl;
use crate::domain::repositories::{RedirectCounter, UrlRepository};
use crate::error::AppError;

/// Thread-safe in-memory repository backed by a `DashMap`.
///
/// The entry API makes insert-if-absent atomic per key, matching the
/// conditional insert of the relational store. Used for local runs without
/// PostgreSQL and in tests.
#[derive(Clone, Default)]
pub struct MemoryUrlRepository {
    inner: Arc<DashMap<String, ShortenedUrl>>,
}

impl MemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of the stored record.
    pub fn get(&self, short_key: &str) -> Option<ShortenedUrl> {
        self.inner.get(short_key).map(|r| r.clone())
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

#[async_trait]
impl UrlRepository for MemoryUrlRepository {
    async fn insert_if_absent(&self, url: &ShortenedUrl) -> Result<bool, AppError> {
        match self.inner.entry(url.short_key.clone()) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(url.clone());
                Ok(true)
            }
        }
    }

    async fn find_by_key(&self, short_key: &str) -> Result<Option<ShortenedUrl>, AppError> {
        Ok(self.get(short_key))
    }

    async fn ping(&self) -> bool {
        true
    }
}

#[async_trait]
impl RedirectCounter for MemoryUrlRepository {
    async fn increment_redirects(&self, short_key: &str) -> Result<bool, AppError> {
        match self.inner.get_mut(short_key) {
            Some(mut record) => {
                record.redirects += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, url: &str) -> ShortenedUrl {
        ShortenedUrl::new(key.to_string(), url.to_string())
    }

    #[tokio::test]
    async fn test_insert_then_find() {
        let repo = MemoryUrlRepository::new();

        assert!(repo.insert_if_absent(&record("k1", "http://a.com")).await.unwrap());

        let found = repo.find_by_key("k1").await.unwrap().unwrap();
        assert_eq!(found.long_url, "http://a.com");
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_duplicate_insert_keeps_original() {
        let repo = MemoryUrlRepository::new();
        let original = record("k1", "http://a.com");

        assert!(repo.insert_if_absent(&original).await.unwrap());
        assert!(!repo.insert_if_absent(&record("k1", "http://b.com")).await.unwrap());

        assert_eq!(repo.get("k1").unwrap(), original);
    }

    #[tokio::test]
    async fn test_concurrent_inserts_have_single_winner() {
        let repo = MemoryUrlRepository::new();

        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = repo.clone();
                tokio::spawn(async move {
                    repo.insert_if_absent(&record("race", &format!("http://a.com/{i}")))
                        .await
                        .unwrap()
                })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }

        assert_eq!(winners, 1);
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_increment_redirects() {
        let repo = MemoryUrlRepository::new();
        repo.insert_if_absent(&record("k1", "http://a.com")).await.unwrap();

        assert!(repo.increment_redirects("k1").await.unwrap());
        assert!(repo.increment_redirects("k1").await.unwrap());
        assert!(!repo.increment_redirects("missing").await.unwrap());

        assert_eq!(repo.get("k1").unwrap().redirects, 2);
    }
}
