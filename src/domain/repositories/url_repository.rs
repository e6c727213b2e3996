//! Repository trait for the relational store of shortened URLs.

use crate::domain::entities::ShortenedUrl;
use crate::error::AppError;
use async_trait::async_trait;

/// Relational persistence of [`ShortenedUrl`] records.
///
/// Uniqueness of `short_key` is enforced here, not by callers: key allocation
/// and persistence are separate network hops and concurrent writers may race
/// for the same key.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgUrlRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::MemoryUrlRepository`] - in-process map
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts the record only if its `short_key` is absent.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if the row was inserted
    /// - `Ok(false)` if a row with the same key already existed; the stored
    ///   row is left untouched
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Service`] on database errors.
    async fn insert_if_absent(&self, url: &ShortenedUrl) -> Result<bool, AppError>;

    /// Finds a record by its short key.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Service`] on database errors.
    async fn find_by_key(&self, short_key: &str) -> Result<Option<ShortenedUrl>, AppError>;

    /// Returns true if the store answers a trivial query.
    async fn ping(&self) -> bool;
}
