//! PostgreSQL implementation of the URL repository and redirect counter.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::ShortenedUrl;
use crate::domain::repositories::{RedirectCounter, UrlRepository};
use crate::error::AppError;

/// PostgreSQL repository for shortened URLs.
///
/// Key uniqueness is enforced by the `urls.short_key` primary key; inserts use
/// `ON CONFLICT DO NOTHING` and report a duplicate through the affected row
/// count instead of a constraint error.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

#[derive(Debug, sqlx::FromRow)]
struct UrlRow {
    short_key: String,
    long_url: String,
    created_at: DateTime<Utc>,
    redirects: i64,
}

impl From<UrlRow> for ShortenedUrl {
    fn from(row: UrlRow) -> Self {
        Self {
            short_key: row.short_key,
            long_url: row.long_url,
            created_at: row.created_at,
            redirects: row.redirects,
        }
    }
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }

    /// Total number of stored URLs.
    pub async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(count)
    }

    /// Sum of all redirect counters.
    pub async fn total_redirects(&self) -> Result<i64, AppError> {
        let total: Option<i64> = sqlx::query_scalar("SELECT SUM(redirects)::BIGINT FROM urls")
            .fetch_one(self.pool.as_ref())
            .await?;
        Ok(total.unwrap_or(0))
    }

    /// URLs ordered by redirect count, most redirected first.
    pub async fn top_by_redirects(&self, limit: i64) -> Result<Vec<ShortenedUrl>, AppError> {
        let rows = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT short_key, long_url, created_at, redirects
            FROM urls
            ORDER BY redirects DESC, created_at DESC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(ShortenedUrl::from).collect())
    }
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert_if_absent(&self, url: &ShortenedUrl) -> Result<bool, AppError> {
        let result = sqlx::query(
            r#"
            INSERT INTO urls (short_key, long_url, created_at, redirects)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (short_key) DO NOTHING
            "#,
        )
        .bind(&url.short_key)
        .bind(&url.long_url)
        .bind(url.created_at)
        .bind(url.redirects)
        .execute(self.pool.as_ref())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn find_by_key(&self, short_key: &str) -> Result<Option<ShortenedUrl>, AppError> {
        let row = sqlx::query_as::<_, UrlRow>(
            r#"
            SELECT short_key, long_url, created_at, redirects
            FROM urls
            WHERE short_key = $1
            "#,
        )
        .bind(short_key)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortenedUrl::from))
    }

    async fn ping(&self) -> bool {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await
            .is_ok()
    }
}

#[async_trait]
impl RedirectCounter for PgUrlRepository {
    async fn increment_redirects(&self, short_key: &str) -> Result<bool, AppError> {
        let result = sqlx::query("UPDATE urls SET redirects = redirects + 1 WHERE short_key = $1")
            .bind(short_key)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() == 1)
    }
}
