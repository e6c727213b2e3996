//! ShortenedUrl entity, the sole persisted record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Mapping between a short key and the original long URL.
///
/// `short_key` is unique across the relational store. `created_at` is set once
/// at creation; `redirects` only ever grows, and only as a best-effort side
/// effect of resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortenedUrl {
    pub short_key: String,
    pub long_url: String,
    pub created_at: DateTime<Utc>,
    pub redirects: i64,
}

impl ShortenedUrl {
    /// Creates a fresh record with `created_at = now` and a zero redirect count.
    pub fn new(short_key: String, long_url: String) -> Self {
        Self {
            short_key,
            long_url,
            created_at: Utc::now(),
            redirects: 0,
        }
    }

    /// Full public short URL for this record under `base_url`.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.short_key)
    }
}
