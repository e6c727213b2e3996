//! Short key allocation.
//!
//! A key is `base58(sha256(long_url + salt)[..8])`, left-padded to a fixed
//! width. The salt mixes the current time in nanoseconds with a random nonce,
//! so submitting the same URL twice yields different keys. Uniqueness is not
//! checked here; the relational store's conditional insert enforces it.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use sha2::{Digest, Sha256};
use tracing::instrument;

use crate::domain::clients::KeyAllocator;
use crate::error::AppError;

/// Number of digest bytes kept before encoding.
pub const TRUNCATED_DIGEST_BYTES: usize = 8;

/// Width of every generated key. Eight bytes never need more than 11 base58 digits.
pub const KEY_LENGTH: usize = 11;

/// Upper bound (exclusive) of the random salt component.
const NONCE_BOUND: u32 = 10_000;

/// The Bitcoin base58 alphabet used for keys.
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Source of the per-call salt.
///
/// Production code uses [`SystemSalt`]; tests substitute a fixed source to make
/// key generation deterministic.
pub trait SaltSource: Send + Sync {
    /// Current time in nanoseconds.
    fn nanos(&self) -> i64;

    /// Random integer in `0..10000`.
    fn nonce(&self) -> u32;
}

/// Wall clock plus thread-local RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemSalt;

impl SaltSource for SystemSalt {
    fn nanos(&self) -> i64 {
        let now = Utc::now();
        now.timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros().saturating_mul(1_000))
    }

    fn nonce(&self) -> u32 {
        rand::rng().random_range(0..NONCE_BOUND)
    }
}

/// Stateless key generator.
pub struct KeygenService {
    salt: Arc<dyn SaltSource>,
}

impl KeygenService {
    /// Creates a generator salted from the system clock and RNG.
    pub fn new() -> Self {
        Self::with_salt_source(Arc::new(SystemSalt))
    }

    /// Creates a generator with an injected salt source.
    pub fn with_salt_source(salt: Arc<dyn SaltSource>) -> Self {
        Self { salt }
    }

    /// Generates a short key for `long_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidInput`] if `long_url` is empty.
    pub fn generate_key(&self, long_url: &str) -> Result<String, AppError> {
        if long_url.is_empty() {
            return Err(AppError::invalid_input("url cannot be empty"));
        }

        let salted = format!("{}{}-{}", long_url, self.salt.nanos(), self.salt.nonce());
        let digest = Sha256::digest(salted.as_bytes());

        Ok(encode_key(&digest[..TRUNCATED_DIGEST_BYTES]))
    }
}

impl Default for KeygenService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl KeyAllocator for KeygenService {
    #[instrument(skip(self, long_url))]
    async fn allocate_key(&self, long_url: &str) -> Result<String, AppError> {
        self.generate_key(long_url)
    }
}

/// Base58-encodes `bytes` and left-pads with the zero digit to [`KEY_LENGTH`].
fn encode_key(bytes: &[u8]) -> String {
    let encoded = bs58::encode(bytes).into_string();
    format!("{:1>width$}", encoded, width = KEY_LENGTH)
}
