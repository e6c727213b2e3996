//! Per-service application state.
//!
//! Each binary mode runs one router with one state type. States are cheap to
//! clone (everything sits behind `Arc`) and implement [`HealthReport`] so the
//! shared `/health` handler can probe what that service depends on.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::dto::health::CheckStatus;
use crate::application::services::{
    GatewayService, KeygenService, RedirectService, ShortenerService,
};

/// Component checks reported by `GET /health`.
#[async_trait]
pub trait HealthReport: Clone + Send + Sync + 'static {
    /// Service name included in the health response.
    const SERVICE: &'static str;

    async fn checks(&self) -> BTreeMap<String, CheckStatus>;
}

#[derive(Clone)]
pub struct KeygenState {
    pub keygen: Arc<KeygenService>,
}

impl KeygenState {
    pub fn new(keygen: Arc<KeygenService>) -> Self {
        Self { keygen }
    }
}

#[async_trait]
impl HealthReport for KeygenState {
    const SERVICE: &'static str = "keygen";

    async fn checks(&self) -> BTreeMap<String, CheckStatus> {
        BTreeMap::new()
    }
}

#[derive(Clone)]
pub struct ShortenerState {
    pub shortener: Arc<ShortenerService>,
}

impl ShortenerState {
    pub fn new(shortener: Arc<ShortenerService>) -> Self {
        Self { shortener }
    }
}

#[async_trait]
impl HealthReport for ShortenerState {
    const SERVICE: &'static str = "shortener";

    async fn checks(&self) -> BTreeMap<String, CheckStatus> {
        let mut checks = BTreeMap::new();

        let database = if self.shortener.repository_healthy().await {
            CheckStatus::ok("Connected")
        } else {
            CheckStatus::error("Database unreachable")
        };
        checks.insert("database".to_string(), database);

        let kv_store = match self.shortener.publisher_healthy().await {
            Some(true) => CheckStatus::ok("Connected"),
            Some(false) => CheckStatus::error("Key-value store unreachable"),
            None => CheckStatus::disabled(),
        };
        checks.insert("kv_store".to_string(), kv_store);

        checks
    }
}

#[derive(Clone)]
pub struct RedirectState {
    pub redirect: Arc<RedirectService>,
}

impl RedirectState {
    pub fn new(redirect: Arc<RedirectService>) -> Self {
        Self { redirect }
    }
}

#[async_trait]
impl HealthReport for RedirectState {
    const SERVICE: &'static str = "redirect";

    async fn checks(&self) -> BTreeMap<String, CheckStatus> {
        let mut checks = BTreeMap::new();

        let kv_store = if self.redirect.store_healthy().await {
            CheckStatus::ok("Connected")
        } else {
            CheckStatus::error("Key-value store unreachable")
        };
        checks.insert("kv_store".to_string(), kv_store);

        let database = match self.redirect.fallback_healthy().await {
            Some(true) => CheckStatus::ok("Connected"),
            Some(false) => CheckStatus::error("Database unreachable"),
            None => CheckStatus::disabled(),
        };
        checks.insert("database".to_string(), database);

        let queue = match self.redirect.redirect_queue() {
            Some((true, capacity)) => CheckStatus::ok(format!("Capacity: {capacity}")),
            Some((false, _)) => CheckStatus::error("Redirect queue is closed"),
            None => CheckStatus::disabled(),
        };
        checks.insert("redirect_queue".to_string(), queue);

        checks
    }
}

#[derive(Clone)]
pub struct GatewayState {
    pub gateway: Arc<GatewayService>,
}

impl GatewayState {
    pub fn new(gateway: Arc<GatewayService>) -> Self {
        Self { gateway }
    }
}

#[async_trait]
impl HealthReport for GatewayState {
    const SERVICE: &'static str = "gateway";

    async fn checks(&self) -> BTreeMap<String, CheckStatus> {
        BTreeMap::new()
    }
}
