#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use url_mesh::application::services::{
    GatewayService, KeygenService, RedirectService, ShortenerService, ShortenerSettings,
};
use url_mesh::domain::redirect_event::RedirectEvent;
use url_mesh::domain::redirect_worker::run_redirect_worker;
use url_mesh::domain::repositories::UrlStore;
use url_mesh::error::AppError;
use url_mesh::infrastructure::clients::{
    HttpKeyAllocator, HttpResolverClient, HttpShortenerClient,
};
use url_mesh::infrastructure::kv::MemoryUrlStore;
use url_mesh::infrastructure::persistence::MemoryUrlRepository;
use url_mesh::routes::{gateway_app, keygen_app, redirect_app, shortener_app};
use url_mesh::state::{GatewayState, KeygenState, RedirectState, ShortenerState};

pub const BASE_URL: &str = "http://localhost:8080";
pub const TIMEOUT: Duration = Duration::from_secs(2);

/// Key-value store whose every call fails, as if Redis were unreachable.
pub struct UnreachableStore;

#[async_trait]
impl UrlStore for UnreachableStore {
    async fn get(&self, _short_key: &str) -> Result<Option<String>, AppError> {
        Err(AppError::service("connection refused"))
    }

    async fn put(&self, _short_key: &str, _long_url: &str) -> Result<(), AppError> {
        Err(AppError::service("connection refused"))
    }

    async fn ping(&self) -> bool {
        false
    }
}

pub fn settings(blacklist: &[&str]) -> ShortenerSettings {
    ShortenerSettings {
        base_url: BASE_URL.to_string(),
        blacklist: blacklist.iter().map(|h| h.to_string()).collect(),
        collision_retries: 0,
        store_timeout: TIMEOUT,
    }
}

pub fn keygen_state() -> KeygenState {
    KeygenState::new(Arc::new(KeygenService::new()))
}

/// Shortener with the in-process allocator and in-memory stores.
pub fn shortener_state(
    repo: MemoryUrlRepository,
    store: MemoryUrlStore,
    blacklist: &[&str],
) -> ShortenerState {
    let shortener = ShortenerService::new(
        Arc::new(KeygenService::new()),
        Arc::new(repo),
        settings(blacklist),
    )
    .with_publisher(Arc::new(store));

    ShortenerState::new(Arc::new(shortener))
}

/// Resolver over `store`, with counting into `repo` through a channel.
pub fn redirect_state(
    store: Arc<dyn UrlStore>,
    repo: MemoryUrlRepository,
) -> (RedirectState, mpsc::Receiver<RedirectEvent>) {
    let (tx, rx) = mpsc::channel(100);

    let redirect = RedirectService::new(store, TIMEOUT)
        .with_fallback(Arc::new(repo))
        .with_redirect_events(tx);

    (RedirectState::new(Arc::new(redirect)), rx)
}

/// Serves `app` on an ephemeral loopback port and returns its base URL.
pub async fn spawn_server(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

/// All four services wired over HTTP on loopback.
pub struct Pipeline {
    pub gateway_url: String,
    pub repo: MemoryUrlRepository,
    pub store: MemoryUrlStore,
}

/// Starts keygen, shortener, redirect and gateway. The resolver reads
/// `resolver_store` if given, otherwise the store the shortener publishes to.
pub async fn spawn_pipeline(resolver_store: Option<Arc<dyn UrlStore>>) -> Pipeline {
    let repo = MemoryUrlRepository::new();
    let store = MemoryUrlStore::new();

    let keygen_url = spawn_server(keygen_app(keygen_state())).await;

    let allocator = HttpKeyAllocator::new(keygen_url, TIMEOUT).unwrap();
    let shortener = ShortenerService::new(
        Arc::new(allocator),
        Arc::new(repo.clone()),
        settings(&[]),
    )
    .with_publisher(Arc::new(store.clone()));
    let shortener_url =
        spawn_server(shortener_app(ShortenerState::new(Arc::new(shortener)))).await;

    let resolver_store = resolver_store.unwrap_or_else(|| Arc::new(store.clone()));
    let (tx, rx) = mpsc::channel(100);
    tokio::spawn(run_redirect_worker(rx, Arc::new(repo.clone())));
    let redirect = RedirectService::new(resolver_store, TIMEOUT)
        .with_fallback(Arc::new(repo.clone()))
        .with_redirect_events(tx);
    let redirect_url = spawn_server(redirect_app(RedirectState::new(Arc::new(redirect)))).await;

    let gateway = GatewayService::new(
        Arc::new(HttpShortenerClient::new(shortener_url, TIMEOUT).unwrap()),
        Arc::new(HttpResolverClient::new(redirect_url, TIMEOUT).unwrap()),
    );
    let gateway_url = spawn_server(gateway_app(GatewayState::new(Arc::new(gateway)))).await;

    Pipeline {
        gateway_url,
        repo,
        store,
    }
}

/// HTTP client that does not follow redirects.
pub fn http_client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}
