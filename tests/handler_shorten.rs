mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{Duration, Utc};
use serde_json::json;
use std::sync::Arc;
use url_mesh::application::services::{KeygenService, SaltSource, ShortenerService};
use url_mesh::domain::entities::ShortenedUrl;
use url_mesh::domain::repositories::{UrlRepository, UrlStore};
use url_mesh::infrastructure::kv::MemoryUrlStore;
use url_mesh::infrastructure::persistence::MemoryUrlRepository;
use url_mesh::routes::shortener_app;
use url_mesh::state::ShortenerState;

/// Salt that never changes, so every allocation for a URL yields the same key.
struct FixedSalt;

impl SaltSource for FixedSalt {
    fn nanos(&self) -> i64 {
        1_700_000_000_000_000_000
    }

    fn nonce(&self) -> u32 {
        42
    }
}

fn server(
    repo: &MemoryUrlRepository,
    store: &MemoryUrlStore,
    blacklist: &[&str],
) -> TestServer {
    let state = common::shortener_state(repo.clone(), store.clone(), blacklist);
    TestServer::new(shortener_app(state)).unwrap()
}

#[tokio::test]
async fn test_shorten_success_persists_and_publishes() {
    let repo = MemoryUrlRepository::new();
    let store = MemoryUrlStore::new();
    let server = server(&repo, &store, &[]);

    let response = server
        .post("/api/v1/shorten")
        .json(&json!({ "url": "https://example.com/a" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let json = response.json::<serde_json::Value>();
    let short_url = json["short_url"].as_str().unwrap();
    let key = short_url
        .strip_prefix(&format!("{}/", common::BASE_URL))
        .unwrap();

    let record = repo.get(key).unwrap();
    assert_eq!(record.long_url, "https://example.com/a");
    assert_eq!(record.redirects, 0);

    // Publishing happens before the response is sent.
    assert_eq!(
        store.get(key).await.unwrap().as_deref(),
        Some("https://example.com/a")
    );
}

#[tokio::test]
async fn test_shorten_keeps_url_verbatim() {
    let repo = MemoryUrlRepository::new();
    let store = MemoryUrlStore::new();
    let server = server(&repo, &store, &[]);

    let response = server
        .post("/api/v1/shorten")
        .json(&json!({ "url": "http://a.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let json = response.json::<serde_json::Value>();
    let key = json["short_url"].as_str().unwrap().rsplit('/').next().unwrap();

    assert_eq!(repo.get(key).unwrap().long_url, "http://a.com");
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let repo = MemoryUrlRepository::new();
    let server = server(&repo, &MemoryUrlStore::new(), &[]);

    let response = server
        .post("/api/v1/shorten")
        .json(&json!({ "url": "not a url" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_url");
    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_shorten_unsupported_scheme() {
    let server = server(&MemoryUrlRepository::new(), &MemoryUrlStore::new(), &[]);

    let response = server
        .post("/api/v1/shorten")
        .json(&json!({ "url": "ftp://files.example.com/x" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_shorten_empty_url() {
    let server = server(&MemoryUrlRepository::new(), &MemoryUrlStore::new(), &[]);

    let response = server
        .post("/api/v1/shorten")
        .json(&json!({ "url": "" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_shorten_missing_url_field() {
    let server = server(&MemoryUrlRepository::new(), &MemoryUrlStore::new(), &[]);

    let response = server
        .post("/api/v1/shorten")
        .json(&json!({ "link": "https://example.com" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_shorten_blacklisted_host_and_subdomain() {
    let repo = MemoryUrlRepository::new();
    let server = server(&repo, &MemoryUrlStore::new(), &["evil.com"]);

    for url in ["https://evil.com/x", "https://cdn.EVIL.com/y"] {
        let response = server
            .post("/api/v1/shorten")
            .json(&json!({ "url": url }))
            .await;

        response.assert_status(StatusCode::FORBIDDEN);
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "blacklisted_url");
    }

    assert!(repo.is_empty());
}

#[tokio::test]
async fn test_shorten_same_url_twice_gets_two_keys() {
    let repo = MemoryUrlRepository::new();
    let server = server(&repo, &MemoryUrlStore::new(), &[]);

    for _ in 0..2 {
        server
            .post("/api/v1/shorten")
            .json(&json!({ "url": "https://example.com" }))
            .await
            .assert_status(StatusCode::CREATED);
    }

    assert_eq!(repo.len(), 2);
}

#[tokio::test]
async fn test_shorten_rejects_control_characters() {
    let repo = MemoryUrlRepository::new();
    let store = MemoryUrlStore::new();
    let server = server(&repo, &store, &[]);

    let response = server
        .post("/api/v1/shorten")
        .json(&json!({ "url": "http://a.com/a\nb" }))
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "invalid_url");
    assert!(repo.is_empty());
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_shorten_existing_key_is_conflict_and_keeps_original() {
    let keygen = KeygenService::with_salt_source(Arc::new(FixedSalt));
    let key = keygen.generate_key("https://new.example.com").unwrap();

    let repo = MemoryUrlRepository::new();
    let mut original = ShortenedUrl::new(key.clone(), "https://first.example.com".to_string());
    original.created_at = Utc::now() - Duration::days(1);
    original.redirects = 7;
    assert!(repo.insert_if_absent(&original).await.unwrap());

    let store = MemoryUrlStore::new();
    let shortener = ShortenerService::new(
        Arc::new(keygen),
        Arc::new(repo.clone()),
        common::settings(&[]),
    )
    .with_publisher(Arc::new(store.clone()));
    let server =
        TestServer::new(shortener_app(ShortenerState::new(Arc::new(shortener)))).unwrap();

    let response = server
        .post("/api/v1/shorten")
        .json(&json!({ "url": "https://new.example.com" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "duplicated_key");

    assert_eq!(repo.len(), 1);
    assert_eq!(repo.get(&key).unwrap(), original);
    assert!(store.is_empty());
}
