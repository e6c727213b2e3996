//! Process wiring for each service.
//!
//! Connects the stores a service needs, composes its adapters, spawns
//! background workers and runs the Axum server until SIGINT/SIGTERM.

use crate::application::services::{
    GatewayService, KeygenService, RedirectService, ShortenerService, ShortenerSettings,
};
use crate::config::{Config, ServiceKind, mask_connection_string};
use crate::domain::redirect_worker::run_redirect_worker;
use crate::domain::repositories::UrlStore;
use crate::infrastructure::clients::{HttpKeyAllocator, HttpResolverClient, HttpShortenerClient};
use crate::infrastructure::kv::RedisUrlStore;
use crate::infrastructure::persistence::PgUrlRepository;
use crate::routes::{gateway_router, keygen_router, redirect_router, shortener_router};
use crate::state::{GatewayState, KeygenState, RedirectState, ShortenerState};

use anyhow::{Context, Result};
use axum::extract::Request;
use axum::{Router, ServiceExt};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::signal;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tower_http::normalize_path::NormalizePath;

/// Time the redirect worker gets to drain queued events after shutdown.
const WORKER_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Runs the service selected in `config` until a shutdown signal arrives.
///
/// # Errors
///
/// Returns an error if a required store cannot be reached, migrations fail,
/// the listen address cannot be bound, or the server fails at runtime.
pub async fn run(config: Config) -> Result<()> {
    match config.service {
        ServiceKind::Keygen => {
            let state = KeygenState::new(Arc::new(KeygenService::new()));
            serve(&config, keygen_router(state)).await
        }
        ServiceKind::Shortener => {
            let state = shortener_state(&config).await?;
            serve(&config, shortener_router(state)).await
        }
        ServiceKind::Redirect => {
            let (state, worker) = redirect_state(&config).await?;
            serve(&config, redirect_router(state)).await?;

            if let Some(worker) = worker {
                tracing::info!("Waiting for redirect worker to drain");
                if tokio::time::timeout(WORKER_DRAIN_TIMEOUT, worker)
                    .await
                    .is_err()
                {
                    tracing::warn!("Redirect worker did not drain in time");
                }
            }
            Ok(())
        }
        ServiceKind::Gateway => {
            let state = gateway_state(&config)?;
            serve(&config, gateway_router(state)).await
        }
    }
}

/// Connects the PostgreSQL pool and applies migrations.
pub async fn connect_database(config: &Config, database_url: &str) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .connect(database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(database_url)
            )
        })?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    Ok(pool)
}

async fn shortener_state(config: &Config) -> Result<ShortenerState> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL must be set for the shortener")?;
    let pool = connect_database(config, database_url).await?;
    let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));

    let allocator = Arc::new(HttpKeyAllocator::new(
        config.key_gen_service_url.clone(),
        config.request_timeout(),
    )?);

    let settings = ShortenerSettings {
        base_url: config.base_url.clone(),
        blacklist: config.blacklisted_hosts.clone(),
        collision_retries: config.key_collision_retries,
        store_timeout: config.request_timeout(),
    };

    let mut shortener = ShortenerService::new(allocator, repository, settings);

    // Publishing is an optimisation for the resolver; the resolver falls back
    // to the database, so an unreachable Redis is not fatal here.
    if let Some(redis_url) = &config.redis_url {
        match RedisUrlStore::connect(redis_url).await {
            Ok(store) => {
                tracing::info!("Publishing mappings to Redis");
                shortener = shortener.with_publisher(Arc::new(store));
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Publishing disabled.", e);
            }
        }
    } else {
        tracing::info!("Publishing disabled (no Redis configured)");
    }

    Ok(ShortenerState::new(Arc::new(shortener)))
}

async fn redirect_state(config: &Config) -> Result<(RedirectState, Option<JoinHandle<()>>)> {
    let redis_url = config
        .redis_url
        .as_deref()
        .context("REDIS_URL must be set for the redirect service")?;
    let store: Arc<dyn UrlStore> = Arc::new(
        RedisUrlStore::connect(redis_url)
            .await
            .context("Failed to connect to Redis")?,
    );

    let mut redirect = RedirectService::new(store, config.request_timeout());
    let mut worker = None;

    if let Some(database_url) = &config.database_url {
        let pool = connect_database(config, database_url).await?;
        let repository = Arc::new(PgUrlRepository::new(Arc::new(pool)));

        let (tx, rx) = mpsc::channel(config.redirect_queue_capacity);
        worker = Some(tokio::spawn(run_redirect_worker(rx, repository.clone())));

        redirect = redirect
            .with_fallback(repository)
            .with_redirect_events(tx);
    } else {
        tracing::info!("Database fallback and redirect counting disabled");
    }

    Ok((RedirectState::new(Arc::new(redirect)), worker))
}

fn gateway_state(config: &Config) -> Result<GatewayState> {
    let shortener_url = config
        .shortener_service_url
        .as_deref()
        .context("SHORTENER_SERVICE_URL must be set for the gateway")?;
    let redirect_url = config
        .redirect_service_url
        .as_deref()
        .context("REDIRECT_SERVICE_URL must be set for the gateway")?;

    let shortener = Arc::new(HttpShortenerClient::new(
        shortener_url,
        config.request_timeout(),
    )?);
    let resolver = Arc::new(HttpResolverClient::new(
        redirect_url,
        config.request_timeout(),
    )?);

    Ok(GatewayState::new(Arc::new(GatewayService::new(
        shortener, resolver,
    ))))
}

async fn serve(config: &Config, app: NormalizePath<Router>) -> Result<()> {
    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("{} listening on http://{addr}", config.service);

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("{} stopped", config.service);
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!("Failed to listen for SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
