//! Top-level routers, one per service.
//!
//! # Route Structure
//!
//! | Service | Routes |
//! |---|---|
//! | gateway | `POST /shorten`, `GET /shorten?url=`, `GET /{short_key}`, `GET /health` |
//! | shortener | `POST /api/v1/shorten`, `GET /health` |
//! | keygen | `GET /api/v1/generate-key?url=`, `GET /health` |
//! | redirect | `GET /api/v1/redirect?key=`, `GET /{short_key}`, `GET /health` |
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging tagged with the service
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{gateway, health_handler, redirect_handler};
use crate::api::middleware::tracing;
use crate::state::{GatewayState, HealthReport, KeygenState, RedirectState, ShortenerState};
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

pub fn gateway_router(state: GatewayState) -> NormalizePath<Router> {
    normalize(gateway_app(state))
}

pub fn shortener_router(state: ShortenerState) -> NormalizePath<Router> {
    normalize(shortener_app(state))
}

pub fn keygen_router(state: KeygenState) -> NormalizePath<Router> {
    normalize(keygen_app(state))
}

pub fn redirect_router(state: RedirectState) -> NormalizePath<Router> {
    normalize(redirect_app(state))
}

/// Gateway routes with state and tracing, without path normalization.
pub fn gateway_app(state: GatewayState) -> Router {
    let router = Router::new()
        .route(
            "/shorten",
            get(gateway::shorten_query_handler).post(gateway::shorten_handler),
        )
        .route("/{short_key}", get(gateway::redirect_handler));

    finish(router, state)
}

pub fn shortener_app(state: ShortenerState) -> Router {
    finish(
        Router::new().nest("/api", api::routes::shortener_routes()),
        state,
    )
}

pub fn keygen_app(state: KeygenState) -> Router {
    finish(Router::new().nest("/api", api::routes::keygen_routes()), state)
}

pub fn redirect_app(state: RedirectState) -> Router {
    let router = Router::new()
        .route("/{short_key}", get(redirect_handler))
        .nest("/api", api::routes::redirect_routes());

    finish(router, state)
}

/// Adds `/health`, binds state and wraps the tracing layer.
fn finish<S: HealthReport>(router: Router<S>, state: S) -> Router {
    router
        .route("/health", get(health_handler::<S>))
        .with_state(state)
        .layer(tracing::layer(S::SERVICE))
}

fn normalize(router: Router) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router)
}
