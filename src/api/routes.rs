//! Versioned API route tables, one per internal service.

use crate::api::handlers::{generate_key_handler, resolve_handler, shorten_handler};
use crate::state::{KeygenState, RedirectState, ShortenerState};
use axum::{
    Router,
    routing::{get, post},
};

/// - `GET /v1/generate-key?url=` - Allocate a short key
pub fn keygen_routes() -> Router<KeygenState> {
    Router::new().route("/v1/generate-key", get(generate_key_handler))
}

/// - `POST /v1/shorten` - Validate, allocate, persist and publish
pub fn shortener_routes() -> Router<ShortenerState> {
    Router::new().route("/v1/shorten", post(shorten_handler))
}

/// - `GET /v1/redirect?key=` - Resolve a short key to its URL
pub fn redirect_routes() -> Router<RedirectState> {
    Router::new().route("/v1/redirect", get(resolve_handler))
}
