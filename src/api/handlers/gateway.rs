//! Handlers for the public gateway.

use axum::{
    Json,
    extract::{Path, Query, State, rejection::JsonRejection},
    response::Response,
};

use super::redirect::moved_permanently;
use crate::api::dto::shorten::{ShortenQuery, ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::GatewayState;

/// Shortens a URL through the shortener service.
///
/// # Endpoint
///
/// `POST /shorten` with `{"url": "..."}`
///
/// A body without `url` is rejected with **400** before any downstream call.
/// Downstream conditions keep their status (400, 403, 409); anything else is
/// **500**.
pub async fn shorten_handler(
    State(state): State<GatewayState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<Json<ShortenResponse>, AppError> {
    let Json(request) = payload.map_err(|e| AppError::invalid_url(e.body_text()))?;

    let short_url = state.gateway.shorten_url(&request.url).await?;

    Ok(Json(ShortenResponse { short_url }))
}

/// Query-string variant of [`shorten_handler`].
///
/// # Endpoint
///
/// `GET /shorten?url=...`
pub async fn shorten_query_handler(
    State(state): State<GatewayState>,
    Query(query): Query<ShortenQuery>,
) -> Result<Json<ShortenResponse>, AppError> {
    let long_url = query
        .url
        .ok_or_else(|| AppError::invalid_url("query parameter `url` is required"))?;

    let short_url = state.gateway.shorten_url(&long_url).await?;

    Ok(Json(ShortenResponse { short_url }))
}

/// Redirects a short key through the redirect resolver.
///
/// # Endpoint
///
/// `GET /{short_key}` → **301**, or **404** for an unknown key.
pub async fn redirect_handler(
    State(state): State<GatewayState>,
    Path(short_key): Path<String>,
) -> Result<Response, AppError> {
    let original_url = state.gateway.redirect_url(&short_key).await?;
    moved_permanently(original_url)
}
