//! Handlers for the redirect resolver.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::api::dto::redirect::{RedirectQuery, RedirectResponse};
use crate::error::AppError;
use crate::state::RedirectState;

/// Resolves a short key without redirecting.
///
/// # Endpoint
///
/// `GET /api/v1/redirect?key={short_key}`
///
/// # Errors
///
/// - **400** if `key` is missing or empty
/// - **404** if the key is unknown
/// - **500** if the key-value store is unreachable
pub async fn resolve_handler(
    State(state): State<RedirectState>,
    Query(query): Query<RedirectQuery>,
) -> Result<Json<RedirectResponse>, AppError> {
    let short_key = query
        .key
        .ok_or_else(|| AppError::invalid_input("query parameter `key` is required"))?;

    let original_url = state.redirect.resolve(&short_key).await?;

    Ok(Json(RedirectResponse { original_url }))
}

/// Redirects a short key to its original URL.
///
/// # Endpoint
///
/// `GET /{short_key}`
///
/// Returns **301 Moved Permanently** with `Location` set to the stored URL.
pub async fn redirect_handler(
    State(state): State<RedirectState>,
    Path(short_key): Path<String>,
) -> Result<Response, AppError> {
    let original_url = state.redirect.resolve(&short_key).await?;
    moved_permanently(original_url)
}

/// `301` with a `Location` header.
///
/// `axum::response::Redirect::permanent` answers `308`, so the response is
/// built by hand.
///
/// # Errors
///
/// [`AppError::Service`] if the stored URL is not a valid header value.
pub fn moved_permanently(location: String) -> Result<Response, AppError> {
    let location = HeaderValue::try_from(location).map_err(|e| {
        AppError::service(format!("stored URL is not a valid Location header: {e}"))
    })?;

    Ok((StatusCode::MOVED_PERMANENTLY, [(header::LOCATION, location)]).into_response())
}
