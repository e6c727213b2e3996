//! Handler for the shortener (orchestrator) endpoint.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::shorten::{ShortenRequest, ShortenResponse};
use crate::error::AppError;
use crate::state::ShortenerState;

/// Creates a shortened URL.
///
/// # Endpoint
///
/// `POST /api/v1/shorten`
///
/// # Request Body
///
/// ```json
/// { "url": "https://example.com/very/long/path" }
/// ```
///
/// # Response
///
/// **201 Created**
///
/// ```json
/// { "short_url": "http://localhost:8080/3yQ8tKcNw1A" }
/// ```
///
/// # Errors
///
/// - **400** body missing `url`, empty or malformed URL
/// - **403** blacklisted host
/// - **409** allocated key already taken
/// - **500** allocator or store failure
pub async fn shorten_handler(
    State(state): State<ShortenerState>,
    payload: Result<Json<ShortenRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortenResponse>), AppError> {
    let Json(request) = payload.map_err(|e| AppError::invalid_input(e.body_text()))?;
    request.validate()?;

    let record = state.shortener.shorten(&request.url).await?;

    Ok((
        StatusCode::CREATED,
        Json(ShortenResponse {
            short_url: state.shortener.short_url(&record),
        }),
    ))
}
