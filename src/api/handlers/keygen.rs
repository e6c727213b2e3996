//! Handler for the key allocator.

use axum::{
    Json,
    extract::{Query, State},
};

use crate::api::dto::keygen::{GenerateKeyQuery, GenerateKeyResponse};
use crate::error::AppError;
use crate::state::KeygenState;

/// Generates a short key for a long URL.
///
/// # Endpoint
///
/// `GET /api/v1/generate-key?url={long_url}`
///
/// # Errors
///
/// - **400** if `url` is missing or empty
/// - **500** on any other failure
pub async fn generate_key_handler(
    State(state): State<KeygenState>,
    Query(query): Query<GenerateKeyQuery>,
) -> Result<Json<GenerateKeyResponse>, AppError> {
    let long_url = query
        .url
        .ok_or_else(|| AppError::invalid_input("query parameter `url` is required"))?;

    let short_key = state.keygen.generate_key(&long_url)?;

    Ok(Json(GenerateKeyResponse { short_key }))
}
