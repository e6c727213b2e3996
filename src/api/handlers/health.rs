//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::HealthResponse;
use crate::state::HealthReport;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health` on every service.
///
/// # Response Codes
///
/// - **200 OK**: All configured components healthy
/// - **503 Service Unavailable**: One or more components report `error`
///
/// Components that are not configured for the service report `disabled` and
/// do not degrade the status.
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "service": "redirect",
///   "version": "0.1.0",
///   "checks": {
///     "database": { "status": "disabled" },
///     "kv_store": { "status": "ok", "message": "Connected" },
///     "redirect_queue": { "status": "ok", "message": "Capacity: 10000" }
///   }
/// }
/// ```
pub async fn health_handler<S: HealthReport>(
    State(state): State<S>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let checks = state.checks().await;
    let all_healthy = checks.values().all(|check| !check.is_error());

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        service: S::SERVICE.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks,
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
