//! Error taxonomy shared by all four services.
//!
//! Every component returns the most specific [`AppError`] it can determine.
//! Infrastructure failures (database, key-value store, HTTP transport, timeouts)
//! collapse into [`AppError::Service`]; their detail is logged where the
//! conversion happens and never serialized into a response body.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

/// Message returned to clients for every [`AppError::Service`].
pub const GENERIC_SERVICE_MESSAGE: &str = "internal server error";

/// JSON error envelope: `{"error": {"code": ..., "message": ...}}`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorInfo,
}

/// Machine-readable code plus human-readable message.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorInfo {
    pub code: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Caller supplied an empty or malformed value (key, query, body).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The long URL is empty or not an absolute http(s) URL.
    #[error("URL not valid: {0}")]
    InvalidUrl(String),

    /// The long URL points at a host rejected by policy.
    #[error("URL rejected: {0}")]
    BlacklistedUrl(String),

    /// The allocated short key is already taken in the relational store.
    #[error("short key already taken: {0}")]
    DuplicatedKey(String),

    /// The short key does not resolve to any stored URL.
    #[error("URL not found: {0}")]
    UrlNotFound(String),

    /// Infrastructure or network failure. Opaque to clients.
    #[error("service error: {0}")]
    Service(String),
}

impl AppError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_url(message: impl Into<String>) -> Self {
        Self::InvalidUrl(message.into())
    }

    pub fn service(message: impl Into<String>) -> Self {
        Self::Service(message.into())
    }

    /// Stable machine-readable code used in error bodies.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput(_) => "invalid_input",
            Self::InvalidUrl(_) => "invalid_url",
            Self::BlacklistedUrl(_) => "blacklisted_url",
            Self::DuplicatedKey(_) => "duplicated_key",
            Self::UrlNotFound(_) => "url_not_found",
            Self::Service(_) => "service_error",
        }
    }

    /// HTTP status for this condition.
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidInput(_) | Self::InvalidUrl(_) => StatusCode::BAD_REQUEST,
            Self::BlacklistedUrl(_) => StatusCode::FORBIDDEN,
            Self::DuplicatedKey(_) => StatusCode::CONFLICT,
            Self::UrlNotFound(_) => StatusCode::NOT_FOUND,
            Self::Service(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Builds the client-facing error info.
    ///
    /// Service errors are reduced to [`GENERIC_SERVICE_MESSAGE`].
    pub fn to_error_info(&self) -> ErrorInfo {
        let message = match self {
            Self::Service(_) => GENERIC_SERVICE_MESSAGE.to_string(),
            other => other.to_string(),
        };

        ErrorInfo {
            code: self.code().to_string(),
            message,
        }
    }

    /// Rebuilds an error from a downstream service's error body.
    ///
    /// The `code` decides the variant; an unknown code falls back to the
    /// HTTP status. Anything unrecognised becomes [`AppError::Service`].
    pub fn from_error_info(status: StatusCode, info: &ErrorInfo) -> Self {
        let detail = |prefix: &str| {
            info.message
                .strip_prefix(prefix)
                .unwrap_or(info.message.as_str())
                .to_string()
        };

        match (info.code.as_str(), status) {
            ("invalid_input", _) => Self::InvalidInput(detail("invalid input: ")),
            ("invalid_url", _) => Self::InvalidUrl(detail("URL not valid: ")),
            ("blacklisted_url", _) | (_, StatusCode::FORBIDDEN) => {
                Self::BlacklistedUrl(detail("URL rejected: "))
            }
            ("duplicated_key", _) | (_, StatusCode::CONFLICT) => {
                Self::DuplicatedKey(detail("short key already taken: "))
            }
            ("url_not_found", _) | (_, StatusCode::NOT_FOUND) => {
                Self::UrlNotFound(detail("URL not found: "))
            }
            (_, StatusCode::BAD_REQUEST) => Self::InvalidUrl(info.message.clone()),
            _ => Self::Service(format!("downstream returned {status}: {}", info.message)),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Self::Service(detail) = &self {
            tracing::error!(detail = %detail, "request failed with service error");
        }

        let body = ErrorBody {
            error: self.to_error_info(),
        };

        (self.status(), Json(body)).into_response()
    }
}

impl From<sqlx::Error> for AppError {
    fn from(e: sqlx::Error) -> Self {
        tracing::error!(error = %e, "database error");
        Self::service(format!("database error: {e}"))
    }
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        tracing::error!(error = %e, "key-value store error");
        Self::service(format!("key-value store error: {e}"))
    }
}

impl From<reqwest::Error> for AppError {
    fn from(e: reqwest::Error) -> Self {
        tracing::error!(error = %e, "downstream request failed");
        Self::service(format!("downstream request failed: {e}"))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(e: validator::ValidationErrors) -> Self {
        Self::InvalidUrl(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            AppError::invalid_input("x").status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(AppError::invalid_url("x").status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            AppError::BlacklistedUrl("x".into()).status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            AppError::DuplicatedKey("x".into()).status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::UrlNotFound("x".into()).status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::service("x").status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_service_error_hides_detail() {
        let err = AppError::service("connection refused to 10.0.0.3:5432");
        let info = err.to_error_info();

        assert_eq!(info.code, "service_error");
        assert_eq!(info.message, GENERIC_SERVICE_MESSAGE);
        assert!(!info.message.contains("10.0.0.3"));
    }

    #[test]
    fn test_from_error_info_round_trips_variant() {
        let original = AppError::BlacklistedUrl("evil.com".into());
        let rebuilt = AppError::from_error_info(original.status(), &original.to_error_info());

        assert!(matches!(rebuilt, AppError::BlacklistedUrl(ref host) if host == "evil.com"));
    }

    #[test]
    fn test_from_error_info_unknown_code_uses_status() {
        let info = ErrorInfo {
            code: "teapot".into(),
            message: "nope".into(),
        };

        assert!(matches!(
            AppError::from_error_info(StatusCode::NOT_FOUND, &info),
            AppError::UrlNotFound(_)
        ));
        assert!(matches!(
            AppError::from_error_info(StatusCode::BAD_GATEWAY, &info),
            AppError::Service(_)
        ));
    }

    #[test]
    fn test_caller_errors_keep_message() {
        let info = AppError::BlacklistedUrl("evil.com".into()).to_error_info();
        assert_eq!(info.code, "blacklisted_url");
        assert!(info.message.contains("evil.com"));
    }
}
