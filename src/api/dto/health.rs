//! DTOs for health check endpoint.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Health check response with component status.
///
/// `checks` is keyed by component name (`database`, `kv_store`,
/// `redirect_queue`, ...); each service reports only what it depends on.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub checks: BTreeMap<String, CheckStatus>,
}

/// Individual component health status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            status: "ok".to_string(),
            message: Some(message.into()),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message.into()),
        }
    }

    /// Optional component that is not configured. Does not degrade health.
    pub fn disabled() -> Self {
        Self {
            status: "disabled".to_string(),
            message: None,
        }
    }

    pub fn is_error(&self) -> bool {
        self.status == "error"
    }
}
