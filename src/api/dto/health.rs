//! DTOs for health check endpoint.

use serde::Serialize;

/// Health check response with component status.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub checks: HealthChecks,
}

/// Health status for each in-memory store.
#[derive(Debug, Serialize)]
pub struct HealthChecks {
    pub users: CheckStatus,
    pub tokens: CheckStatus,
    pub catalog: CheckStatus,
}

/// Individual component health status.
#[derive(Debug, Serialize)]
pub struct CheckStatus {
    pub status: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl CheckStatus {
    pub fn ok(message: String) -> Self {
        Self {
            status: "ok".to_string(),
            message: Some(message),
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            status: "error".to_string(),
            message: Some(message),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.status == "ok"
    }
}
