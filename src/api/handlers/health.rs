//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health with per-store counts.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All stores readable and the catalog is non-empty
/// - **503 Service Unavailable**: Otherwise
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "users":   { "status": "ok", "message": "3 accounts" },
///     "tokens":  { "status": "ok", "message": "5 sessions" },
///     "catalog": { "status": "ok", "message": "2 subjects" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let users = match state.auth_service.user_count().await {
        Ok(n) => CheckStatus::ok(format!("{n} accounts")),
        Err(e) => CheckStatus::error(format!("User store error: {e}")),
    };

    let tokens = match state.auth_service.token_count().await {
        Ok(n) => CheckStatus::ok(format!("{n} sessions")),
        Err(e) => CheckStatus::error(format!("Token store error: {e}")),
    };

    let catalog = match state.catalog_service.subject_count().await {
        Ok(0) => CheckStatus::error("Catalog is empty".to_string()),
        Ok(n) => CheckStatus::ok(format!("{n} subjects")),
        Err(e) => CheckStatus::error(format!("Catalog error: {e}")),
    };

    let all_healthy = users.is_ok() && tokens.is_ok() && catalog.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            users,
            tokens,
            catalog,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}
