//! Handler for the review summary.

use axum::{Json, extract::State};

use crate::api::dto::summary::SummaryResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the upcoming review schedule.
///
/// # Endpoint
///
/// `GET /v2/summary`
///
/// # Response
///
/// ```json
/// {
///   "object": "report",
///   "data": {
///     "reviews": {
///       "upcoming": [
///         { "available_at": "2025-06-01T08:30:00.000000Z", "subject_ids": [1, 2] }
///       ]
///     }
///   }
/// }
/// ```
pub async fn summary_handler(
    State(state): State<AppState>,
) -> Result<Json<SummaryResponse>, AppError> {
    let summary = state.catalog_service.summary().await?;
    Ok(Json(summary.into()))
}
