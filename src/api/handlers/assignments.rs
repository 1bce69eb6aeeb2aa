//! Handler for the assignment collection.

use axum::{Json, extract::State};

use crate::api::dto::assignment::AssignmentData;
use crate::api::dto::collection::{Collection, Resource};
use crate::error::AppError;
use crate::state::AppState;

/// Lists every assignment.
///
/// # Endpoint
///
/// `GET /v2/assignments`
///
/// Query parameters such as `subject_types` or
/// `immediately_available_for_lessons` are accepted and ignored; the mock
/// always returns the full fixture as a single page.
pub async fn assignments_handler(
    State(state): State<AppState>,
) -> Result<Json<Collection<Resource<AssignmentData>>>, AppError> {
    let assignments = state.catalog_service.list_assignments().await?;

    Ok(Json(Collection::single_page(
        assignments.into_iter().map(Resource::from).collect(),
    )))
}
