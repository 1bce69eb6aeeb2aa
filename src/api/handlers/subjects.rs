//! Handler for subject lookup.

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};
use serde_json::json;

use crate::api::dto::collection::{Collection, Resource};
use crate::api::dto::subject::{SubjectData, SubjectsQuery};
use crate::error::AppError;
use crate::state::AppState;

/// Returns the subjects matching `ids`.
///
/// # Endpoint
///
/// `GET /v2/subjects?ids=1,2,3`
///
/// Unknown ids are skipped; results follow the reference table's order.
/// Without `ids` the whole table is returned.
///
/// # Errors
///
/// Returns 400 if `ids` is not a comma-separated list of integers.
pub async fn subjects_handler(
    State(state): State<AppState>,
    query: Result<Query<SubjectsQuery>, QueryRejection>,
) -> Result<Json<Collection<Resource<SubjectData>>>, AppError> {
    let Query(query) = query.map_err(|e| {
        AppError::bad_request("Invalid ids parameter", json!({ "reason": e.body_text() }))
    })?;

    let subjects = state
        .catalog_service
        .list_subjects(query.ids.as_deref())
        .await?;

    Ok(Json(Collection::single_page(
        subjects.into_iter().map(Resource::from).collect(),
    )))
}
