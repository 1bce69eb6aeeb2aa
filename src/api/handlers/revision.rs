//! Handler for the authenticated revision session.

use axum::{Extension, Json, extract::State};

use crate::api::dto::revision::RevisionSessionResponse;
use crate::api::middleware::auth::AuthenticatedUser;
use crate::error::AppError;
use crate::state::AppState;

/// Picks a random subject for the caller to revise.
///
/// # Endpoint
///
/// `GET /v2/revision-session`
///
/// # Authentication
///
/// Requires `Authorization: Bearer <token>`; the username is supplied by
/// [`crate::api::middleware::auth::layer`].
///
/// # Errors
///
/// Returns 401 without a valid token.
/// Returns 404 if the reference table is empty.
pub async fn revision_session_handler(
    State(state): State<AppState>,
    Extension(AuthenticatedUser(user)): Extension<AuthenticatedUser>,
) -> Result<Json<RevisionSessionResponse>, AppError> {
    let subject = state.catalog_service.random_subject().await?;

    tracing::debug!(user = %user, subject_id = subject.id, "revision subject picked");

    Ok(Json(RevisionSessionResponse {
        user,
        subject: subject.into(),
    }))
}
