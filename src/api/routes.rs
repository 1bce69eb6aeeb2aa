//! API route configuration.
//!
//! Routes are split by access policy so the top-level router can attach the
//! right middleware to each group.

use crate::api::handlers::{
    assignments_handler, login_handler, revision_session_handler, signup_handler,
    subjects_handler, summary_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Account routes. Public, but candidates for rate limiting.
///
/// # Endpoints
///
/// - `POST /signup` - Register a username/password pair
/// - `POST /login`  - Exchange credentials for a bearer token
pub fn account_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(signup_handler))
        .route("/login", post(login_handler))
}

/// Read-only catalog routes. Public.
///
/// # Endpoints
///
/// - `GET /assignments` - Every assignment as a single page
/// - `GET /subjects`    - Subjects filtered by `?ids=`
/// - `GET /summary`     - Upcoming review blocks
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/assignments", get(assignments_handler))
        .route("/subjects", get(subjects_handler))
        .route("/summary", get(summary_handler))
}

/// Routes that need a bearer token.
///
/// # Endpoints
///
/// - `GET /revision-session` - Random subject for the caller
pub fn session_routes() -> Router<AppState> {
    Router::new().route("/revision-session", get(revision_session_handler))
}
