//! Bearer token authentication middleware.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Username resolved from the bearer token, stored as a request extension.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser(pub String);

/// Authenticates requests using tokens minted by `POST /login`.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// On success the resolved username is inserted as an [`AuthenticatedUser`]
/// extension for the handler.
///
/// # Errors
///
/// Returns `401 Unauthorized` (with `WWW-Authenticate: Bearer`) if:
/// - Authorization header is missing or not a bearer credential
/// - Token was never issued by this process
///
/// # Example
///
/// ```rust,ignore
/// use axum::{Router, routing::get, middleware};
/// use crate::api::middleware::auth;
///
/// let protected = Router::new()
///     .route("/revision-session", get(revision_session_handler))
///     .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer));
/// ```
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let username = st.auth_service.resolve_token(&token).await?;

    let mut req = Request::from_parts(parts, body);
    req.extensions_mut().insert(AuthenticatedUser(username));

    Ok(next.run(req).await)
}
