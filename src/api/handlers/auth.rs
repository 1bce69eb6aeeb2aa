//! Handlers for account signup and login.

use axum::{Json, extract::State, extract::rejection::JsonRejection};
use serde_json::json;
use validator::Validate;

use crate::api::dto::auth::{CredentialsRequest, LoginResponse, SignupResponse};
use crate::error::AppError;
use crate::state::AppState;

fn parse_credentials(
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<CredentialsRequest, AppError> {
    let Json(credentials) = payload.map_err(|e| {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    })?;
    credentials.validate()?;
    Ok(credentials)
}

/// Registers an account.
///
/// # Endpoint
///
/// `POST /signup`
///
/// # Request Body
///
/// ```json
/// { "username": "alice", "password": "secret" }
/// ```
///
/// # Errors
///
/// Returns 400 if the body is malformed or either field is empty.
/// Returns 409 if the username is taken.
pub async fn signup_handler(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<SignupResponse>, AppError> {
    let credentials = parse_credentials(payload)?;

    state
        .auth_service
        .create_account(&credentials.username, &credentials.password)
        .await?;

    Ok(Json(SignupResponse {
        message: "account created".to_string(),
    }))
}

/// Exchanges credentials for a bearer token.
///
/// # Endpoint
///
/// `POST /login`
///
/// # Response
///
/// ```json
/// { "access_token": "3f9c0a..." }
/// ```
///
/// # Errors
///
/// Returns 400 if the body is malformed.
/// Returns 401 if the username is unknown or the password is wrong.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(credentials) = payload.map_err(|e| {
        AppError::bad_request("Invalid request body", json!({ "reason": e.body_text() }))
    })?;

    let access_token = state
        .auth_service
        .authenticate(&credentials.username, &credentials.password)
        .await?;

    Ok(Json(LoginResponse { access_token }))
}
