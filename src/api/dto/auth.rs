//! DTOs for the signup and login endpoints.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Body of `POST /signup` and `POST /login`.
///
/// Missing fields deserialize as empty strings so that they fail validation
/// with `400` instead of being rejected by the JSON extractor.
#[derive(Debug, Deserialize, Validate)]
pub struct CredentialsRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "username is required"))]
    pub username: String,

    #[serde(default)]
    #[validate(length(min = 1, message = "password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
}
