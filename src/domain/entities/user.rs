//! Account entity for the provider's signup/login flow.

/// A registered account.
///
/// `password_hash` is the encoded salted hash produced by
/// [`crate::application::services::AuthService`]; the raw password is never stored.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    pub password_hash: String,
}

/// Input data for registering an account.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
}
