//! Account and bearer-token service.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD_NO_PAD;
use hmac::{Hmac, Mac};
use serde_json::json;
use sha2::Sha256;
use std::sync::Arc;

use crate::domain::entities::NewUser;
use crate::domain::repositories::{TokenRepository, UserRepository};
use crate::error::AppError;

type HmacSha256 = Hmac<Sha256>;

/// Random bytes per session token (hex encoded to 32 characters).
const TOKEN_BYTES: usize = 16;

/// Random bytes of salt per stored password.
const SALT_BYTES: usize = 16;

/// Service for signup, login and bearer-token resolution.
///
/// Passwords are stored as `base64(salt)$hex(HMAC-SHA256(salt, password))`.
/// Session tokens are hashed with HMAC-SHA256 keyed by `signing_secret` before
/// they reach the token repository, so the map never holds a usable token.
pub struct AuthService<U: UserRepository, T: TokenRepository> {
    users: Arc<U>,
    tokens: Arc<T>,
    signing_secret: String,
}

impl<U: UserRepository, T: TokenRepository> AuthService<U, T> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - account repository
    /// - `tokens` - issued-token repository
    /// - `signing_secret` - HMAC key for token hashes
    pub fn new(users: Arc<U>, tokens: Arc<T>, signing_secret: String) -> Self {
        Self {
            users,
            tokens,
            signing_secret,
        }
    }

    /// Hashes a raw token with HMAC-SHA256 using the server signing secret.
    ///
    /// Returns a 64-character lowercase hex-encoded MAC.
    fn hash_token(&self, token: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.signing_secret.as_bytes())
            .expect("HMAC accepts any key length");
        mac.update(token.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    /// Registers a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if either field is empty.
    /// Returns [`AppError::Conflict`] if the username is taken.
    pub async fn create_account(&self, username: &str, password: &str) -> Result<(), AppError> {
        if username.is_empty() || password.is_empty() {
            return Err(AppError::bad_request(
                "username and password required",
                json!({}),
            ));
        }

        if self.users.find_by_username(username).await?.is_some() {
            return Err(AppError::conflict(
                "User already exists",
                json!({ "username": username }),
            ));
        }

        let password_hash = hash_password(password)?;

        self.users
            .insert(NewUser {
                username: username.to_string(),
                password_hash,
            })
            .await?;

        tracing::info!(username, "account created");
        Ok(())
    }

    /// Checks credentials and mints a session token.
    ///
    /// The token stays valid until the process exits.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the user is unknown or the password
    /// does not match. No token is issued in that case.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<String, AppError> {
        let user = self.users.find_by_username(username).await?;

        let verified = user
            .as_ref()
            .is_some_and(|u| verify_password(password, &u.password_hash));

        if !verified {
            tracing::debug!(username, "login rejected");
            return Err(AppError::unauthorized(
                "invalid credentials",
                json!({ "reason": "Unknown user or wrong password" }),
            ));
        }

        let token = mint_token()?;
        self.tokens
            .insert(&self.hash_token(&token), username)
            .await?;

        tracing::info!(username, "session token issued");
        Ok(token)
    }

    /// Resolves a bearer token to the username it was issued for.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token was never issued.
    pub async fn resolve_token(&self, token: &str) -> Result<String, AppError> {
        self.tokens
            .find_username(&self.hash_token(token))
            .await?
            .ok_or_else(|| {
                AppError::unauthorized("Invalid token", json!({ "reason": "Unknown token" }))
            })
    }

    /// Number of registered accounts.
    pub async fn user_count(&self) -> Result<usize, AppError> {
        self.users.count().await
    }

    /// Number of tokens issued since startup.
    pub async fn token_count(&self) -> Result<usize, AppError> {
        self.tokens.count().await
    }
}

fn random_bytes<const N: usize>() -> Result<[u8; N], AppError> {
    let mut buffer = [0u8; N];
    getrandom::fill(&mut buffer).map_err(|e| {
        AppError::internal("Random source unavailable", json!({ "reason": e.to_string() }))
    })?;
    Ok(buffer)
}

/// Generates an opaque 32-character hex token.
fn mint_token() -> Result<String, AppError> {
    Ok(hex::encode(random_bytes::<TOKEN_BYTES>()?))
}

fn hash_password(password: &str) -> Result<String, AppError> {
    let salt = random_bytes::<SALT_BYTES>()?;
    Ok(format!(
        "{}${}",
        STANDARD_NO_PAD.encode(salt),
        hex::encode(password_mac(&salt, password).finalize().into_bytes())
    ))
}

fn verify_password(password: &str, stored: &str) -> bool {
    let Some((salt, digest)) = stored.split_once('$') else {
        return false;
    };
    let (Ok(salt), Ok(digest)) = (STANDARD_NO_PAD.decode(salt), hex::decode(digest)) else {
        return false;
    };

    password_mac(&salt, password).verify_slice(&digest).is_ok()
}

fn password_mac(salt: &[u8], password: &str) -> HmacSha256 {
    let mut mac = HmacSha256::new_from_slice(salt).expect("HMAC accepts any key length");
    mac.update(password.as_bytes());
    mac
}
