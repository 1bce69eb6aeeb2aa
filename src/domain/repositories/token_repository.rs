//! Repository trait for bearer session tokens.

use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for issued session tokens.
///
/// Maps the HMAC hash of a bearer token to the username it was minted for.
/// Raw tokens are never handed to the repository.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MemoryTokenRepository`] - process-lifetime map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TokenRepository: Send + Sync {
    /// Associates a token hash with a username.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the hash is already registered.
    async fn insert(&self, token_hash: &str, username: &str) -> Result<(), AppError>;

    /// Looks up the username a token hash was issued to.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(username))` if the token is known
    /// - `Ok(None)` otherwise
    async fn find_username(&self, token_hash: &str) -> Result<Option<String>, AppError>;

    /// Number of tokens issued since startup.
    async fn count(&self) -> Result<usize, AppError>;
}
