//! Repository trait for provider accounts.

use crate::domain::entities::{NewUser, User};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for registered accounts.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::MemoryUserRepository`] - process-lifetime map
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Stores a new account.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the username is already taken.
    async fn insert(&self, user: NewUser) -> Result<User, AppError>;

    /// Finds an account by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Number of registered accounts.
    async fn count(&self) -> Result<usize, AppError>;
}
