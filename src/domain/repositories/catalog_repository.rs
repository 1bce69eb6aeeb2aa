//! Repository trait for the read-only learning catalog.

use crate::domain::entities::{Assignment, Subject};
use crate::error::AppError;
use async_trait::async_trait;

/// Read-only access to subjects and assignments.
///
/// # Implementations
///
/// - [`crate::infrastructure::memory::FixtureCatalog`] - fixed sample data
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Returns every assignment, unfiltered and unpaginated.
    async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError>;

    /// Returns the whole reference table in table order.
    async fn list_subjects(&self) -> Result<Vec<Subject>, AppError>;

    /// Returns the subjects whose id is in `ids`, in table order.
    ///
    /// Unknown ids are ignored.
    async fn find_subjects(&self, ids: &[u64]) -> Result<Vec<Subject>, AppError>;
}
