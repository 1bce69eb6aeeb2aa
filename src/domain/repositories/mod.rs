//! Repository trait definitions for the domain layer.
//!
//! These traits abstract data access following the Repository pattern. The
//! provider keeps all state in memory, so the concrete implementations live in
//! `crate::infrastructure::memory` and are owned by the provider state rather
//! than held in globals.
//!
//! # Available Repositories
//!
//! - [`UserRepository`] - Account storage
//! - [`TokenRepository`] - Issued bearer tokens
//! - [`CatalogRepository`] - Subjects and assignments
//!
//! Mock implementations are generated via `mockall` for unit tests.

pub mod catalog_repository;
pub mod token_repository;
pub mod user_repository;

pub use catalog_repository::CatalogRepository;
pub use token_repository::TokenRepository;
pub use user_repository::UserRepository;

#[cfg(test)]
pub use catalog_repository::MockCatalogRepository;
#[cfg(test)]
pub use token_repository::MockTokenRepository;
#[cfg(test)]
pub use user_repository::MockUserRepository;
