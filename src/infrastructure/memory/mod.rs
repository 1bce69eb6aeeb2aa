//! In-memory repository implementations.
//!
//! Nothing here survives a restart. Each repository owns its map, and the
//! provider state owns the repositories.
//!
//! # Repositories
//!
//! - [`MemoryUserRepository`] - Registered accounts
//! - [`MemoryTokenRepository`] - Issued bearer tokens
//! - [`FixtureCatalog`] - Fixed subjects and assignments

pub mod fixture_catalog;
pub mod memory_token_repository;
pub mod memory_user_repository;

pub use fixture_catalog::FixtureCatalog;
pub use memory_token_repository::MemoryTokenRepository;
pub use memory_user_repository::MemoryUserRepository;
