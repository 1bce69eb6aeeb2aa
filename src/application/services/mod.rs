//! Business logic services for the application layer.

pub mod auth_service;
pub mod catalog_service;

pub use auth_service::AuthService;
pub use catalog_service::CatalogService;
