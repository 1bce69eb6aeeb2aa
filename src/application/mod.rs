//! Application layer services implementing provider logic.
//!
//! Services consume repository traits and give HTTP handlers a narrow API.
//!
//! # Available Services
//!
//! - [`services::auth_service::AuthService`] - Signup, login and bearer-token resolution
//! - [`services::catalog_service::CatalogService`] - Assignments, subjects, summary, random subject

pub mod services;
