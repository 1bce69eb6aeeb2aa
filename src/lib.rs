//! # SRS Dashboard
//!
//! A mock spaced-repetition provider API and a terminal dashboard that reads it.
//!
//! ## Architecture
//!
//! The provider follows a layered layout:
//!
//! - **Domain Layer** ([`domain`]) - Subjects, assignments, accounts and repository traits
//! - **Application Layer** ([`application`]) - Account and catalog services
//! - **Infrastructure Layer** ([`infrastructure`]) - In-memory repositories and the fixture catalog
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! The [`dashboard`] module is the consumer side: a paginated HTTP client,
//! pure aggregation functions, and the view-state machine driven by the
//! `dashboard` binary.
//!
//! ## Features
//!
//! - Signup, login and bearer-token sessions with hashed secrets at rest
//! - Collection endpoints shaped like the real upstream (`object`, `pages`, `data`)
//! - SRS stage, level and review-window breakdowns
//! - Rate limiting and structured logging
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the mock provider on :3000
//! cargo run
//!
//! # Point the dashboard at it
//! WANIKANI_API_BASE=http://localhost:3000/v2/ cargo run --bin dashboard
//! ```
//!
//! ## Configuration
//!
//! Both binaries read environment variables via [`config`].

pub mod api;
pub mod application;
pub mod dashboard;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{AuthService, CatalogService};
    pub use crate::dashboard::{ApiClient, ClientError, DashboardSession, ViewState};
    pub use crate::domain::entities::{Assignment, Subject, SubjectKind};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
