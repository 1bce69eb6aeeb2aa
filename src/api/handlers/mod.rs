//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod assignments;
pub mod auth;
pub mod health;
pub mod revision;
pub mod subjects;
pub mod summary;

pub use assignments::assignments_handler;
pub use auth::{login_handler, signup_handler};
pub use health::health_handler;
pub use revision::revision_session_handler;
pub use subjects::subjects_handler;
pub use summary::summary_handler;
