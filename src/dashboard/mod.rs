//! Dashboard side: consumes the provider API and renders summaries.
//!
//! # Modules
//!
//! - [`client`] - Paginated HTTP client
//! - [`schema`] - Tolerant response shapes
//! - [`source`] - Fetch seam used by the session
//! - [`aggregate`] - Stage, level and review-window buckets
//! - [`session`] - Token handling and view-state machine
//! - [`render`] - Terminal output

pub mod aggregate;
pub mod client;
pub mod render;
pub mod schema;
pub mod session;
pub mod source;

pub use client::{ApiClient, ClientError};
pub use session::{DashboardData, DashboardSession, LoadFailure, SessionError, ViewState};
pub use source::DashboardSource;
