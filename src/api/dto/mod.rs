//! Data Transfer Objects for API requests and responses.
//!
//! Response shapes follow the upstream `/v2` API closely enough that the
//! dashboard client reads both.

pub mod assignment;
pub mod auth;
pub mod collection;
pub mod health;
pub mod revision;
pub mod subject;
pub mod summary;
