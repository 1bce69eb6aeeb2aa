//! Core domain entities.
//!
//! # Entity Types
//!
//! - [`Subject`] - A reference learning item (kanji or vocabulary)
//! - [`Assignment`] - A user's progress against a subject
//! - [`ReviewBlock`] / [`Summary`] - The upcoming review schedule
//! - [`User`] - A provider account
//!
//! Entities are plain data; behaviour lives in the application services.

pub mod assignment;
pub mod review;
pub mod subject;
pub mod user;

pub use assignment::{Assignment, MAX_SRS_STAGE};
pub use review::{ReviewBlock, Summary};
pub use subject::{Subject, SubjectKind};
pub use user::{NewUser, User};
