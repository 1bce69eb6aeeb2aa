//! Infrastructure layer.
//!
//! Implements the interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`memory`] - Process-lifetime repositories and the fixture catalog

pub mod memory;
