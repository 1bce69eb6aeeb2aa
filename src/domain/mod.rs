//! Domain layer containing business entities and seams.
//!
//! # Architecture
//!
//! - [`entities`] - Core data structures (subjects, assignments, reviews, users)
//! - [`repositories`] - Data access trait definitions
//! - [`clock`] - Injectable current-time source
//! - [`random`] - Injectable random source for subject selection
//!
//! The domain layer has no dependency on the HTTP or infrastructure layers.

pub mod clock;
pub mod entities;
pub mod random;
pub mod repositories;
