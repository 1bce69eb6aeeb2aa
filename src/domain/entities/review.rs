//! Review summary entities.

use chrono::{DateTime, Utc};

/// A batch of reviews that become due at the same instant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewBlock {
    pub available_at: DateTime<Utc>,
    pub subject_ids: Vec<u64>,
}

/// Upcoming review schedule, recomputed on every request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    pub upcoming: Vec<ReviewBlock>,
}
