//! Assignment entity: a user's progress against a subject.

use super::subject::SubjectKind;

/// Highest SRS stage (burned).
pub const MAX_SRS_STAGE: u8 = 9;

/// A tracked learning item.
///
/// `srs_stage` runs from 0 (new lesson) to [`MAX_SRS_STAGE`] (burned).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    pub id: u64,
    pub subject_id: u64,
    pub subject_kind: SubjectKind,
    pub srs_stage: u8,
}

impl Assignment {
    pub fn new(id: u64, subject_id: u64, subject_kind: SubjectKind, srs_stage: u8) -> Self {
        Self {
            id,
            subject_id,
            subject_kind,
            srs_stage: srs_stage.min(MAX_SRS_STAGE),
        }
    }
}
