//! DTOs for `GET /v2/assignments`.

use serde::Serialize;

use crate::api::dto::collection::Resource;
use crate::domain::entities::{Assignment, SubjectKind};

#[derive(Debug, Serialize)]
pub struct AssignmentData {
    pub subject_id: u64,
    pub subject_type: SubjectKind,
    pub srs_stage: u8,
}

impl From<Assignment> for Resource<AssignmentData> {
    fn from(a: Assignment) -> Self {
        Resource {
            id: a.id,
            object: "assignment",
            data: AssignmentData {
                subject_id: a.subject_id,
                subject_type: a.subject_kind,
                srs_stage: a.srs_stage,
            },
        }
    }
}
