//! DTO for `GET /v2/revision-session`.

use serde::Serialize;

use crate::api::dto::collection::Resource;
use crate::api::dto::subject::SubjectData;

/// A random subject to revise, tagged with the caller's username.
#[derive(Debug, Serialize)]
pub struct RevisionSessionResponse {
    pub user: String,
    pub subject: Resource<SubjectData>,
}
