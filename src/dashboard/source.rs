//! Data source seam for the dashboard session.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::dashboard::client::ClientError;
use crate::dashboard::schema::{AssignmentRecord, SubjectRecord, SummaryReport};
use crate::domain::entities::SubjectKind;

/// Everything a dashboard load reads from the provider.
///
/// [`crate::dashboard::ApiClient`] is the HTTP implementation. Every call
/// takes the bearer token explicitly; the source holds no session.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DashboardSource: Send + Sync {
    /// All assignments of one subject kind, across every page.
    async fn fetch_assignments(
        &self,
        token: &str,
        kind: SubjectKind,
    ) -> Result<Vec<AssignmentRecord>, ClientError>;

    /// Assignments immediately available for lessons, across every page.
    async fn fetch_available_lessons(
        &self,
        token: &str,
    ) -> Result<Vec<AssignmentRecord>, ClientError>;

    /// Subjects keyed by id. An empty `ids` makes no request.
    async fn fetch_subjects(
        &self,
        token: &str,
        ids: &[u64],
    ) -> Result<HashMap<u64, SubjectRecord>, ClientError>;

    async fn fetch_summary(&self, token: &str) -> Result<SummaryReport, ClientError>;
}
