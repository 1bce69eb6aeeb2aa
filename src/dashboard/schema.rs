//! Response shapes the dashboard reads from the provider.
//!
//! Every field defaults, so a sparse or partially populated payload still
//! decodes. Missing values surface as `None` or empty collections and are
//! handled downstream (placeholders, skipped buckets).

use serde::Deserialize;

/// One page of a collection endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pages: Option<PageLinks>,
}

impl<T> Page<T> {
    /// The opaque cursor for the following page, if any.
    ///
    /// An empty cursor marks the last page, same as `null`.
    pub fn next_url(&self) -> Option<&str> {
        self.pages
            .as_ref()
            .and_then(|p| p.next_url.as_deref())
            .filter(|next| !next.is_empty())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageLinks {
    #[serde(default)]
    pub next_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub data: AssignmentFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AssignmentFields {
    #[serde(default)]
    pub subject_id: Option<u64>,
    #[serde(default)]
    pub subject_type: Option<String>,
    /// Signed so out-of-range values from a misbehaving upstream still
    /// decode and land in the catch-all bucket.
    #[serde(default)]
    pub srs_stage: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectRecord {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub object: Option<String>,
    #[serde(default)]
    pub data: SubjectFields,
}

impl SubjectRecord {
    /// Flagged primary meaning, else the first listed, else the singular
    /// `meaning` field.
    pub fn primary_meaning(&self) -> Option<&str> {
        let meanings = &self.data.meanings;
        meanings
            .iter()
            .find(|m| m.primary)
            .or_else(|| meanings.first())
            .map(|m| m.meaning.as_str())
            .or(self.data.meaning.as_deref())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubjectFields {
    #[serde(default)]
    pub characters: Option<String>,
    #[serde(default)]
    pub meanings: Vec<MeaningEntry>,
    #[serde(default)]
    pub meaning: Option<String>,
    #[serde(default)]
    pub level: Option<u32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MeaningEntry {
    #[serde(default)]
    pub meaning: String,
    #[serde(default)]
    pub primary: bool,
}

/// `GET summary` body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryReport {
    #[serde(default)]
    pub data: SummaryFields,
}

impl SummaryReport {
    pub fn upcoming(&self) -> &[ReviewBlockRecord] {
        &self.data.reviews.upcoming
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryFields {
    #[serde(default)]
    pub reviews: ReviewsFields,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewsFields {
    #[serde(default)]
    pub upcoming: Vec<ReviewBlockRecord>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewBlockRecord {
    #[serde(default)]
    pub available_at: Option<String>,
    #[serde(default)]
    pub subject_ids: Vec<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RevisionSession {
    #[serde(default)]
    pub user: String,
    pub subject: SubjectRecord,
}
