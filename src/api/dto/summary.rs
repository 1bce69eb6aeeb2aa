//! DTOs for `GET /v2/summary`.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::Serialize;

use crate::domain::entities::Summary;

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub object: &'static str,
    pub data: SummaryData,
}

#[derive(Debug, Serialize)]
pub struct SummaryData {
    pub reviews: ReviewsData,
}

#[derive(Debug, Serialize)]
pub struct ReviewsData {
    pub upcoming: Vec<ReviewBlockItem>,
}

#[derive(Debug, Serialize)]
pub struct ReviewBlockItem {
    /// ISO-8601 with microseconds and a trailing `Z`.
    pub available_at: String,
    pub subject_ids: Vec<u64>,
}

/// Formats an instant the way the summary endpoint reports it.
pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

impl From<Summary> for SummaryResponse {
    fn from(summary: Summary) -> Self {
        let upcoming = summary
            .upcoming
            .into_iter()
            .map(|block| ReviewBlockItem {
                available_at: format_timestamp(block.available_at),
                subject_ids: block.subject_ids,
            })
            .collect();

        Self {
            object: "report",
            data: SummaryData {
                reviews: ReviewsData { upcoming },
            },
        }
    }
}
