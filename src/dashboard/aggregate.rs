//! Pure aggregation over fetched collections.
//!
//! Nothing here performs I/O. Malformed items are skipped or bucketed, never
//! fatal.

use chrono::{DateTime, Duration, Timelike, Utc};
use std::collections::{BTreeMap, HashMap};

use crate::dashboard::schema::{AssignmentRecord, ReviewBlockRecord, SubjectRecord};

/// Canonical SRS stage names, indexed by stage number.
pub const STAGE_LABELS: [&str; 10] = [
    "Lesson",
    "Apprentice 1",
    "Apprentice 2",
    "Apprentice 3",
    "Apprentice 4",
    "Guru 1",
    "Guru 2",
    "Master",
    "Enlightened",
    "Burned",
];

/// Catch-all for stages outside `0..=9`.
pub const OTHER_LABEL: &str = "Other";

/// Shown for any subject that did not resolve.
pub const PLACEHOLDER: &str = "?";

const SUBJECT_LINK_BASE: &str = "https://www.wanikani.com/subject/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageBucket {
    pub label: &'static str,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourBucket {
    pub hour: DateTime<Utc>,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelBucket {
    pub level: u32,
    pub count: usize,
}

/// One line of a lesson, kanji or vocabulary table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyRow {
    pub characters: String,
    pub meaning: String,
    pub link: Option<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub kanji: usize,
    pub vocabulary: usize,
    pub lessons: usize,
}

/// Counts assignments per SRS stage.
///
/// Always returns the ten canonical buckets in stage order; a missing stage
/// counts as 0. An `Other` bucket follows only if some stage fell outside
/// `0..=9`.
pub fn stage_histogram(assignments: &[AssignmentRecord]) -> Vec<StageBucket> {
    let mut counts = [0usize; STAGE_LABELS.len()];
    let mut other = 0usize;

    for assignment in assignments {
        let stage = assignment.data.srs_stage.unwrap_or(0);
        match usize::try_from(stage).ok().and_then(|i| counts.get_mut(i)) {
            Some(count) => *count += 1,
            None => other += 1,
        }
    }

    let mut buckets: Vec<StageBucket> = STAGE_LABELS
        .into_iter()
        .zip(counts)
        .map(|(label, count)| StageBucket { label, count })
        .collect();

    if other > 0 {
        buckets.push(StageBucket {
            label: OTHER_LABEL,
            count: other,
        });
    }

    buckets
}

/// Sums due subjects per hour over the next 24 hours.
///
/// Blocks are kept when `now <= available_at <= now + 24h`, then bucketed by
/// `available_at` truncated to the hour. Output is sorted by hour. Blocks
/// with a missing or unparseable timestamp are skipped.
pub fn review_schedule(blocks: &[ReviewBlockRecord], now: DateTime<Utc>) -> Vec<HourBucket> {
    let horizon = now + Duration::hours(24);
    let mut hours: BTreeMap<DateTime<Utc>, usize> = BTreeMap::new();

    for block in blocks {
        let Some(available_at) = block.available_at.as_deref().and_then(parse_timestamp) else {
            tracing::debug!(raw = ?block.available_at, "skipping review block with bad timestamp");
            continue;
        };

        if available_at < now || available_at > horizon {
            continue;
        }

        *hours.entry(truncate_to_hour(available_at)).or_default() += block.subject_ids.len();
    }

    hours
        .into_iter()
        .map(|(hour, count)| HourBucket { hour, count })
        .collect()
}

/// Counts assignments per subject level, ascending.
///
/// Assignments whose subject or level does not resolve are skipped.
pub fn level_histogram(
    assignments: &[AssignmentRecord],
    subjects: &HashMap<u64, SubjectRecord>,
) -> Vec<LevelBucket> {
    let mut levels: BTreeMap<u32, usize> = BTreeMap::new();

    for assignment in assignments {
        let level = assignment
            .data
            .subject_id
            .and_then(|id| subjects.get(&id))
            .and_then(|subject| subject.data.level);

        if let Some(level) = level {
            *levels.entry(level).or_default() += 1;
        }
    }

    levels
        .into_iter()
        .map(|(level, count)| LevelBucket { level, count })
        .collect()
}

/// Builds table rows for `assignments`, one per assignment, in input order.
///
/// With `with_links`, each row links to the subject page on the upstream
/// site.
pub fn study_rows(
    assignments: &[AssignmentRecord],
    subjects: &HashMap<u64, SubjectRecord>,
    with_links: bool,
) -> Vec<StudyRow> {
    assignments
        .iter()
        .map(|assignment| {
            let subject_id = assignment.data.subject_id;
            let subject = subject_id.and_then(|id| subjects.get(&id));

            let characters = subject
                .and_then(|s| s.data.characters.as_deref())
                .unwrap_or(PLACEHOLDER)
                .to_string();
            let meaning = subject
                .and_then(SubjectRecord::primary_meaning)
                .unwrap_or(PLACEHOLDER)
                .to_string();
            let link = subject_id
                .filter(|_| with_links)
                .map(|id| format!("{SUBJECT_LINK_BASE}{id}"));

            StudyRow {
                characters,
                meaning,
                link,
            }
        })
        .collect()
}

pub fn metrics(
    kanji: &[AssignmentRecord],
    vocabulary: &[AssignmentRecord],
    lessons: &[AssignmentRecord],
) -> Metrics {
    Metrics {
        kanji: kanji.len(),
        vocabulary: vocabulary.len(),
        lessons: lessons.len(),
    }
}

/// Every subject id referenced by `groups`, in first-seen order.
pub fn referenced_subject_ids(groups: &[&[AssignmentRecord]]) -> Vec<u64> {
    groups
        .iter()
        .flat_map(|group| group.iter())
        .filter_map(|a| a.data.subject_id)
        .collect()
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|t| t.with_timezone(&Utc))
}

fn truncate_to_hour(t: DateTime<Utc>) -> DateTime<Utc> {
    t.with_minute(0)
        .and_then(|t| t.with_second(0))
        .and_then(|t| t.with_nanosecond(0))
        .unwrap_or(t)
}
