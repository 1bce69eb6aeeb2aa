//! Dashboard session and view-state machine.
//!
//! ```text
//! Unauthenticated --submit_token--> Loading --load ok--> Ready
//!        ^                             |                  |
//!        |                             +--load err--> Error
//!        +-------------logout------------------------------+
//! ```
//!
//! `refresh` moves `Ready` or `Error` back to `Loading` with the held token;
//! `submit_token` from `Error` replaces it. Nothing retries on its own.

use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

use crate::dashboard::aggregate::{self, HourBucket, LevelBucket, Metrics, StageBucket, StudyRow};
use crate::dashboard::client::ClientError;
use crate::dashboard::schema::{AssignmentRecord, SubjectRecord, SummaryReport};
use crate::dashboard::source::DashboardSource;
use crate::domain::clock::Clock;
use crate::domain::entities::SubjectKind;

/// Why a load failed, split for messaging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadFailure {
    /// The token was rejected.
    Unauthorized,
    Upstream(String),
}

impl From<&ClientError> for LoadFailure {
    fn from(err: &ClientError) -> Self {
        if err.is_unauthorized() {
            LoadFailure::Unauthorized
        } else {
            LoadFailure::Upstream(err.to_string())
        }
    }
}

/// Everything fetched by one successful load.
#[derive(Debug, Clone)]
pub struct DashboardData {
    pub kanji: Vec<AssignmentRecord>,
    pub vocabulary: Vec<AssignmentRecord>,
    pub lessons: Vec<AssignmentRecord>,
    pub subjects: HashMap<u64, SubjectRecord>,
    pub summary: SummaryReport,
    /// Instant captured before the first fetch; the review window starts here.
    pub loaded_at: DateTime<Utc>,
}

impl DashboardData {
    fn learned(&self) -> Vec<AssignmentRecord> {
        self.kanji.iter().chain(&self.vocabulary).cloned().collect()
    }

    pub fn metrics(&self) -> Metrics {
        aggregate::metrics(&self.kanji, &self.vocabulary, &self.lessons)
    }

    /// Stage distribution over kanji and vocabulary assignments.
    pub fn stage_histogram(&self) -> Vec<StageBucket> {
        aggregate::stage_histogram(&self.learned())
    }

    pub fn level_histogram(&self) -> Vec<LevelBucket> {
        aggregate::level_histogram(&self.learned(), &self.subjects)
    }

    pub fn review_schedule(&self) -> Vec<HourBucket> {
        aggregate::review_schedule(self.summary.upcoming(), self.loaded_at)
    }

    pub fn lesson_rows(&self) -> Vec<StudyRow> {
        aggregate::study_rows(&self.lessons, &self.subjects, true)
    }

    pub fn kanji_rows(&self) -> Vec<StudyRow> {
        aggregate::study_rows(&self.kanji, &self.subjects, false)
    }

    pub fn vocabulary_rows(&self) -> Vec<StudyRow> {
        aggregate::study_rows(&self.vocabulary, &self.subjects, false)
    }
}

#[derive(Debug, Clone)]
pub enum ViewState {
    Unauthenticated,
    Loading,
    Ready(Box<DashboardData>),
    Error(LoadFailure),
}

impl ViewState {
    pub fn name(&self) -> &'static str {
        match self {
            ViewState::Unauthenticated => "unauthenticated",
            ViewState::Loading => "loading",
            ViewState::Ready(_) => "ready",
            ViewState::Error(_) => "error",
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SessionError {
    #[error("token must be non-empty and contain no whitespace")]
    MalformedToken,

    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
}

/// Holds the bearer token and the current view.
pub struct DashboardSession {
    state: ViewState,
    token: Option<String>,
    clock: Arc<dyn Clock>,
}

impl DashboardSession {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: ViewState::Unauthenticated,
            token: None,
            clock,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Accepts a token and moves to `Loading`.
    ///
    /// Allowed from `Unauthenticated` and `Error`. Surrounding whitespace is
    /// trimmed.
    ///
    /// # Errors
    ///
    /// [`SessionError::MalformedToken`] if the trimmed token is empty or has
    /// interior whitespace; the state is left unchanged.
    pub fn submit_token(&mut self, raw: &str) -> Result<(), SessionError> {
        if !matches!(self.state, ViewState::Unauthenticated | ViewState::Error(_)) {
            return Err(self.invalid("submit a token"));
        }

        let token = raw.trim();
        if token.is_empty() || token.chars().any(char::is_whitespace) {
            return Err(SessionError::MalformedToken);
        }

        self.token = Some(token.to_string());
        self.state = ViewState::Loading;
        Ok(())
    }

    /// Re-runs the load with the held token.
    pub fn refresh(&mut self) -> Result<(), SessionError> {
        let settled = matches!(self.state, ViewState::Ready(_) | ViewState::Error(_));
        if !settled || self.token.is_none() {
            return Err(self.invalid("refresh"));
        }

        self.state = ViewState::Loading;
        Ok(())
    }

    /// Drops the token and returns to `Unauthenticated`.
    pub fn logout(&mut self) {
        self.token = None;
        self.state = ViewState::Unauthenticated;
        tracing::info!("Logged out");
    }

    /// Performs every fetch in order and settles in `Ready` or `Error`.
    ///
    /// Fetches run one at a time: kanji assignments, vocabulary assignments,
    /// lesson-eligible assignments, the referenced subjects, then the
    /// summary. The first failure stops the load and no partial data is
    /// kept.
    ///
    /// # Errors
    ///
    /// [`SessionError::InvalidTransition`] unless the session is `Loading`.
    /// Fetch failures are not errors here; they land in [`ViewState::Error`].
    pub async fn load<S>(&mut self, source: &S) -> Result<&ViewState, SessionError>
    where
        S: DashboardSource + ?Sized,
    {
        let token = match (&self.state, &self.token) {
            (ViewState::Loading, Some(token)) => token.clone(),
            _ => return Err(self.invalid("load")),
        };

        let loaded_at = self.clock.now();

        self.state = match fetch_all(source, &token, loaded_at).await {
            Ok(data) => {
                tracing::info!(
                    kanji = data.kanji.len(),
                    vocabulary = data.vocabulary.len(),
                    lessons = data.lessons.len(),
                    subjects = data.subjects.len(),
                    "Dashboard loaded"
                );
                ViewState::Ready(Box::new(data))
            }
            Err(e) => {
                tracing::warn!("Dashboard load failed: {e}");
                ViewState::Error(LoadFailure::from(&e))
            }
        };

        Ok(&self.state)
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            action,
            state: self.state.name(),
        }
    }
}

async fn fetch_all<S>(
    source: &S,
    token: &str,
    loaded_at: DateTime<Utc>,
) -> Result<DashboardData, ClientError>
where
    S: DashboardSource + ?Sized,
{
    let kanji = source.fetch_assignments(token, SubjectKind::Kanji).await?;
    let vocabulary = source
        .fetch_assignments(token, SubjectKind::Vocabulary)
        .await?;
    let lessons = source.fetch_available_lessons(token).await?;

    let ids = aggregate::referenced_subject_ids(&[
        kanji.as_slice(),
        vocabulary.as_slice(),
        lessons.as_slice(),
    ]);
    let subjects = source.fetch_subjects(token, &ids).await?;
    let summary = source.fetch_summary(token).await?;

    Ok(DashboardData {
        kanji,
        vocabulary,
        lessons,
        subjects,
        summary,
        loaded_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::schema::{
        AssignmentFields, ReviewBlockRecord, ReviewsFields, SubjectFields, SummaryFields,
    };
    use crate::dashboard::source::MockDashboardSource;
    use crate::domain::clock::FixedClock;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 0, 0).unwrap()
    }

    fn session() -> DashboardSession {
        DashboardSession::new(Arc::new(FixedClock(now())))
    }

    fn assignment(subject_id: u64) -> AssignmentRecord {
        AssignmentRecord {
            id: subject_id,
            data: AssignmentFields {
                subject_id: Some(subject_id),
                ..Default::default()
            },
        }
    }

    fn subject(id: u64, level: u32) -> SubjectRecord {
        SubjectRecord {
            id,
            object: None,
            data: SubjectFields {
                characters: Some("日".to_string()),
                meaning: Some("sun".to_string()),
                level: Some(level),
                ..Default::default()
            },
        }
    }

    fn healthy_source() -> MockDashboardSource {
        let mut source = MockDashboardSource::new();
        source
            .expect_fetch_assignments()
            .withf(|token, kind| token == "tok" && *kind == SubjectKind::Kanji)
            .times(1)
            .returning(|_, _| Ok(vec![assignment(1)]));
        source
            .expect_fetch_assignments()
            .withf(|token, kind| token == "tok" && *kind == SubjectKind::Vocabulary)
            .times(1)
            .returning(|_, _| Ok(vec![assignment(2)]));
        source
            .expect_fetch_available_lessons()
            .times(1)
            .returning(|_| Ok(vec![assignment(2)]));
        source
            .expect_fetch_subjects()
            .withf(|_, ids| ids.to_vec() == vec![1, 2, 2])
            .times(1)
            .returning(|_, _| Ok(HashMap::from([(1, subject(1, 1)), (2, subject(2, 1))])));
        source.expect_fetch_summary().times(1).returning(|_| {
            Ok(SummaryReport {
                data: SummaryFields {
                    reviews: ReviewsFields {
                        upcoming: vec![ReviewBlockRecord {
                            available_at: Some("2025-06-01T09:10:00Z".to_string()),
                            subject_ids: vec![1, 2],
                        }],
                    },
                },
            })
        });
        source
    }

    #[test]
    fn test_starts_unauthenticated() {
        let session = session();
        assert!(matches!(session.state(), ViewState::Unauthenticated));
        assert_eq!(session.token(), None);
    }

    #[test]
    fn test_submit_token_trims_and_moves_to_loading() {
        let mut session = session();
        session.submit_token("  tok \n").unwrap();

        assert!(matches!(session.state(), ViewState::Loading));
        assert_eq!(session.token(), Some("tok"));
    }

    #[test]
    fn test_malformed_tokens_are_rejected() {
        let mut session = session();

        assert_eq!(session.submit_token("   "), Err(SessionError::MalformedToken));
        assert_eq!(session.submit_token("to k"), Err(SessionError::MalformedToken));
        assert!(matches!(session.state(), ViewState::Unauthenticated));
    }

    #[test]
    fn test_submit_while_loading_is_invalid() {
        let mut session = session();
        session.submit_token("tok").unwrap();

        assert_eq!(
            session.submit_token("other"),
            Err(SessionError::InvalidTransition {
                action: "submit a token",
                state: "loading"
            })
        );
    }

    #[tokio::test]
    async fn test_load_success_reaches_ready() {
        let mut session = session();
        session.submit_token("tok").unwrap();

        session.load(&healthy_source()).await.unwrap();

        let ViewState::Ready(data) = session.state() else {
            panic!("expected ready, got {}", session.state().name());
        };
        assert_eq!(
            data.metrics(),
            Metrics {
                kanji: 1,
                vocabulary: 1,
                lessons: 1
            }
        );
        assert_eq!(data.loaded_at, now());
        assert_eq!(data.review_schedule().len(), 1);
        assert_eq!(data.review_schedule()[0].count, 2);
        assert_eq!(data.level_histogram(), vec![LevelBucket { level: 1, count: 2 }]);
        assert_eq!(data.stage_histogram()[0].count, 2);
        assert!(data.lesson_rows()[0].link.is_some());
        assert!(data.kanji_rows()[0].link.is_none());
    }

    #[tokio::test]
    async fn test_unauthorized_failure_is_distinguished() {
        let mut source = MockDashboardSource::new();
        source.expect_fetch_assignments().times(1).returning(|_, _| {
            Err(ClientError::Unauthorized {
                url: "http://localhost/v2/assignments".to_string(),
            })
        });
        source.expect_fetch_summary().never();

        let mut session = session();
        session.submit_token("tok").unwrap();
        session.load(&source).await.unwrap();

        assert!(matches!(
            session.state(),
            ViewState::Error(LoadFailure::Unauthorized)
        ));
    }

    #[tokio::test]
    async fn test_upstream_failure_keeps_no_partial_data() {
        let mut source = MockDashboardSource::new();
        source
            .expect_fetch_assignments()
            .returning(|_, _| Ok(vec![assignment(1)]));
        source.expect_fetch_available_lessons().returning(|_| {
            Err(ClientError::Upstream {
                status: 500,
                url: "http://localhost/v2/assignments".to_string(),
                message: "Internal Server Error".to_string(),
            })
        });
        source.expect_fetch_subjects().never();

        let mut session = session();
        session.submit_token("tok").unwrap();
        session.load(&source).await.unwrap();

        let ViewState::Error(LoadFailure::Upstream(message)) = session.state() else {
            panic!("expected upstream error");
        };
        assert!(message.contains("500"));
    }

    #[tokio::test]
    async fn test_load_requires_loading_state() {
        let source = MockDashboardSource::new();
        let mut session = session();

        assert_eq!(
            session.load(&source).await.unwrap_err(),
            SessionError::InvalidTransition {
                action: "load",
                state: "unauthenticated"
            }
        );
    }

    #[tokio::test]
    async fn test_refresh_and_logout() {
        let mut session = session();
        session.submit_token("tok").unwrap();
        session.load(&healthy_source()).await.unwrap();

        session.refresh().unwrap();
        assert!(matches!(session.state(), ViewState::Loading));
        assert_eq!(session.token(), Some("tok"));

        session.logout();
        assert!(matches!(session.state(), ViewState::Unauthenticated));
        assert_eq!(session.token(), None);
        assert!(session.refresh().is_err());
    }

    #[tokio::test]
    async fn test_resubmit_after_error() {
        let mut source = MockDashboardSource::new();
        source.expect_fetch_assignments().returning(|_, _| {
            Err(ClientError::Unauthorized {
                url: "u".to_string(),
            })
        });

        let mut session = session();
        session.submit_token("bad").unwrap();
        session.load(&source).await.unwrap();

        session.submit_token("good").unwrap();
        assert!(matches!(session.state(), ViewState::Loading));
        assert_eq!(session.token(), Some("good"));
    }
}
