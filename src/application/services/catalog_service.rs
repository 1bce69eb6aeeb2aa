//! Read-only catalog service: assignments, subjects, summary, random pick.

use serde_json::json;
use std::sync::Arc;

use crate::domain::clock::Clock;
use crate::domain::entities::{Assignment, ReviewBlock, Subject, Summary};
use crate::domain::random::RandomSource;
use crate::domain::repositories::CatalogRepository;
use crate::error::AppError;

/// Serves the fixture catalog.
///
/// The summary timestamp comes from the injected [`Clock`], and random
/// subject selection goes through the injected [`RandomSource`], so both are
/// deterministic under test.
pub struct CatalogService<C: CatalogRepository> {
    repository: Arc<C>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl<C: CatalogRepository> CatalogService<C> {
    pub fn new(repository: Arc<C>, clock: Arc<dyn Clock>, random: Arc<dyn RandomSource>) -> Self {
        Self {
            repository,
            clock,
            random,
        }
    }

    /// Every assignment. Filters are not implemented.
    pub async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError> {
        self.repository.list_assignments().await
    }

    /// Subjects matching `ids`, or the whole table when `ids` is `None`.
    pub async fn list_subjects(&self, ids: Option<&[u64]>) -> Result<Vec<Subject>, AppError> {
        match ids {
            Some(ids) => self.repository.find_subjects(ids).await,
            None => self.repository.list_subjects().await,
        }
    }

    /// One review block due now containing every subject in the table.
    ///
    /// This is a fixture, not a schedule.
    pub async fn summary(&self) -> Result<Summary, AppError> {
        let subject_ids = self
            .repository
            .list_subjects()
            .await?
            .into_iter()
            .map(|s| s.id)
            .collect();

        Ok(Summary {
            upcoming: vec![ReviewBlock {
                available_at: self.clock.now(),
                subject_ids,
            }],
        })
    }

    /// Picks one subject uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the reference table is empty.
    pub async fn random_subject(&self) -> Result<Subject, AppError> {
        let mut subjects = self.repository.list_subjects().await?;

        let index = self
            .random
            .pick(subjects.len())
            .ok_or_else(|| AppError::not_found("No subjects available", json!({})))?;

        Ok(subjects.swap_remove(index))
    }

    /// Number of subjects in the reference table.
    pub async fn subject_count(&self) -> Result<usize, AppError> {
        Ok(self.repository.list_subjects().await?.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clock::FixedClock;
    use crate::domain::entities::SubjectKind;
    use crate::domain::random::{MockRandomSource, StdRandomSource};
    use crate::domain::repositories::MockCatalogRepository;
    use chrono::{TimeZone, Utc};

    fn subjects() -> Vec<Subject> {
        vec![
            Subject::new(1, SubjectKind::Kanji, "日", vec!["sun".into()], 1),
            Subject::new(2, SubjectKind::Vocabulary, "本", vec!["book".into()], 1),
            Subject::new(3, SubjectKind::Kanji, "人", vec!["person".into()], 1),
        ]
    }

    fn clock() -> Arc<dyn Clock> {
        Arc::new(FixedClock(Utc.with_ymd_and_hms(2025, 1, 2, 3, 4, 5).unwrap()))
    }

    #[tokio::test]
    async fn test_summary_uses_clock_and_full_table() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_subjects().returning(|| Ok(subjects()));

        let service = CatalogService::new(
            Arc::new(repo),
            clock(),
            Arc::new(StdRandomSource::seeded(1)),
        );

        let summary = service.summary().await.unwrap();

        assert_eq!(summary.upcoming.len(), 1);
        assert_eq!(summary.upcoming[0].available_at, clock().now());
        assert_eq!(summary.upcoming[0].subject_ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_list_subjects_with_and_without_ids() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_subjects().times(1).returning(|| Ok(subjects()));
        repo.expect_find_subjects()
            .withf(|ids| ids == [3])
            .times(1)
            .returning(|_| Ok(vec![subjects().remove(2)]));

        let service = CatalogService::new(
            Arc::new(repo),
            clock(),
            Arc::new(StdRandomSource::seeded(1)),
        );

        assert_eq!(service.list_subjects(None).await.unwrap().len(), 3);

        let picked = service.list_subjects(Some(&[3])).await.unwrap();
        assert_eq!(picked[0].characters, "人");
    }

    #[tokio::test]
    async fn test_random_subject_uses_injected_source() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_subjects().returning(|| Ok(subjects()));

        let mut random = MockRandomSource::new();
        random
            .expect_pick()
            .withf(|len| *len == 3)
            .returning(|_| Some(2));

        let service = CatalogService::new(Arc::new(repo), clock(), Arc::new(random));

        assert_eq!(service.random_subject().await.unwrap().id, 3);
    }

    #[tokio::test]
    async fn test_random_subject_is_deterministic_with_seed() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_subjects().returning(|| Ok(subjects()));
        let repo = Arc::new(repo);

        let a = CatalogService::new(repo.clone(), clock(), Arc::new(StdRandomSource::seeded(9)));
        let b = CatalogService::new(repo, clock(), Arc::new(StdRandomSource::seeded(9)));

        for _ in 0..10 {
            assert_eq!(
                a.random_subject().await.unwrap().id,
                b.random_subject().await.unwrap().id
            );
        }
    }

    #[tokio::test]
    async fn test_random_subject_empty_table() {
        let mut repo = MockCatalogRepository::new();
        repo.expect_list_subjects().returning(|| Ok(vec![]));

        let service = CatalogService::new(
            Arc::new(repo),
            clock(),
            Arc::new(StdRandomSource::seeded(1)),
        );

        let err = service.random_subject().await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }
}
