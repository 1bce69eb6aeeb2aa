//! Fixed reference data served by the mock provider.

use async_trait::async_trait;
use std::collections::HashSet;

use crate::domain::entities::{Assignment, Subject, SubjectKind};
use crate::domain::repositories::CatalogRepository;
use crate::error::AppError;

/// Catalog backed by vectors supplied at construction.
///
/// [`FixtureCatalog::sample`] is the data set the provider binary serves.
#[derive(Debug, Clone)]
pub struct FixtureCatalog {
    subjects: Vec<Subject>,
    assignments: Vec<Assignment>,
}

impl FixtureCatalog {
    pub fn new(subjects: Vec<Subject>, assignments: Vec<Assignment>) -> Self {
        Self {
            subjects,
            assignments,
        }
    }

    /// Two level-1 subjects (日 "sun", 本 "book") and one assignment for each.
    pub fn sample() -> Self {
        let subjects = vec![
            Subject::new(1, SubjectKind::Kanji, "日", vec!["sun".to_string()], 1),
            Subject::new(
                2,
                SubjectKind::Vocabulary,
                "本",
                vec!["book".to_string()],
                1,
            ),
        ];

        let assignments = vec![
            Assignment::new(1, 1, SubjectKind::Kanji, 0),
            Assignment::new(2, 2, SubjectKind::Vocabulary, 0),
        ];

        Self::new(subjects, assignments)
    }

    pub fn subjects(&self) -> &[Subject] {
        &self.subjects
    }

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::sample()
    }
}

#[async_trait]
impl CatalogRepository for FixtureCatalog {
    async fn list_assignments(&self) -> Result<Vec<Assignment>, AppError> {
        Ok(self.assignments.clone())
    }

    async fn list_subjects(&self) -> Result<Vec<Subject>, AppError> {
        Ok(self.subjects.clone())
    }

    async fn find_subjects(&self, ids: &[u64]) -> Result<Vec<Subject>, AppError> {
        let wanted: HashSet<u64> = ids.iter().copied().collect();

        Ok(self
            .subjects
            .iter()
            .filter(|s| wanted.contains(&s.id))
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_sample_contents() {
        let catalog = FixtureCatalog::sample();

        let subjects = catalog.list_subjects().await.unwrap();
        assert_eq!(subjects.len(), 2);
        assert_eq!(subjects[0].characters, "日");
        assert_eq!(subjects[1].kind, SubjectKind::Vocabulary);

        let assignments = catalog.list_assignments().await.unwrap();
        assert_eq!(assignments.len(), 2);
        assert_eq!(assignments[1].subject_id, 2);
    }

    #[tokio::test]
    async fn test_find_subjects_keeps_table_order() {
        let catalog = FixtureCatalog::sample();

        let found = catalog.find_subjects(&[2, 1]).await.unwrap();
        let ids: Vec<u64> = found.iter().map(|s| s.id).collect();

        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_find_subjects_ignores_unknown_ids() {
        let catalog = FixtureCatalog::sample();

        let found = catalog.find_subjects(&[2, 99, 2]).await.unwrap();

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 2);
    }

    #[tokio::test]
    async fn test_find_subjects_empty_request() {
        let catalog = FixtureCatalog::sample();
        assert!(catalog.find_subjects(&[]).await.unwrap().is_empty());
    }
}
