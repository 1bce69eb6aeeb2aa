//! DTOs for `GET /v2/subjects`.

use serde::{Deserialize, Serialize};
use serde_with::formats::CommaSeparator;
use serde_with::{StringWithSeparator, serde_as};

use crate::api::dto::collection::Resource;
use crate::domain::entities::Subject;

/// Query parameters for the subjects endpoint.
///
/// `ids` is a comma-separated list (`?ids=1,2,3`). Absent means "all".
#[serde_as]
#[derive(Debug, Deserialize)]
pub struct SubjectsQuery {
    #[serde_as(as = "Option<StringWithSeparator::<CommaSeparator, u64>>")]
    pub ids: Option<Vec<u64>>,
}

#[derive(Debug, Serialize)]
pub struct SubjectData {
    pub characters: String,
    pub meanings: Vec<MeaningItem>,
    pub level: u32,
}

#[derive(Debug, Serialize)]
pub struct MeaningItem {
    pub meaning: String,
    pub primary: bool,
}

impl From<Subject> for Resource<SubjectData> {
    fn from(s: Subject) -> Self {
        let meanings = s
            .meanings
            .into_iter()
            .enumerate()
            .map(|(i, meaning)| MeaningItem {
                meaning,
                primary: i == 0,
            })
            .collect();

        Resource {
            id: s.id,
            object: s.kind.as_str(),
            data: SubjectData {
                characters: s.characters,
                meanings,
                level: s.level,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::SubjectKind;

    #[test]
    fn test_ids_are_comma_separated() {
        let q: SubjectsQuery = serde_json::from_str(r#"{"ids": "1,2,30"}"#).unwrap();
        assert_eq!(q.ids, Some(vec![1, 2, 30]));
    }

    #[test]
    fn test_ids_absent() {
        let q: SubjectsQuery = serde_json::from_str("{}").unwrap();
        assert!(q.ids.is_none());
    }

    #[test]
    fn test_ids_malformed() {
        assert!(serde_json::from_str::<SubjectsQuery>(r#"{"ids": "1,x"}"#).is_err());
    }

    #[test]
    fn test_first_meaning_is_primary() {
        let subject = Subject::new(
            5,
            SubjectKind::Kanji,
            "日",
            vec!["sun".into(), "day".into()],
            1,
        );
        let resource: Resource<SubjectData> = subject.into();
        let value = serde_json::to_value(&resource).unwrap();

        assert_eq!(value["object"], "kanji");
        assert_eq!(value["data"]["meanings"][0]["meaning"], "sun");
        assert_eq!(value["data"]["meanings"][0]["primary"], true);
        assert_eq!(value["data"]["meanings"][1]["primary"], false);
    }
}
