//! Subject entity: a reference learning item.

use serde::{Deserialize, Serialize};

/// The two kinds of learning item served by the provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubjectKind {
    /// A single logographic character.
    Kanji,
    /// A multi-character term.
    Vocabulary,
}

impl SubjectKind {
    /// Wire name used in `object` and `subject_type` fields.
    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Kanji => "kanji",
            SubjectKind::Vocabulary => "vocabulary",
        }
    }
}

/// A read-only reference item, keyed by `id`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Subject {
    pub id: u64,
    pub kind: SubjectKind,
    pub characters: String,
    pub meanings: Vec<String>,
    pub level: u32,
}

impl Subject {
    pub fn new(
        id: u64,
        kind: SubjectKind,
        characters: impl Into<String>,
        meanings: Vec<String>,
        level: u32,
    ) -> Self {
        Self {
            id,
            kind,
            characters: characters.into(),
            meanings,
            level,
        }
    }
}
