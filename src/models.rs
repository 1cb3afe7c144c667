use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageType {
    Entry,
    Redirect(String),
    Special,
}

#[derive(Debug, Clone)]
pub struct WikiPage {
    pub id: u32,
    pub title: String,
    pub ns: i32,
    pub page_type: PageType,
    pub text: Option<String>,
}

/// Kind of semantic relation between a word sense and other words.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Synonymy,
    Antonymy,
    Hypernymy,
    Hyponymy,
    CoordinateTerm,
    Holonymy,
    Meronymy,
}

impl RelationKind {
    pub const ALL: [RelationKind; 7] = [
        RelationKind::Synonymy,
        RelationKind::Antonymy,
        RelationKind::Hypernymy,
        RelationKind::Hyponymy,
        RelationKind::CoordinateTerm,
        RelationKind::Holonymy,
        RelationKind::Meronymy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            RelationKind::Synonymy => "synonymy",
            RelationKind::Antonymy => "antonymy",
            RelationKind::Hypernymy => "hypernymy",
            RelationKind::Hyponymy => "hyponymy",
            RelationKind::CoordinateTerm => "coordinate_term",
            RelationKind::Holonymy => "holonymy",
            RelationKind::Meronymy => "meronymy",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A wikified phrase, e.g. `[[служба]]` or `частичн.: [[пост]]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phrase {
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Phrase {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: None,
            label: None,
        }
    }

    /// Link target of the phrase; the surface text when no explicit target was given.
    pub fn target(&self) -> &str {
        self.target.as_deref().unwrap_or(&self.text)
    }
}

/// Related phrases for exactly one word sense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub phrases: Vec<Phrase>,
}

impl RelationEntry {
    /// Returns `None` for an empty phrase list so no entry ever exists without phrases.
    pub fn new(summary: Option<String>, phrases: Vec<Phrase>) -> Option<Self> {
        if phrases.is_empty() {
            return None;
        }
        Some(Self { summary, phrases })
    }
}

/// Relation entries indexed by sense; `None` marks a sense without this relation.
pub type RelationList = Vec<Option<RelationEntry>>;

/// Only kinds with at least one real entry are present.
pub type RelationMap = BTreeMap<RelationKind, RelationList>;

pub const NO_RELATIONS: RelationMap = BTreeMap::new();

#[derive(Serialize)]
pub struct EntryRelations<'a> {
    pub id: u32,
    pub title: &'a str,
    pub relations: &'a RelationMap,
}
