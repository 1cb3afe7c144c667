//! Russian Wiktionary relation headers.
//!
//! Semantic relations live in level 4 sections under
//! `=== Семантические свойства ===`, one `#` line per word sense:
//!
//! ```text
//! ==== Синонимы ====
//! # [[служба]]; частичн.: [[пост]]
//! # -
//! ```

use crate::config::DEFAULT_SEPARATORS;
use crate::language::LanguageModule;
use crate::models::RelationKind;
use once_cell::sync::Lazy;
use regex::Regex;

fn header(name: &str) -> Regex {
    Regex::new(&format!(
        r"(?m)^[ \t]*={{2,4}}[ \t]*{name}[ \t]*={{2,4}}[ \t]*(?:\r?\n|\z)"
    ))
    .unwrap()
}

static SYNONYMY_HEADER: Lazy<Regex> = Lazy::new(|| header("Синонимы"));
static ANTONYMY_HEADER: Lazy<Regex> = Lazy::new(|| header("Антонимы"));
static HYPERNYMY_HEADER: Lazy<Regex> = Lazy::new(|| header("Гиперонимы"));
static HYPONYMY_HEADER: Lazy<Regex> = Lazy::new(|| header("Гипонимы"));
static COORDINATE_TERM_HEADER: Lazy<Regex> = Lazy::new(|| header("Согипонимы"));
static HOLONYMY_HEADER: Lazy<Regex> = Lazy::new(|| header("Холонимы"));
static MERONYMY_HEADER: Lazy<Regex> = Lazy::new(|| header("Меронимы"));

pub struct Russian;

impl LanguageModule for Russian {
    fn code(&self) -> &'static str {
        "ru"
    }

    fn header_pattern(&self, kind: RelationKind) -> &Regex {
        match kind {
            RelationKind::Synonymy => &SYNONYMY_HEADER,
            RelationKind::Antonymy => &ANTONYMY_HEADER,
            RelationKind::Hypernymy => &HYPERNYMY_HEADER,
            RelationKind::Hyponymy => &HYPONYMY_HEADER,
            RelationKind::CoordinateTerm => &COORDINATE_TERM_HEADER,
            RelationKind::Holonymy => &HOLONYMY_HEADER,
            RelationKind::Meronymy => &MERONYMY_HEADER,
        }
    }

    fn separators(&self) -> &[char] {
        DEFAULT_SEPARATORS
    }
}
