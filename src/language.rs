use crate::error::{Error, Result};
use crate::models::{RelationKind, RelationMap, NO_RELATIONS};
use crate::relation;
use crate::russian::Russian;
use once_cell::sync::Lazy;
use regex::Regex;
use rustc_hash::FxHashMap;
use tracing::debug;

/// Header vocabulary and phrase conventions of one Wiktionary edition.
pub trait LanguageModule: Send + Sync {
    /// Edition code, e.g. `"ru"`.
    fn code(&self) -> &'static str;

    /// Pattern matching the header line of `kind`, including its line terminator.
    fn header_pattern(&self, kind: RelationKind) -> &Regex;

    fn separators(&self) -> &[char];

    /// Extracts all relation kinds from the text of one part-of-speech block.
    fn parse(&self, pos_block: &str) -> RelationMap {
        if pos_block.is_empty() {
            return NO_RELATIONS;
        }

        let mut relations = RelationMap::new();
        for kind in RelationKind::ALL {
            if let Some(list) =
                relation::parse_kind(pos_block, self.header_pattern(kind), kind, self.separators())
            {
                relations.insert(kind, list);
            }
        }
        relations
    }
}

/// Registry of language modules keyed by edition code.
pub struct RelationDispatcher {
    modules: FxHashMap<&'static str, Box<dyn LanguageModule>>,
}

impl RelationDispatcher {
    /// A dispatcher with no languages registered.
    pub fn empty() -> Self {
        Self {
            modules: FxHashMap::default(),
        }
    }

    /// Registers `module`, replacing any module with the same code.
    pub fn register(&mut self, module: impl LanguageModule + 'static) -> &mut Self {
        debug!(code = module.code(), "Registering relation parser");
        self.modules.insert(module.code(), Box::new(module));
        self
    }

    pub fn supports(&self, code: &str) -> bool {
        self.modules.contains_key(code)
    }

    pub fn languages(&self) -> Vec<&'static str> {
        let mut codes: Vec<_> = self.modules.keys().copied().collect();
        codes.sort_unstable();
        codes
    }

    pub fn module(&self, code: &str) -> Result<&dyn LanguageModule> {
        self.modules
            .get(code)
            .map(|module| &**module)
            .ok_or_else(|| Error::UnsupportedLanguage(code.to_string()))
    }

    pub fn parse(&self, code: &str, pos_block: &str) -> Result<RelationMap> {
        Ok(self.module(code)?.parse(pos_block))
    }
}

impl Default for RelationDispatcher {
    fn default() -> Self {
        let mut dispatcher = Self::empty();
        dispatcher.register(Russian);
        dispatcher
    }
}

static DEFAULT_DISPATCHER: Lazy<RelationDispatcher> = Lazy::new(RelationDispatcher::default);

/// Extracts relations from one part-of-speech block with the built-in languages.
pub fn parse_relations(code: &str, pos_block: &str) -> Result<RelationMap> {
    DEFAULT_DISPATCHER.parse(code, pos_block)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Phrase, RelationEntry};

    struct Toy {
        header: Regex,
    }

    impl LanguageModule for Toy {
        fn code(&self) -> &'static str {
            "toy"
        }

        fn header_pattern(&self, kind: RelationKind) -> &Regex {
            match kind {
                RelationKind::Synonymy => &self.header,
                _ => &*NEVER,
            }
        }

        fn separators(&self) -> &[char] {
            &['/']
        }
    }

    static NEVER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^== Never ==\n").unwrap());

    fn toy() -> Toy {
        Toy {
            header: Regex::new(r"(?m)^== Syn ==\n").unwrap(),
        }
    }

    #[test]
    fn unsupported_language_fails() {
        let err = parse_relations("xx", "==== Синонимы ====\n# [[a]]\n").unwrap_err();
        assert!(matches!(err, Error::UnsupportedLanguage(code) if code == "xx"));
    }

    #[test]
    fn empty_dispatcher_supports_nothing() {
        let dispatcher = RelationDispatcher::empty();
        assert!(!dispatcher.supports("ru"));
        assert!(dispatcher.parse("ru", "").is_err());
    }

    #[test]
    fn default_registers_russian() {
        let dispatcher = RelationDispatcher::default();
        assert!(dispatcher.supports("ru"));
        assert_eq!(dispatcher.languages(), vec!["ru"]);
    }

    #[test]
    fn registering_new_language() {
        let mut dispatcher = RelationDispatcher::default();
        dispatcher.register(toy());
        assert_eq!(dispatcher.languages(), vec!["ru", "toy"]);

        let map = dispatcher.parse("toy", "== Syn ==\n# a / b\n").unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(
            map[&RelationKind::Synonymy],
            vec![RelationEntry::new(None, vec![Phrase::new("a"), Phrase::new("b")])]
        );
    }

    #[test]
    fn empty_block_has_no_relations() {
        assert!(parse_relations("ru", "").unwrap().is_empty());
    }
}
