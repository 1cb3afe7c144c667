//! Sememe: Wiktionary dump reading and semantic relation extraction
//!
//! This crate streams Wiktionary XML dumps and extracts, for every part of
//! speech of an entry, the semantic relations listed in its wiki-text:
//! synonyms, antonyms, hypernyms, hyponyms, coordinate terms, holonyms and
//! meronyms. Relations are aligned to word senses: index *i* of every
//! relation list refers to the same sense.
//!
//! 1. **Dump reading** -- Detect bzip2 compression (file suffix confirmed by
//!    magic bytes), decompress on the fly and turn the XML into tag events
//!    delivered to a [`parser::DumpHandler`] without loading the dump
//! 2. **Page assembly** -- [`pages::WikiReader`] yields one
//!    [`models::WikiPage`] at a time
//! 3. **Relation extraction** -- [`language::RelationDispatcher`] picks the
//!    header vocabulary of a Wiktionary edition, finds each relation section,
//!    splits it into sense lines and tokenizes every line into phrases
//!
//! # Key Modules
//!
//! - [`parser`] -- Streaming XML reader with bzip2 detection and handler hooks
//! - [`pages`] -- Page builder and lazy page iterator
//! - [`language`] -- Per-language relation modules and the dispatcher
//! - [`russian`] -- Russian Wiktionary headers
//! - [`relation`] -- Sense-line parsing of one relation section
//! - [`section`] -- Section body lookup by header pattern
//! - [`phrase`] -- Phrase splitting and link parsing
//! - [`placeholder`] -- "No relation for this sense" markers
//! - [`models`] -- Relation and page data types
//! - [`extract`] -- Parallel per-dump extraction into JSON lines
//! - [`stats`] -- Atomic counters for extraction metrics
//! - [`error`] -- Fatal error kinds
//! - [`config`] -- Constants
//!
//! # Example Usage
//!
//! ```
//! use sememe::models::RelationKind;
//!
//! let text = "==== Синонимы ====\n# [[служба]]\n# -\n# [[пост]]\n";
//! let relations = sememe::parse_relations("ru", text).unwrap();
//! let synonyms = &relations[&RelationKind::Synonymy];
//! assert_eq!(synonyms.len(), 3);
//! assert!(synonyms[1].is_none());
//! ```
//!
//! ```bash
//! sememe extract -i ruwiktionary-latest-pages-articles.xml.bz2 -o output/
//! ```

pub mod config;
pub mod error;
pub mod extract;
pub mod language;
pub mod models;
pub mod pages;
pub mod parser;
pub mod phrase;
pub mod placeholder;
pub mod relation;
pub mod russian;
pub mod section;
pub mod stats;

pub use error::{Error, Result};
pub use language::parse_relations;
