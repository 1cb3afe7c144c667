use crate::models::RelationMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Counts for one relation map.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RelationStats {
    pub lists: u64,
    pub senses: u64,
    pub placeholders: u64,
    pub phrases: u64,
}

impl RelationStats {
    pub fn of(relations: &RelationMap) -> Self {
        let mut stats = Self::default();
        for list in relations.values() {
            stats.lists += 1;
            for entry in list {
                match entry {
                    Some(entry) => {
                        stats.senses += 1;
                        stats.phrases += entry.phrases.len() as u64;
                    }
                    None => stats.placeholders += 1,
                }
            }
        }
        stats
    }
}

/// Statistics collected during the extraction process
#[derive(Default)]
pub struct ExtractionStats {
    pub pages_seen: AtomicU64,
    pub pages_skipped: AtomicU64,
    pub entries_processed: AtomicU64,
    pub entries_with_relations: AtomicU64,
    pub relation_lists: AtomicU64,
    pub relation_senses: AtomicU64,
    pub placeholders: AtomicU64,
    pub phrases: AtomicU64,
}

impl ExtractionStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inc_pages(&self) {
        self.pages_seen.fetch_add(1, Ordering::Relaxed);
    }

    /// Pages the reader dropped for lacking an id or a title.
    pub fn add_skipped(&self, count: u64) {
        self.pages_skipped.fetch_add(count, Ordering::Relaxed);
    }

    pub fn inc_entries(&self) {
        self.entries_processed.fetch_add(1, Ordering::Relaxed);
    }

    /// Records the relations of one entry.
    pub fn add_relations(&self, relations: &RelationStats) {
        if relations.lists == 0 {
            return;
        }
        self.entries_with_relations.fetch_add(1, Ordering::Relaxed);
        self.relation_lists
            .fetch_add(relations.lists, Ordering::Relaxed);
        self.relation_senses
            .fetch_add(relations.senses, Ordering::Relaxed);
        self.placeholders
            .fetch_add(relations.placeholders, Ordering::Relaxed);
        self.phrases.fetch_add(relations.phrases, Ordering::Relaxed);
    }

    pub fn pages(&self) -> u64 {
        self.pages_seen.load(Ordering::Relaxed)
    }

    pub fn skipped(&self) -> u64 {
        self.pages_skipped.load(Ordering::Relaxed)
    }

    pub fn entries(&self) -> u64 {
        self.entries_processed.load(Ordering::Relaxed)
    }

    pub fn entries_with_relations(&self) -> u64 {
        self.entries_with_relations.load(Ordering::Relaxed)
    }

    pub fn relation_lists(&self) -> u64 {
        self.relation_lists.load(Ordering::Relaxed)
    }

    pub fn relation_senses(&self) -> u64 {
        self.relation_senses.load(Ordering::Relaxed)
    }

    pub fn placeholders(&self) -> u64 {
        self.placeholders.load(Ordering::Relaxed)
    }

    pub fn phrases(&self) -> u64 {
        self.phrases.load(Ordering::Relaxed)
    }
}
