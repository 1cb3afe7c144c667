use crate::models::{RelationEntry, RelationKind, RelationList};
use crate::phrase;
use crate::placeholder::is_placeholder;
use crate::section;
use once_cell::sync::Lazy;
use regex::Regex;
use tracing::{debug, trace};

/// Start of one sense line: `#` with optional whitespace.
static LINE_START_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#\s*").unwrap());

/// Finds the section matching `header` in `text` and parses its sense lines.
pub fn parse_kind(
    text: &str,
    header: &Regex,
    kind: RelationKind,
    separators: &[char],
) -> Option<RelationList> {
    let Some(body) = section::locate(text, header) else {
        trace!(%kind, "Relation section absent");
        return None;
    };
    if body.is_empty() {
        debug!(%kind, "Relation section is empty");
        return None;
    }
    parse_section(body, kind, separators)
}

/// Parses the body of one relation section into a sense-indexed list.
///
/// Scanning stops at the first line without a `#` marker. Returns `None`
/// when no line carries a real relation.
pub fn parse_section(body: &str, kind: RelationKind, separators: &[char]) -> Option<RelationList> {
    let mut list = RelationList::new();

    for line in body.split('\n') {
        let line = line.trim_end_matches('\r');
        let Some(marker) = LINE_START_REGEX.find(line) else {
            trace!(%kind, line, "Line without sense marker ends the section");
            break;
        };
        list.push(parse_line(&line[marker.end()..], separators));
    }

    if list.iter().all(Option::is_none) {
        debug!(%kind, senses = list.len(), "Relation section holds only placeholders");
        return None;
    }

    debug!(
        %kind,
        senses = list.len(),
        filled = list.iter().filter(|e| e.is_some()).count(),
        "Parsed relation section"
    );
    Some(list)
}

/// Parses one sense line with its marker already removed.
pub fn parse_line(text: &str, separators: &[char]) -> Option<RelationEntry> {
    let text = text.trim_end();
    if is_placeholder(text) {
        return None;
    }
    RelationEntry::new(None, phrase::tokenize(text, separators))
}
