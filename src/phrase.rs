use crate::models::Phrase;
use once_cell::sync::Lazy;
use regex::Regex;

pub static LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[([^|\]]*)(?:\|([^\]]*))?\]\]").unwrap());

static WHOLE_LINK_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[\[([^|\]]*)(?:\|([^\]]*))?\]\]$").unwrap());

/// Abbreviated context label in front of the phrase, e.g. `частичн.: [[пост]]`.
static LABEL_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)^([^\[\]{}:]*?\.):\s*(\S.*)$").unwrap());

/// Splits one relation line into phrases.
///
/// Separators inside `[[...]]` links and `{{...}}` templates do not split.
/// Every non-empty segment yields exactly one phrase unless its rendered
/// text is empty.
pub fn tokenize(line: &str, separators: &[char]) -> Vec<Phrase> {
    split_phrases(line, separators)
        .into_iter()
        .map(str::trim)
        .filter(|segment| !segment.is_empty())
        .filter_map(parse_phrase)
        .collect()
}

/// Splits on `separators` at link/template depth 0.
pub fn split_phrases<'a>(line: &'a str, separators: &[char]) -> Vec<&'a str> {
    let mut segments = Vec::new();
    let mut depth: i32 = 0;
    let mut last_split = 0;
    let mut chars = line.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        let next = chars.peek().map(|&(_, n)| n);
        match (c, next) {
            ('[', Some('[')) | ('{', Some('{')) => {
                depth += 1;
                chars.next();
            }
            (']', Some(']')) | ('}', Some('}')) => {
                depth = (depth - 1).max(0);
                chars.next();
            }
            _ if depth == 0 && separators.contains(&c) => {
                segments.push(&line[last_split..i]);
                last_split = i + c.len_utf8();
            }
            _ => {}
        }
    }
    segments.push(&line[last_split..]);
    segments
}

/// Parses one trimmed segment into a phrase.
pub fn parse_phrase(segment: &str) -> Option<Phrase> {
    let (label, body) = match LABEL_REGEX.captures(segment) {
        Some(caps) => {
            let label = caps.get(1).map_or("", |m| m.as_str()).trim();
            let body = caps.get(2).map_or("", |m| m.as_str()).trim();
            (Some(label.to_string()), body)
        }
        None => (None, segment.trim()),
    };

    let text = render_links(body);
    if text.is_empty() {
        return None;
    }

    let target = WHOLE_LINK_REGEX
        .captures(body)
        .map(|caps| caps[1].trim().to_string())
        .filter(|target| !target.is_empty() && *target != text);

    Some(Phrase {
        text,
        target,
        label: label.filter(|l| !l.is_empty()),
    })
}

/// Replaces every `[[target|display]]` by its display form.
fn render_links(text: &str) -> String {
    let rendered = LINK_REGEX.replace_all(text, |caps: &regex::Captures| match caps.get(2) {
        Some(display) if !display.as_str().trim().is_empty() => display.as_str().trim().to_string(),
        _ => caps[1].trim().to_string(),
    });
    rendered.split_whitespace().collect::<Vec<_>>().join(" ")
}
