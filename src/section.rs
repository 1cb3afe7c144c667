use once_cell::sync::Lazy;
use regex::Regex;

/// A line opening any section: two or more leading `=`.
static HEADER_LINE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*={2,}").unwrap());

pub fn is_header_line(line: &str) -> bool {
    HEADER_LINE_REGEX.is_match(line)
}

/// Returns the body of the first section whose header matches `header`.
///
/// The header pattern must consume its own line terminator. The body runs
/// from the end of the header match up to (not including) the next header
/// line or the first blank line. `None` means the header is absent; an
/// empty body is returned as `Some("")` and callers treat it like absence.
pub fn locate<'a>(body: &'a str, header: &Regex) -> Option<&'a str> {
    let header_match = header.find(body)?;
    let rest = &body[header_match.end()..];

    let mut end = 0;
    for line in rest.split_inclusive('\n') {
        let content = line.trim_end_matches(['\n', '\r']);
        if content.trim().is_empty() || is_header_line(content) {
            break;
        }
        end += line.len();
    }

    Some(rest[..end].trim_end_matches(['\n', '\r']))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn synonyms_header() -> Regex {
        Regex::new(r"(?m)^[ \t]*={2,4}[ \t]*Синонимы[ \t]*={2,4}[ \t]*(?:\r?\n|\z)").unwrap()
    }

    #[test]
    fn absent_header() {
        let text = "==== Антонимы ====\n# [[враг]]\n";
        assert_eq!(locate(text, &synonyms_header()), None);
    }

    #[test]
    fn body_until_next_header() {
        let text = "==== Синонимы ====\n# [[служба]]\n# [[пост]]\n==== Антонимы ====\n# -\n";
        assert_eq!(
            locate(text, &synonyms_header()),
            Some("# [[служба]]\n# [[пост]]")
        );
    }

    #[test]
    fn body_until_blank_line() {
        let text = "==== Синонимы ====\n# [[a]]\n\n# [[b]]\n";
        assert_eq!(locate(text, &synonyms_header()), Some("# [[a]]"));
    }

    #[test]
    fn whitespace_only_line_terminates() {
        let text = "==== Синонимы ====\n# [[a]]\n   \t\n# [[b]]\n";
        assert_eq!(locate(text, &synonyms_header()), Some("# [[a]]"));
    }

    #[test]
    fn header_followed_by_header_is_empty() {
        let text = "==== Синонимы ====\n==== Антонимы ====\n# [[a]]\n";
        assert_eq!(locate(text, &synonyms_header()), Some(""));
    }

    #[test]
    fn header_followed_by_blank_line_is_empty() {
        let text = "==== Синонимы ====\n\n# [[a]]\n";
        assert_eq!(locate(text, &synonyms_header()), Some(""));
    }

    #[test]
    fn deeper_sub_header_terminates() {
        let text = "=== Синонимы ===\n# [[a]]\n===== Примечания =====\n# [[b]]";
        assert_eq!(locate(text, &synonyms_header()), Some("# [[a]]"));
    }

    #[test]
    fn body_at_end_of_text() {
        let text = "==== Синонимы ====\n# [[a]]";
        assert_eq!(locate(text, &synonyms_header()), Some("# [[a]]"));
    }

    #[test]
    fn crlf_line_endings() {
        let text = "==== Синонимы ====\r\n# [[a]]\r\n# [[b]]\r\n\r\n";
        assert_eq!(locate(text, &synonyms_header()), Some("# [[a]]\r\n# [[b]]"));
    }

    #[test]
    fn header_line_shapes() {
        assert!(is_header_line("== Русский =="));
        assert!(is_header_line("  ==== Синонимы ===="));
        assert!(!is_header_line("= {{-ru-}} ="));
        assert!(!is_header_line("# [[a]]"));
        assert!(!is_header_line("----"));
    }
}
