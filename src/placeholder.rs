use once_cell::sync::Lazy;
use regex::Regex;

/// A lone dash (or nothing) between optional whitespace.
static DASHES_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\s*[-‐‒–—―]?\s*$").unwrap());

/// Exact lines that mark "no relation for this sense".
pub const PLACEHOLDER_LITERALS: &[&str] = &["&#160;", "&nbsp;", "{{-}}"];

pub fn is_placeholder(text: &str) -> bool {
    text.is_empty() || DASHES_REGEX.is_match(text) || PLACEHOLDER_LITERALS.contains(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_is_placeholder() {
        assert!(is_placeholder(""));
        assert!(is_placeholder("   "));
    }

    #[test]
    fn dash_variants() {
        for dash in ["-", "‐", "‒", "–", "—", "―"] {
            assert!(is_placeholder(dash), "{dash}");
            assert!(is_placeholder(&format!("  {dash} ")), "{dash}");
        }
    }

    #[test]
    fn non_breaking_space() {
        assert!(is_placeholder("&#160;"));
        assert!(is_placeholder("&nbsp;"));
        assert!(is_placeholder("\u{a0}"));
    }

    #[test]
    fn empty_template() {
        assert!(is_placeholder("{{-}}"));
    }

    #[test]
    fn double_dash_is_not_placeholder() {
        assert!(!is_placeholder("--"));
        assert!(!is_placeholder("- -"));
    }

    #[test]
    fn words_are_not_placeholders() {
        assert!(!is_placeholder("[[врач]]"));
        assert!(!is_placeholder("- [[врач]]"));
        assert!(!is_placeholder("{{-}} [[врач]]"));
    }
}
