//! Best-effort year inference from extracted text.

use std::sync::LazyLock;

use regex::Regex;

/// Only the head of the document is searched; the year of decision
/// appears on the title page when it appears at all.
const SEARCH_WINDOW_CHARS: usize = 1000;

/// Four-digit year between 1950 and 2099.
static YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(19[5-9]\d|20\d{2})\b").expect("static regex"));

/// Return the first plausible year in the first 1000 characters of
/// `text`, or an empty string. Never fails; no match is a normal
/// outcome, not an error.
pub fn infer_year(text: &str) -> String {
    let window_end = text
        .char_indices()
        .nth(SEARCH_WINDOW_CHARS)
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());

    YEAR_RE
        .find(&text[..window_end])
        .map(|m| m.as_str().to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn infers_first_year_in_window() {
        let text = "Federal Supreme Court, decided in 2003 at the Federal level; appeal 2005.";
        assert_eq!(infer_year(text), "2003");
    }

    #[test]
    fn lower_bound_is_1950() {
        assert_eq!(infer_year("published 1949, reissued 1951"), "1951");
    }

    #[test]
    fn no_match_yields_empty_string() {
        assert_eq!(infer_year("no digits that look like a year: 123, 12345"), "");
        assert_eq!(infer_year(""), "");
    }

    #[test]
    fn year_past_window_is_not_inferred() {
        let mut text = "x".repeat(1000);
        text.push_str(" 2003");
        assert_eq!(infer_year(&text), "");

        // Same year just inside the window is picked up.
        let mut text = "x".repeat(990);
        text.push_str(" 2003");
        assert_eq!(infer_year(&text), "2003");
    }

    #[test]
    fn window_is_measured_in_chars_not_bytes() {
        // 600 three-byte chars put the byte offset past 1000 while the
        // char offset stays inside the window.
        let mut text = "ፍ".repeat(600);
        text.push_str(" 2003");
        assert_eq!(infer_year(&text), "2003");
    }

    #[test]
    fn year_embedded_in_longer_number_is_ignored() {
        assert_eq!(infer_year("case number 120034"), "");
    }
}
