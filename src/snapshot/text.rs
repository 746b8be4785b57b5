//! Text summarisation for snapshot records

use unicode_segmentation::UnicodeSegmentation;

/// Default maximum number of grapheme clusters kept
pub const DEFAULT_TEXT_LIMIT: usize = 100;

/// Trim surrounding whitespace and keep at most `limit` grapheme clusters
///
/// Truncation never splits a user-perceived character: combining marks and
/// multi-code-point emoji stay whole. No ellipsis or marker is appended.
///
/// # Examples
///
/// ```
/// use layout_parity::snapshot::text::summarize;
///
/// assert_eq!(summarize("  hello world \n", 5), "hello");
/// assert_eq!(summarize("e\u{301}tude", 1), "e\u{301}");
/// ```
pub fn summarize(text: &str, limit: usize) -> String {
    let trimmed = text.trim();
    match trimmed.grapheme_indices(true).nth(limit) {
        Some((cut, _)) => trimmed[..cut].to_string(),
        None => trimmed.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_is_only_trimmed() {
        assert_eq!(summarize("\t  Hello  \n", 100), "Hello");
        assert_eq!(summarize("   ", 100), "");
    }

    #[test]
    fn test_long_text_is_cut_at_limit() {
        let text = "a".repeat(250);
        assert_eq!(summarize(&text, DEFAULT_TEXT_LIMIT).len(), 100);
    }

    #[test]
    fn test_cut_happens_after_trimming() {
        let text = format!("{}{}", " ".repeat(20), "b".repeat(120));
        assert_eq!(summarize(&text, 100), "b".repeat(100));
    }

    #[test]
    fn test_astral_and_combined_characters_stay_whole() {
        // Family emoji is one grapheme of several code points.
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let text = format!("{family}{family}{family}");
        assert_eq!(summarize(&text, 2), format!("{family}{family}"));

        let cjk = "功能测试页面";
        assert_eq!(summarize(cjk, 4), "功能测试");
    }

    #[test]
    fn test_zero_limit_yields_empty() {
        assert_eq!(summarize("abc", 0), "");
    }
}
