use aho_corasick::{AhoCorasick, MatchKind};
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .build(["&", "<", ">", "\"", "'"])
        .expect("Failed to build XML escaper")
});

// CRLF must win over a lone CR so a pair collapses to one newline
static LINE_BREAKS: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::builder()
        .match_kind(MatchKind::LeftmostLongest)
        .build(["\r\n", "\r"])
        .expect("Failed to build line break normalizer")
});

/// Character reference SpreadsheetML readers turn back into a line break.
pub const LINE_BREAK_ESCAPE: &str = "&#10;";

/// Escape XML special characters.
///
/// # Examples
///
/// ```
/// use livesheet::common::xml::escape_xml;
/// assert_eq!(escape_xml("a & b"), "a &amp; b");
/// assert_eq!(escape_xml("<tag>\"hello\"</tag>"), "&lt;tag&gt;&quot;hello&quot;&lt;/tag&gt;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Escape text for an inline-string cell.
///
/// Line endings (`\r\n` and lone `\r`) are normalized to `\n`, the result is
/// markup-escaped, and each `\n` becomes `&#10;` so one cell can hold several
/// lines.
///
/// # Examples
///
/// ```
/// use livesheet::common::xml::escape_cell_text;
/// assert_eq!(escape_cell_text("a < b\r\nc & d"), "a &lt; b&#10;c &amp; d");
/// ```
pub fn escape_cell_text(s: &str) -> String {
    let normalized = LINE_BREAKS.replace_all(s, &["\n", "\n"]);
    escape_xml(&normalized).replace('\n', LINE_BREAK_ESCAPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_all_specials() {
        assert_eq!(
            escape_xml(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &apos;Jerry&apos;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_cell_text_line_breaks() {
        assert_eq!(escape_cell_text("one\r\ntwo"), "one&#10;two");
        assert_eq!(escape_cell_text("one\rtwo"), "one&#10;two");
        assert_eq!(escape_cell_text("one\ntwo"), "one&#10;two");
        assert_eq!(escape_cell_text("one\r\n\r\ntwo"), "one&#10;&#10;two");
    }

    #[test]
    fn test_cell_text_escapes_markup() {
        assert_eq!(
            escape_cell_text(r#"5 > 3 & "quoted""#),
            "5 &gt; 3 &amp; &quot;quoted&quot;"
        );
        assert_eq!(escape_cell_text("评论数"), "评论数");
    }
}
