//! Rich-text markup flattening for previews and statistics
//!
//! Note content is an opaque rich-text blob (HTML produced by the editor).
//! The store never interprets it, except to derive a plain-text view for
//! list tooltips, the status bar and search-result snippets.

use regex::Regex;
use std::sync::LazyLock;

/// Marker appended to a truncated preview
pub const ELLIPSIS: &str = "...";

/// Compiled patterns applied in order.
///
/// Style and script blocks go first so their bodies do not leak into the
/// text once the surrounding tags are removed.
static MARKUP_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    vec![
        (Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap(), " "),
        (Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap(), " "),
        (Regex::new(r"(?s)<!--.*?-->").unwrap(), " "),
        // Block-level tags separate words
        (
            Regex::new(
                r"(?i)</?(?:p|br|hr|div|li|ul|ol|h[1-6]|tr|td|th|table|blockquote|pre|body|html|head)\b[^>]*>",
            )
            .unwrap(),
            " ",
        ),
        // Inline tags vanish without splitting the word they sit in
        (Regex::new(r"<[^>]*>").unwrap(), ""),
    ]
});

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

const ENTITIES: &[(&str, &str)] = &[
    ("&nbsp;", " "),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
    ("&apos;", "'"),
    // Last, so "&amp;lt;" decodes to "&lt;" and not "<"
    ("&amp;", "&"),
];

/// Strip markup tags and collapse whitespace runs into single spaces.
///
/// ```
/// use notepad_core::utils::strip_markup;
///
/// assert_eq!(strip_markup("<p>Hello</p><p>World</p>"), "Hello World");
/// assert_eq!(strip_markup("  a \n\t b  "), "a b");
/// ```
pub fn strip_markup(content: &str) -> String {
    let mut result = content.to_string();

    for (pattern, replacement) in MARKUP_PATTERNS.iter() {
        result = pattern.replace_all(&result, *replacement).to_string();
    }

    for (entity, text) in ENTITIES {
        if result.contains(entity) {
            result = result.replace(entity, text);
        }
    }

    WHITESPACE_RE.replace_all(&result, " ").trim().to_string()
}

/// Plain-text preview truncated to `max_len` characters.
///
/// Truncation counts characters, not bytes, and appends [`ELLIPSIS`] only
/// when something was cut off.
pub fn preview(content: &str, max_len: usize) -> String {
    let plain = strip_markup(content);

    match plain.char_indices().nth(max_len) {
        Some((cut, _)) => format!("{}{}", &plain[..cut], ELLIPSIS),
        None => plain,
    }
}

/// Character and word counts of a note's plain text
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextStats {
    pub chars: usize,
    pub words: usize,
}

pub fn text_stats(content: &str) -> TextStats {
    let plain = strip_markup(content);
    TextStats {
        chars: plain.chars().count(),
        words: plain.split_whitespace().count(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_simple_tags() {
        assert_eq!(strip_markup("<b>bold</b>"), "bold");
        assert_eq!(strip_markup("text <br/> more"), "text more");
    }

    #[test]
    fn test_strip_editor_document() {
        let html = r#"<!DOCTYPE HTML><html><head><style type="text/css">
p, li { white-space: pre-wrap; }
</style></head><body><p>Standup at <span style="font-weight:600;">10</span></p></body></html>"#;
        assert_eq!(strip_markup(html), "Standup at 10");
    }

    #[test]
    fn test_inline_tags_do_not_split_words() {
        assert_eq!(
            strip_markup("Stand<b>up</b> at 1<i>0</i>am"),
            "Standup at 10am"
        );
        assert_eq!(
            text_stats("<p>re<span style=\"color:red\">ad</span>me</p>").words,
            1
        );
    }

    #[test]
    fn test_block_tags_separate_words() {
        assert_eq!(strip_markup("one<br>two<P>three</P><li>four</li>"), "one two three four");
        assert_eq!(strip_markup("<h2>Title</h2>Body"), "Title Body");
    }

    #[test]
    fn test_strip_decodes_entities() {
        assert_eq!(strip_markup("a&nbsp;&lt;b&gt;&amp;c"), "a <b>&c");
        assert_eq!(strip_markup("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(strip_markup("Plain text"), "Plain text");
        assert_eq!(strip_markup(""), "");
    }

    #[test]
    fn test_preview_short_content_not_truncated() {
        assert_eq!(preview("<p>short</p>", 100), "short");
        assert_eq!(preview("exactly5", 8), "exactly5");
    }

    #[test]
    fn test_preview_truncates_with_ellipsis() {
        assert_eq!(preview("abcdefghij", 4), "abcd...");
        assert_eq!(preview("<p>one   two three</p>", 7), "one two...");
    }

    #[test]
    fn test_preview_counts_characters_not_bytes() {
        assert_eq!(preview("新建笔记内容", 2), "新建...");
    }

    #[test]
    fn test_preview_zero_length() {
        assert_eq!(preview("anything", 0), "...");
        assert_eq!(preview("", 0), "");
    }

    #[test]
    fn test_text_stats() {
        let stats = text_stats("<p>Hello big</p><p>world</p>");
        assert_eq!(stats, TextStats { chars: 15, words: 3 });
        assert_eq!(text_stats(""), TextStats::default());
    }
}
