use std::borrow::Cow;

use html2text::render::text_renderer::TrivialDecorator;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ELLIPSIS: &str = "...";
const ELLIPSIS_WIDTH: usize = 3;

/// Terminal column width of `s`.
pub fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate `s` to at most `max_width` terminal columns, appending `...`
/// when something was cut.
///
/// Widths of 3 or less cannot hold a character plus the ellipsis, so the
/// string is cut hard instead.
///
/// ```
/// use feedreader::util::truncate_to_width;
///
/// assert_eq!(truncate_to_width("Short", 10), "Short");
/// assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
/// assert_eq!(truncate_to_width("Test", 2), "Te");
/// ```
pub fn truncate_to_width(s: &str, max_width: usize) -> Cow<'_, str> {
    if display_width(s) <= max_width {
        return Cow::Borrowed(s);
    }

    let (budget, suffix) = if max_width <= ELLIPSIS_WIDTH {
        (max_width, "")
    } else {
        (max_width - ELLIPSIS_WIDTH, ELLIPSIS)
    };

    let mut used = 0;
    let mut cut = 0;
    for (idx, c) in s.char_indices() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        cut = idx + c.len_utf8();
    }

    Cow::Owned(format!("{}{}", &s[..cut], suffix))
}

/// Drop control characters (including ESC) from feed-supplied text so it
/// cannot drive the terminal.
pub fn strip_control_chars(s: &str) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return Cow::Borrowed(s);
    }
    Cow::Owned(s.chars().filter(|c| !c.is_control()).collect())
}

/// Wrap width handed to html2text; line breaks are collapsed afterwards.
const HTML_RENDER_WIDTH: usize = 1000;

/// Reduce an HTML fragment to a single line of plain text of at most
/// `max_chars` characters (ellipsis included).
///
/// The fragment is rendered by html2text with no decorations (script and
/// style bodies are dropped, entities decoded), then whitespace runs
/// collapse to one space.
pub fn plain_text_snippet(html: &str, max_chars: usize) -> String {
    let rendered = html2text::from_read_with_decorator(
        html.as_bytes(),
        HTML_RENDER_WIDTH,
        TrivialDecorator::new(),
    );

    let collapsed = rendered.split_whitespace().collect::<Vec<_>>().join(" ");
    let collapsed = strip_control_chars(&collapsed).into_owned();

    if collapsed.chars().count() <= max_chars {
        return collapsed;
    }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    let mut cut: String = collapsed.chars().take(keep).collect();
    cut.truncate(cut.trim_end().len());
    cut.push_str(ELLIPSIS);
    cut
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_fits() {
        assert_eq!(truncate_to_width("Short", 10), "Short");
        assert!(matches!(truncate_to_width("Short", 5), Cow::Borrowed(_)));
    }

    #[test]
    fn test_truncate_ascii() {
        assert_eq!(truncate_to_width("Hello World", 8), "Hello...");
    }

    #[test]
    fn test_truncate_cjk() {
        // each ideograph is two columns
        assert_eq!(truncate_to_width("你好世界", 7), "你好...");
    }

    #[test]
    fn test_truncate_narrow() {
        assert_eq!(truncate_to_width("Test", 0), "");
        assert_eq!(truncate_to_width("Test", 3), "Tes");
    }

    #[test]
    fn test_strip_control_chars() {
        assert_eq!(strip_control_chars("plain"), "plain");
        assert_eq!(strip_control_chars("a\x1b[31mb\x07"), "a[31mb");
    }

    #[test]
    fn test_snippet_strips_tags_and_entities() {
        assert_eq!(
            plain_text_snippet("<p>Fish &amp; chips&#33;</p>\n<p>Today</p>", 100),
            "Fish & chips! Today"
        );
    }

    #[test]
    fn test_snippet_keeps_unknown_entity_text() {
        assert_eq!(plain_text_snippet("a &bogus; b & c", 100), "a &bogus; b & c");
    }

    #[test]
    fn test_snippet_hex_entity() {
        assert_eq!(plain_text_snippet("&#x41;BC", 100), "ABC");
    }

    #[test]
    fn test_snippet_bare_ampersand_before_tag() {
        assert_eq!(plain_text_snippet("Q&A<br>next", 100), "Q&A next");
    }

    #[test]
    fn test_snippet_drops_script_and_style() {
        assert_eq!(
            plain_text_snippet("<script>var x = 1;</script><p>Hello</p>", 100),
            "Hello"
        );
        assert_eq!(
            plain_text_snippet("<style>p { color: red; }</style>Styled", 100),
            "Styled"
        );
    }

    #[test]
    fn test_snippet_capped_with_ellipsis() {
        let long = "word ".repeat(100);
        let snippet = plain_text_snippet(&long, 20);
        assert!(snippet.chars().count() <= 20);
        assert!(snippet.ends_with("..."));
        assert!(snippet.starts_with("word word"));
    }
}
