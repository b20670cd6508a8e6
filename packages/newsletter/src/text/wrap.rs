//! Hard line wrapping for TEN body text.

use super::punctuation::ensure_full_stop;
use crate::config::{RenderConfig, DEFAULT_LIST_ITEM_PREFIX, DEFAULT_WRAP_WIDTH, URL_MARKER};

/// Wraps filtered text at a fixed column width.
///
/// Input is treated as logical lines separated by `\n`. Single line breaks
/// are soft: consecutive logical lines flow into the same paragraph. An empty
/// token (an empty line, or a double space) is a paragraph break. Lines
/// starting with [`URL_MARKER`] are emitted on a line of their own, never
/// wrapped or punctuated. Every other logical line gets terminal punctuation
/// before it is split into words.
#[derive(Debug, Clone)]
pub struct LineWrapper {
    width: usize,
    list_item_prefix: String,
}

impl LineWrapper {
    /// Create a wrapper for the given width and list bullet.
    pub fn new(width: usize, list_item_prefix: impl Into<String>) -> Self {
        Self {
            width,
            list_item_prefix: list_item_prefix.into(),
        }
    }

    /// Create a wrapper from render settings.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(config.wrap_width, &config.list_item_prefix)
    }

    /// Column width this wrapper breaks at.
    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Wrap `text`.
    ///
    /// Every output word is followed by a single space, so wrapped lines keep
    /// a trailing space. Tokens longer than the width are never split.
    ///
    /// # Examples
    /// ```
    /// use ten_newsletter::text::LineWrapper;
    ///
    /// let wrapper = LineWrapper::new(10, "- ");
    /// assert_eq!(wrapper.wrap("aaaaa bbbbb ccccc"), "aaaaa \nbbbbb \nccccc. ");
    /// ```
    pub fn wrap(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = text.replace('\r', "");
        let mut out = String::with_capacity(text.len() + text.len() / self.width.max(1) + 8);
        let mut column = 0usize;

        for line in text.split('\n') {
            // URLs go on a line of their own no matter how long
            if let Some(url) = line.strip_prefix(URL_MARKER) {
                out.push('\n');
                out.push_str(url);
                out.push('\n');
                column = 0;
                continue;
            }

            let line = ensure_full_stop(line, &self.list_item_prefix);

            for word in line.trim().split(' ') {
                if word.is_empty() {
                    out.push_str("\n\n");
                    column = 0;
                    continue;
                }

                // A lone full stop is left behind when a link ends a sentence
                if word == "." {
                    continue;
                }

                let len = word.chars().count();
                if column > 0 && column + len >= self.width {
                    out.push('\n');
                    column = 0;
                }

                out.push_str(word);
                out.push(' ');
                column += len + 1;
            }
        }

        strip_dangling_full_stop(&mut out);
        out
    }
}

impl Default for LineWrapper {
    fn default() -> Self {
        Self::new(DEFAULT_WRAP_WIDTH, DEFAULT_LIST_ITEM_PREFIX)
    }
}

/// Remove a full stop left alone on the final line.
///
/// If `text` ends with a line break followed by `. `, the line break and the
/// full stop are removed and the trailing space is kept.
///
/// Returns `true` if anything was removed.
pub fn strip_dangling_full_stop(text: &mut String) -> bool {
    if text.ends_with("\n. ") {
        let start = text.len() - "\n. ".len();
        text.replace_range(start..start + "\n.".len(), "");
        true
    } else {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(text: &str) -> Vec<&str> {
        text.split('\n').collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(LineWrapper::default().wrap(""), "");
    }

    #[test]
    fn test_single_line_gets_full_stop() {
        assert_eq!(LineWrapper::default().wrap("Hello world"), "Hello world. ");
    }

    #[test]
    fn test_wraps_at_width() {
        let wrapper = LineWrapper::new(10, "- ");
        assert_eq!(
            lines(&wrapper.wrap("aaaaa bbbbb ccccc")),
            vec!["aaaaa ", "bbbbb ", "ccccc. "]
        );
    }

    #[test]
    fn test_line_fills_up_to_width_including_space() {
        let wrapper = LineWrapper::new(10, "- ");
        // "aaaa " is 5 columns, "bbbb " brings it to exactly 10
        assert_eq!(lines(&wrapper.wrap("aaaa bbbb cc")), vec!["aaaa bbbb ", "cc. "]);
    }

    #[test]
    fn test_paragraph_break() {
        assert_eq!(
            LineWrapper::default().wrap("First para\n\nSecond para"),
            "First para. \n\nSecond para. "
        );
    }

    #[test]
    fn test_single_line_break_is_soft() {
        assert_eq!(
            LineWrapper::default().wrap("First line\nsecond line"),
            "First line. second line. "
        );
    }

    #[test]
    fn test_column_carries_across_soft_breaks() {
        let wrapper = LineWrapper::new(20, "- ");
        let wrapped = wrapper.wrap("one two three\nfour five six");
        for line in lines(&wrapped) {
            assert!(line.chars().count() <= 20, "line too long: {line:?}");
        }
        assert_eq!(lines(&wrapped), vec!["one two three. four ", "five six. "]);
    }

    #[test]
    fn test_double_space_is_paragraph_break() {
        assert_eq!(LineWrapper::default().wrap("One.  Two"), "One. \n\nTwo. ");
    }

    #[test]
    fn test_url_line_isolated() {
        let text = format!("Read more\n{URL_MARKER}https://example.org/a/very/long/path\nafterwards");
        assert_eq!(
            LineWrapper::new(20, "- ").wrap(&text),
            "Read more. \nhttps://example.org/a/very/long/path\nafterwards. "
        );
    }

    #[test]
    fn test_url_line_not_punctuated() {
        let text = format!("{URL_MARKER}https://example.org");
        assert_eq!(LineWrapper::default().wrap(&text), "\nhttps://example.org\n");
    }

    #[test]
    fn test_lone_full_stop_dropped() {
        let text = format!("See our site\n{URL_MARKER}https://example.org\n. More text");
        assert_eq!(
            LineWrapper::default().wrap(&text),
            "See our site. \nhttps://example.org\nMore text. "
        );
    }

    #[test]
    fn test_lone_full_stop_never_forces_a_break() {
        let wrapper = LineWrapper::new(10, "- ");
        assert_eq!(wrapper.wrap("aaaaaaaaa ."), "aaaaaaaaa ");
        assert_eq!(lines(&wrapper.wrap("aaaaaaaa . b")), vec!["aaaaaaaa ", "b. "]);
    }

    #[test]
    fn test_list_items_get_semicolons() {
        assert_eq!(
            LineWrapper::default().wrap("- One\n\n- Two"),
            "- One; \n\n- Two; "
        );
    }

    #[test]
    fn test_carriage_returns_removed() {
        assert_eq!(
            LineWrapper::default().wrap("First\r\n\r\nSecond"),
            "First. \n\nSecond. "
        );
    }

    #[test]
    fn test_long_word_not_split() {
        let long = "x".repeat(30);
        let wrapped = LineWrapper::new(20, "- ").wrap(&format!("short {long} end"));
        assert_eq!(lines(&wrapped), vec!["short ".to_string(), format!("{long} "), "end. ".to_string()]);
    }

    #[test]
    fn test_no_leading_break_for_first_long_word() {
        let long = "y".repeat(25);
        assert_eq!(LineWrapper::new(20, "- ").wrap(&long), format!("{long}. "));
    }

    #[test]
    fn test_width_counts_characters() {
        let wrapper = LineWrapper::new(11, "- ");
        // Four characters each, eight bytes each
        assert_eq!(wrapper.wrap("éééé àààà"), "éééé àààà. ");
    }

    #[test]
    fn test_lines_within_width() {
        let text = "Lorem ipsum dolor sit amet, consectetur adipiscing elit, sed do \
                    eiusmod tempor incididunt ut labore et dolore magna aliqua. Ut enim \
                    ad minim veniam, quis nostrud exercitation ullamco laboris nisi ut \
                    aliquip ex ea commodo consequat.";
        let wrapped = LineWrapper::default().wrap(text);
        assert!(wrapped.lines().count() > 1);
        for line in wrapped.lines() {
            assert!(line.chars().count() <= DEFAULT_WRAP_WIDTH, "line too long: {line:?}");
        }
    }

    #[test]
    fn test_rewrapping_stays_within_width() {
        let text = "The quick brown fox jumps over the lazy dog and keeps running \
                    across the field until the sun goes down behind the distant hills.\n\n\
                    A second paragraph follows with a few more words to wrap.";
        let wrapper = LineWrapper::new(30, "- ");
        let twice = wrapper.wrap(&wrapper.wrap(text));
        for line in twice.lines() {
            assert!(line.chars().count() <= 30, "line too long: {line:?}");
        }
    }

    #[test]
    fn test_width_from_config() {
        assert_eq!(LineWrapper::default().width(), DEFAULT_WRAP_WIDTH);
        let config = RenderConfig::default().with_wrap_width(40);
        assert_eq!(LineWrapper::from_config(&config).width(), 40);
    }

    #[test]
    fn test_strip_dangling_full_stop() {
        let mut text = "Last words \n. ".to_string();
        assert!(strip_dangling_full_stop(&mut text));
        assert_eq!(text, "Last words  ");
    }

    #[test]
    fn test_strip_dangling_full_stop_no_match() {
        let mut text = "Last words. ".to_string();
        assert!(!strip_dangling_full_stop(&mut text));
        assert_eq!(text, "Last words. ");
    }
}
