//! Individual rewrite passes of the inline markup filter.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use crate::config::URL_MARKER;
use crate::text::{EntityExpander, LineWrapper};

/// `<acronym title="...">inner</acronym>`, captures the inner text as group 2.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ACRONYM_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<acronym(\s[^>]+)*>([^>]+)</acronym>").expect("valid regex")
});

/// `<abbr title="...">inner</abbr>`, captures the inner text as group 2.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static ABBR_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)<abbr(\s[^>]+)*>([^>]+)</abbr>").expect("valid regex")
});

/// `<strong>inner</strong>`, captures the inner text as group 1.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static STRONG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<strong>([^>]+)</strong>").expect("valid regex"));

/// `<em>inner</em>`, captures the inner text as group 1.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static EM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<em>([^>]+)</em>").expect("valid regex"));

/// A line break, with or without a carriage return.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LINE_BREAK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\r?\n").expect("valid regex"));

/// Anchor with an `href`. The character in front of the URL (normally a
/// quote) must not be a letter, so unquoted URLs starting with a letter are
/// left for the tag stripper.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LINK_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)<a\shref=[^A-Z](?P<url>[A-Za-z0-9:/?&.;%~=@#-_ ]+)[^A-Z](\s[^>]+)*>(?P<text>[^<]+)</a>",
    )
    .expect("valid regex")
});

/// Opening and closing `<ul>`/`<ol>` tags plus the whitespace after them.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static LIST_CONTAINER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?(u|o)l>\s*").expect("valid regex"));

/// Any remaining opening or closing tag with a purely alphabetic name.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static TAG_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)</?[a-z]+(\s[^>]+)*>").expect("valid regex"));

/// A single rewrite step applied to the whole text.
///
/// Passes return `Cow::Borrowed` when they leave the text untouched.
pub trait FilterPass: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Rewrite `text`.
    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str>;
}

/// Replace every match of a static pattern with a replacement template.
pub struct RegexPass {
    name: &'static str,
    pattern: &'static Regex,
    replacement: &'static str,
}

impl RegexPass {
    /// `<acronym>` wrappers are reduced to their content.
    #[must_use]
    pub fn unwrap_acronyms() -> Self {
        Self {
            name: "unwrap-acronym",
            pattern: &ACRONYM_PATTERN,
            replacement: "${2}",
        }
    }

    /// `<abbr>` wrappers are reduced to their content.
    #[must_use]
    pub fn unwrap_abbreviations() -> Self {
        Self {
            name: "unwrap-abbr",
            pattern: &ABBR_PATTERN,
            replacement: "${2}",
        }
    }

    /// `<strong>` wrappers are reduced to their content.
    #[must_use]
    pub fn unwrap_strong() -> Self {
        Self {
            name: "unwrap-strong",
            pattern: &STRONG_PATTERN,
            replacement: "${1}",
        }
    }

    /// `<em>` wrappers are reduced to their content.
    #[must_use]
    pub fn unwrap_em() -> Self {
        Self {
            name: "unwrap-em",
            pattern: &EM_PATTERN,
            replacement: "${1}",
        }
    }

    /// Every line break becomes a paragraph break.
    ///
    /// The wrapper treats single breaks as soft, so breaks present in the
    /// markup are doubled to survive wrapping.
    #[must_use]
    pub fn double_line_breaks() -> Self {
        Self {
            name: "double-line-breaks",
            pattern: &LINE_BREAK_PATTERN,
            replacement: "\n\n",
        }
    }

    /// `<ul>` and `<ol>` tags are removed together with following whitespace.
    #[must_use]
    pub fn strip_list_containers() -> Self {
        Self {
            name: "strip-list-containers",
            pattern: &LIST_CONTAINER_PATTERN,
            replacement: "",
        }
    }

    /// Catch-all: remove every remaining tag.
    #[must_use]
    pub fn strip_tags() -> Self {
        Self {
            name: "strip-tags",
            pattern: &TAG_PATTERN,
            replacement: "",
        }
    }
}

impl FilterPass for RegexPass {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.pattern.replace_all(text, self.replacement)
    }
}

/// Replace every occurrence of a fixed string.
pub struct LiteralPass {
    name: &'static str,
    from: &'static str,
    to: String,
}

impl LiteralPass {
    /// A list item directly followed by a paragraph becomes a paragraph break.
    #[must_use]
    pub fn list_paragraph_breaks() -> Self {
        Self {
            name: "list-paragraph-breaks",
            from: "</li><p>",
            to: "\n\n".to_string(),
        }
    }

    /// `<li>` becomes the list item prefix.
    #[must_use]
    pub fn list_items(prefix: impl Into<String>) -> Self {
        Self {
            name: "list-items",
            from: "<li>",
            to: prefix.into(),
        }
    }
}

impl FilterPass for LiteralPass {
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        if text.contains(self.from) {
            Cow::Owned(text.replace(self.from, &self.to))
        } else {
            Cow::Borrowed(text)
        }
    }
}

/// Expand hyperlinks into their text followed by an isolated URL line.
///
/// `<a href="URL">Text</a>` becomes `Text`, a line break, the URL marker
/// with the URL, and another line break. Site-relative URLs (starting with
/// `/`) are qualified with the base URL. Mail links keep only their text.
pub struct LinkPass {
    base_url: String,
}

impl LinkPass {
    /// Create a link pass resolving relative URLs against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
        }
    }

    /// Resolve a link target, returning `None` for mail links.
    #[must_use]
    pub fn resolve_url(&self, url: &str) -> Option<String> {
        let url = url.trim();
        let resolved = if url.starts_with('/') {
            format!("{}{url}", self.base_url.trim_end_matches('/'))
        } else {
            url.to_string()
        };

        if resolved.to_lowercase().starts_with("mailto") {
            None
        } else {
            Some(resolved)
        }
    }

    fn convert(&self, caps: &Captures<'_>) -> String {
        let text = &caps["text"];
        match self.resolve_url(&caps["url"]) {
            Some(url) => format!("{text}\n{URL_MARKER}{url}\n"),
            None => text.to_string(),
        }
    }
}

impl FilterPass for LinkPass {
    fn name(&self) -> &'static str {
        "expand-links"
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        LINK_PATTERN.replace_all(text, |caps: &Captures<'_>| self.convert(caps))
    }
}

/// Expand special characters and entities.
pub struct EntityPass {
    expander: EntityExpander,
}

impl EntityPass {
    /// Wrap an expander as a filter pass.
    pub fn new(expander: EntityExpander) -> Self {
        Self { expander }
    }
}

impl FilterPass for EntityPass {
    fn name(&self) -> &'static str {
        "expand-entities"
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        Cow::Owned(self.expander.expand(text))
    }
}

/// Hard-wrap the text.
pub struct WrapPass {
    wrapper: LineWrapper,
}

impl WrapPass {
    /// Wrap a line wrapper as a filter pass.
    pub fn new(wrapper: LineWrapper) -> Self {
        Self { wrapper }
    }
}

impl FilterPass for WrapPass {
    fn name(&self) -> &'static str {
        "wrap-lines"
    }

    fn apply<'t>(&self, text: &'t str) -> Cow<'t, str> {
        Cow::Owned(self.wrapper.wrap(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(pass: &dyn FilterPass, text: &str) -> String {
        pass.apply(text).into_owned()
    }

    #[test]
    fn test_unwrap_acronym_discards_attributes() {
        assert_eq!(
            apply(
                &RegexPass::unwrap_acronyms(),
                r#"The <acronym title="Text Email Newsletter">TEN</acronym> standard"#
            ),
            "The TEN standard"
        );
    }

    #[test]
    fn test_unwrap_abbr_case_insensitive() {
        assert_eq!(
            apply(&RegexPass::unwrap_abbreviations(), "<ABBR>etc</ABBR>."),
            "etc."
        );
        assert_eq!(
            apply(&RegexPass::unwrap_abbreviations(), "<abbr>e.g.</abbr>"),
            "e.g."
        );
    }

    #[test]
    fn test_unwrap_emphasis() {
        assert_eq!(
            apply(&RegexPass::unwrap_strong(), "a <strong>bold</strong> move"),
            "a bold move"
        );
        assert_eq!(
            apply(&RegexPass::unwrap_em(), "an <EM>important</EM> note"),
            "an important note"
        );
    }

    #[test]
    fn test_unwrap_leaves_text_borrowed_when_nothing_matches() {
        let result = RegexPass::unwrap_strong().apply("plain text");
        assert!(matches!(result, Cow::Borrowed(_)));
    }

    #[test]
    fn test_double_line_breaks() {
        let pass = RegexPass::double_line_breaks();
        assert_eq!(apply(&pass, "one\ntwo"), "one\n\ntwo");
        assert_eq!(apply(&pass, "one\r\ntwo"), "one\n\ntwo");
    }

    #[test]
    fn test_link_relative_url_gets_base() {
        let pass = LinkPass::new("https://example.org");
        assert_eq!(
            apply(&pass, r#"Visit <a href="/about">our page</a> for details"#),
            format!("Visit our page\n{URL_MARKER}https://example.org/about\n for details")
        );
    }

    #[test]
    fn test_link_base_trailing_slash() {
        let pass = LinkPass::new("https://example.org/");
        assert_eq!(
            pass.resolve_url("/news"),
            Some("https://example.org/news".to_string())
        );
    }

    #[test]
    fn test_link_absolute_url_with_attributes() {
        let pass = LinkPass::new("https://example.org");
        assert_eq!(
            apply(
                &pass,
                r#"<a href="http://www.headstar.com/ten/" title="TEN">the standard</a>"#
            ),
            format!("the standard\n{URL_MARKER}http://www.headstar.com/ten/\n")
        );
    }

    #[test]
    fn test_link_mailto_keeps_text_only() {
        let pass = LinkPass::new("https://example.org");
        assert_eq!(
            apply(&pass, r#"<a href="MAILTO:news@example.org">Email us</a> today"#),
            "Email us today"
        );
    }

    #[test]
    fn test_link_unquoted_url_starting_with_letter_not_expanded() {
        let pass = LinkPass::new("https://example.org");
        let text = "<a href=http://example.org/>Home</a>";
        assert_eq!(apply(&pass, text), text);
    }

    #[test]
    fn test_multiple_links() {
        let pass = LinkPass::new("https://example.org");
        assert_eq!(
            apply(&pass, r#"<a href="/a">A</a> and <a href="/b">B</a>"#),
            format!(
                "A\n{URL_MARKER}https://example.org/a\n and B\n{URL_MARKER}https://example.org/b\n"
            )
        );
    }

    #[test]
    fn test_strip_list_containers() {
        assert_eq!(
            apply(&RegexPass::strip_list_containers(), "<UL>\n  <li>x</li></ul> after"),
            "<li>x</li>after"
        );
    }

    #[test]
    fn test_list_paragraph_breaks() {
        assert_eq!(
            apply(&LiteralPass::list_paragraph_breaks(), "<li>last</li><p>Next"),
            "<li>last\n\nNext"
        );
    }

    #[test]
    fn test_list_items_use_prefix() {
        assert_eq!(
            apply(&LiteralPass::list_items("* "), "<li>one</li><li>two</li>"),
            "* one</li>* two</li>"
        );
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(
            apply(
                &RegexPass::strip_tags(),
                r#"<p class="intro">Hello<br />world</P><span>!</span>"#
            ),
            "Helloworld!"
        );
    }

    #[test]
    fn test_strip_tags_ignores_non_alphabetic_names() {
        assert_eq!(apply(&RegexPass::strip_tags(), "<h2>Title</h2>"), "<h2>Title</h2>");
    }

    #[test]
    fn test_entity_pass() {
        let pass = EntityPass::new(EntityExpander::default());
        assert_eq!(apply(&pass, "Q&amp;A"), "Q&A");
    }

    #[test]
    fn test_wrap_pass() {
        let pass = WrapPass::new(LineWrapper::default());
        assert_eq!(apply(&pass, "Short line"), "Short line. ");
    }
}
