//! Special character and entity expansion.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::RenderConfig;

/// Regex for pound amounts written with the symbol or its numeric entity.
/// Captures: (1) currency marker, (2) amount, (3) decimals, (4) magnitude letter.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static CURRENCY_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(£|&#163;)([0-9,]+)(\.[0-9][0-9]?)?([a-z]?)").expect("valid regex")
});

/// Typographic entities that have a plain ASCII spelling.
const ASCII_SUBSTITUTIONS: [(&str, &str); 4] = [
    ("&#8211;", "-"),
    ("&#8216;", "'"),
    ("&#8217;", "'"),
    ("&#8230;", "..."),
];

/// Converts special characters and entities into their TEN text equivalents.
///
/// The rules run in a fixed order: percent signs first (so that later output
/// is never escaped twice), then currency amounts, then the typographic
/// entities with ASCII spellings, and finally every other entity is decoded.
#[derive(Debug, Clone)]
pub struct EntityExpander {
    percent_substitute: String,
    currency_template: String,
}

impl EntityExpander {
    /// Create an expander with explicit substitutions.
    pub fn new(percent_substitute: impl Into<String>, currency_template: impl Into<String>) -> Self {
        Self {
            percent_substitute: percent_substitute.into(),
            currency_template: currency_template.into(),
        }
    }

    /// Create an expander from render settings.
    pub fn from_config(config: &RenderConfig) -> Self {
        Self::new(&config.percent_substitute, &config.currency_template)
    }

    /// Expand special characters in `text`.
    ///
    /// # Examples
    /// ```
    /// use ten_newsletter::text::EntityExpander;
    ///
    /// let expander = EntityExpander::new(" per cent", "${2}${3}${4} pounds");
    /// assert_eq!(expander.expand("5% off &#163;10.50"), "5 per cent off 10.50 pounds");
    /// assert_eq!(expander.expand("Fish &amp; chips&#8230;"), "Fish & chips...");
    /// ```
    pub fn expand(&self, text: &str) -> String {
        if text.is_empty() {
            return String::new();
        }

        let text = text.replace('%', &self.percent_substitute);
        let mut text = CURRENCY_PATTERN
            .replace_all(&text, self.currency_template.as_str())
            .into_owned();

        for (entity, replacement) in ASCII_SUBSTITUTIONS {
            if text.contains(entity) {
                text = text.replace(entity, replacement);
            }
        }

        html_escape::decode_html_entities(&text).into_owned()
    }
}

impl Default for EntityExpander {
    fn default() -> Self {
        Self::from_config(&RenderConfig::default())
    }
}
