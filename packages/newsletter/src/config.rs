//! Configuration constants and render settings.
//!
//! Every string the TEN layout needs (structural prefixes, labels, the list
//! bullet, the footer lines) lives in [`RenderConfig`] so output can be
//! localized or adjusted without touching the pipeline. Defaults follow the
//! English wording of the standard.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::{NewsletterError, Result};

/// Line width the TEN standard wraps at.
pub const DEFAULT_WRAP_WIDTH: usize = 70;

/// Narrowest wrap width accepted from configuration.
///
/// Anything smaller makes nearly every word a line of its own.
pub const MIN_WRAP_WIDTH: usize = 20;

/// Maximum size of an input document in bytes (1 MB).
pub const MAX_INPUT_SIZE: usize = 1_000_000;

/// Sentinel placed in front of URLs by link expansion.
///
/// Lines starting with this marker are never wrapped or punctuated by the
/// line wrapper; the marker itself is removed on output.
pub const URL_MARKER: &str = "#MatchedUrl#";

/// Bullet placed in front of list items.
pub const DEFAULT_LIST_ITEM_PREFIX: &str = "- ";

/// Settings and resource strings used when rendering a newsletter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Prefix of the newsletter title line.
    pub newsletter_prefix: String,
    /// Prefix of section header lines (and of the contents header).
    pub section_prefix: String,
    /// Prefix of article header lines.
    pub article_prefix: String,
    /// Between an article number and its title.
    pub article_number_separator: String,
    /// Between a section number and its title.
    pub section_number_separator: String,
    /// Word used for sections, e.g. "Section 1".
    pub section_label: String,
    /// Title of the contents listing.
    pub contents_label: String,
    /// Word used for the newsletter in the closing line.
    pub newsletter_label: String,
    /// Appended to labels in closing lines, e.g. "[Contents ends].".
    pub ends_label: String,
    /// First line of the conformance footer.
    pub conformance_line1: String,
    /// Second line of the conformance footer.
    pub conformance_line2: String,
    /// Address of the standard, printed in the footer.
    pub conformance_url: String,
    /// Replacement for `<li>`.
    pub list_item_prefix: String,
    /// Prepended to links whose target starts with `/`.
    pub base_url: String,
    /// Replacement for a literal `%`.
    pub percent_substitute: String,
    /// Replacement template for pound amounts.
    ///
    /// Uses regex replacement syntax: `${2}` is the amount, `${3}` the
    /// decimals and `${4}` a trailing magnitude letter such as `m`.
    pub currency_template: String,
    /// Column at which body text is wrapped.
    pub wrap_width: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            newsletter_prefix: "*** ".to_string(),
            section_prefix: "** ".to_string(),
            article_prefix: "* ".to_string(),
            article_number_separator: ": ".to_string(),
            section_number_separator: ": ".to_string(),
            section_label: "Section".to_string(),
            contents_label: "Contents".to_string(),
            newsletter_label: "Newsletter".to_string(),
            ends_label: " ends".to_string(),
            conformance_line1: "This newsletter conforms to the Text Email Newsletter (TEN) standard,"
                .to_string(),
            conformance_line2: "a set of guidelines for accessible plain text newsletters. See:"
                .to_string(),
            conformance_url: "http://www.headstar.com/ten/".to_string(),
            list_item_prefix: DEFAULT_LIST_ITEM_PREFIX.to_string(),
            base_url: String::new(),
            percent_substitute: " per cent".to_string(),
            currency_template: "${2}${3}${4} pounds".to_string(),
            wrap_width: DEFAULT_WRAP_WIDTH,
        }
    }
}

impl RenderConfig {
    /// Set the base URL used to qualify relative links.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the wrap width.
    #[must_use]
    pub fn with_wrap_width(mut self, wrap_width: usize) -> Self {
        self.wrap_width = wrap_width;
        self
    }

    /// Set the list item prefix.
    #[must_use]
    pub fn with_list_item_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.list_item_prefix = prefix.into();
        self
    }

    /// Parse a configuration from YAML. Missing keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed, contains unknown keys, or
    /// the resulting configuration fails [`RenderConfig::validate`].
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.len() > MAX_INPUT_SIZE {
            tracing::warn!(
                size = content.len(),
                max = MAX_INPUT_SIZE,
                "Configuration exceeds size limit"
            );
            return Err(NewsletterError::InputTooLarge {
                size: content.len(),
                max: MAX_INPUT_SIZE,
            });
        }

        // An empty document means "all defaults"
        let config: Self = if content.trim().is_empty() {
            Self::default()
        } else {
            serde_yaml_ng::from_str(content)?
        };
        config.validate()?;

        tracing::debug!(
            wrap_width = config.wrap_width,
            base_url = %config.base_url,
            "Loaded render configuration"
        );

        Ok(config)
    }

    /// Load a configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or its content is invalid.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading render configuration");
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }

    /// Check that the configuration can produce conforming output.
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` if the wrap width is below [`MIN_WRAP_WIDTH`]
    /// * `InvalidBaseUrl` if a non-empty base URL is not an absolute URL
    pub fn validate(&self) -> Result<()> {
        if self.wrap_width < MIN_WRAP_WIDTH {
            return Err(NewsletterError::InvalidConfig(format!(
                "wrap width {} is below minimum {MIN_WRAP_WIDTH}",
                self.wrap_width
            )));
        }

        if !self.base_url.is_empty() {
            let parsed =
                url::Url::parse(&self.base_url).map_err(|source| NewsletterError::InvalidBaseUrl {
                    url: self.base_url.clone(),
                    source,
                })?;
            if parsed.cannot_be_a_base() {
                return Err(NewsletterError::InvalidConfig(format!(
                    "base URL '{}' cannot be used to resolve paths",
                    self.base_url
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants_are_reasonable() {
        assert_eq!(DEFAULT_WRAP_WIDTH, 70);
        assert!(MIN_WRAP_WIDTH < DEFAULT_WRAP_WIDTH);
        assert!(URL_MARKER.is_ascii());
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(RenderConfig::default().validate().is_ok());
    }

    #[test]
    fn test_from_yaml_partial_keeps_defaults() {
        let config = RenderConfig::from_yaml_str(
            "base_url: https://example.org\nlist_item_prefix: \"* \"\n",
        )
        .unwrap();
        assert_eq!(config.base_url, "https://example.org");
        assert_eq!(config.list_item_prefix, "* ");
        assert_eq!(config.wrap_width, DEFAULT_WRAP_WIDTH);
        assert_eq!(config.contents_label, "Contents");
    }

    #[test]
    fn test_from_yaml_empty_is_default() {
        assert_eq!(RenderConfig::from_yaml_str("").unwrap(), RenderConfig::default());
    }

    #[test]
    fn test_from_yaml_unknown_key() {
        let result = RenderConfig::from_yaml_str("no_such_setting: 1\n");
        assert!(matches!(result, Err(NewsletterError::Yaml(_))));
    }

    #[test]
    fn test_validate_rejects_narrow_width() {
        let config = RenderConfig::default().with_wrap_width(5);
        assert!(matches!(
            config.validate(),
            Err(NewsletterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_rejects_relative_base_url() {
        let config = RenderConfig::default().with_base_url("example.org");
        assert!(matches!(
            config.validate(),
            Err(NewsletterError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_non_base_url() {
        let config = RenderConfig::default().with_base_url("mailto:someone@example.org");
        assert!(matches!(
            config.validate(),
            Err(NewsletterError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_from_yaml_too_large() {
        let content = format!("base_url: '{}'", "a".repeat(MAX_INPUT_SIZE));
        assert!(matches!(
            RenderConfig::from_yaml_str(&content),
            Err(NewsletterError::InputTooLarge { .. })
        ));
    }
}
