//! Newsletter data model.
//!
//! Plain containers for the newsletter, its sections and their articles.
//! They can be built in code or loaded from YAML:
//!
//! ```yaml
//! title: Community News
//! strapline: The monthly bulletin for residents
//! sections:
//!   - title: Events
//!     articles:
//!       - title: Spring fair
//!         text: Join us at the <a href="/fair">spring fair</a>
//! ```

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::config::MAX_INPUT_SIZE;
use crate::error::{NewsletterError, Result};
use crate::filter::InlineMarkupFilter;

/// A single article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Article {
    /// Plain-text title.
    #[serde(default)]
    pub title: String,

    /// Body text, may contain inline markup.
    #[serde(default)]
    pub text: String,
}

impl Article {
    /// Create an article.
    pub fn new(title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
        }
    }

    /// Whether the article takes part in rendering and numbering.
    ///
    /// Articles without body text are skipped.
    #[must_use]
    pub fn is_present(&self) -> bool {
        !self.text.is_empty()
    }

    /// Body text run through the markup filter. Computed on every call.
    pub fn filtered_text(&self, filter: &InlineMarkupFilter) -> String {
        filter.filter(&self.text)
    }
}

/// A section grouping articles.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Section {
    /// Section title. Empty for an untitled section, which is rendered
    /// without header and footer lines.
    #[serde(default)]
    pub title: String,

    /// Articles in display order.
    #[serde(default)]
    pub articles: Vec<Article>,
}

impl Section {
    /// Create an empty section with a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            articles: Vec::new(),
        }
    }

    /// Create an empty untitled section.
    #[must_use]
    pub fn untitled() -> Self {
        Self::default()
    }

    /// Add an article (builder style).
    #[must_use]
    pub fn with_article(mut self, article: Article) -> Self {
        self.articles.push(article);
        self
    }

    /// Whether the section has a title of its own.
    #[must_use]
    pub fn is_titled(&self) -> bool {
        !self.title.is_empty()
    }
}

fn default_include_contents() -> bool {
    true
}

/// A complete newsletter.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Newsletter {
    /// Newsletter title.
    pub title: String,

    /// Optional line shown under the title.
    #[serde(default)]
    pub strapline: Option<String>,

    /// Optional introduction, filtered like an article body.
    #[serde(default)]
    pub introduction: Option<String>,

    /// Whether to generate a contents listing.
    #[serde(default = "default_include_contents")]
    pub include_contents: bool,

    /// Sections in display order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl Newsletter {
    /// Create a newsletter with a title, a contents listing and no sections.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            strapline: None,
            introduction: None,
            include_contents: default_include_contents(),
            sections: Vec::new(),
        }
    }

    /// Set the strapline.
    #[must_use]
    pub fn with_strapline(mut self, strapline: impl Into<String>) -> Self {
        self.strapline = Some(strapline.into());
        self
    }

    /// Set the introduction.
    #[must_use]
    pub fn with_introduction(mut self, introduction: impl Into<String>) -> Self {
        self.introduction = Some(introduction.into());
        self
    }

    /// Turn the contents listing on or off.
    #[must_use]
    pub fn with_contents(mut self, include_contents: bool) -> Self {
        self.include_contents = include_contents;
        self
    }

    /// Add a section.
    #[must_use]
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Number of articles that will be rendered.
    #[must_use]
    pub fn present_article_count(&self) -> usize {
        self.sections
            .iter()
            .flat_map(|s| s.articles.iter())
            .filter(|a| a.is_present())
            .count()
    }

    /// Parse a newsletter from YAML.
    ///
    /// # Errors
    ///
    /// Returns an error if the content exceeds [`MAX_INPUT_SIZE`] or is not a
    /// valid newsletter document.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        if content.len() > MAX_INPUT_SIZE {
            tracing::warn!(
                size = content.len(),
                max = MAX_INPUT_SIZE,
                "Newsletter document exceeds size limit"
            );
            return Err(NewsletterError::InputTooLarge {
                size: content.len(),
                max: MAX_INPUT_SIZE,
            });
        }

        let newsletter: Self = serde_yaml_ng::from_str(content)?;

        tracing::debug!(
            title = %newsletter.title,
            sections = newsletter.sections.len(),
            articles = newsletter.present_article_count(),
            "Parsed newsletter"
        );

        Ok(newsletter)
    }

    /// Load a newsletter from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "Loading newsletter from YAML file");
        let content = fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
