//! Assembles a complete TEN document from a [`Newsletter`].

use crate::config::RenderConfig;
use crate::filter::InlineMarkupFilter;
use crate::text::{ensure_full_stop, format_number, EntityExpander};
use crate::types::{Article, Newsletter, Section};

/// Running article number for one render call.
///
/// Numbers start at 1 and advance for every article, so an article without
/// text leaves a gap. The contents listing and the body number the same
/// articles identically as long as both walk the sections with their own
/// fresh counter.
#[derive(Debug)]
pub struct ArticleNumbering {
    next: usize,
}

impl ArticleNumbering {
    /// Start numbering at 1.
    #[must_use]
    pub fn new() -> Self {
        Self { next: 1 }
    }

    /// Number for `article`, or `None` if it is skipped.
    ///
    /// A skipped article still uses up its number.
    pub fn assign(&mut self, article: &Article) -> Option<usize> {
        let number = self.next;
        self.next += 1;
        article.is_present().then_some(number)
    }
}

impl Default for ArticleNumbering {
    fn default() -> Self {
        Self::new()
    }
}

/// Renders newsletters as TEN plain text.
pub struct Renderer {
    config: RenderConfig,
    filter: InlineMarkupFilter,
    expander: EntityExpander,
}

impl Renderer {
    /// Create a renderer for the given settings.
    #[must_use]
    pub fn new(config: RenderConfig) -> Self {
        let filter = InlineMarkupFilter::new(&config);
        let expander = EntityExpander::from_config(&config);
        Self {
            config,
            filter,
            expander,
        }
    }

    /// Settings in use.
    #[must_use]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// The markup filter applied to article bodies and the introduction.
    #[must_use]
    pub fn filter(&self) -> &InlineMarkupFilter {
        &self.filter
    }

    /// Render the complete newsletter.
    pub fn render(&self, newsletter: &Newsletter) -> String {
        let config = &self.config;
        let mut out = String::new();

        tracing::debug!(
            title = %newsletter.title,
            sections = newsletter.sections.len(),
            contents = newsletter.include_contents,
            "Rendering newsletter"
        );

        // A newsletter that is just one untitled section has no section
        // level of its own, so its title takes the section prefix
        let single_untitled = !newsletter.include_contents
            && matches!(newsletter.sections.as_slice(), [only] if !only.is_titled());
        if single_untitled {
            out.push_str(&config.section_prefix);
        } else {
            out.push_str(&config.newsletter_prefix);
        }
        out.push_str(&self.full_stop(&newsletter.title));
        if let Some(strapline) = non_empty(newsletter.strapline.as_deref()) {
            out.push_str("\n\n");
            out.push_str(&self.full_stop(strapline));
        }
        out.push_str("\n\n\n");

        if !newsletter.sections.is_empty() {
            if newsletter.include_contents {
                self.write_contents(&mut out, &newsletter.sections);
            }

            if let Some(introduction) = non_empty(newsletter.introduction.as_deref()) {
                out.push_str(&self.filter.filter(introduction));
                out.push_str("\n\n\n");
            }

            let mut numbering = ArticleNumbering::new();
            for (index, section) in newsletter.sections.iter().enumerate() {
                self.write_section(&mut out, index + 1, section, &mut numbering);
            }
        }

        out.push('\n');
        out.push_str(&config.conformance_line1);
        out.push('\n');
        out.push_str(&config.conformance_line2);
        out.push('\n');
        out.push_str(&config.conformance_url);
        out.push_str("\n\n[");
        out.push_str(&config.newsletter_label);
        out.push_str(&config.ends_label);
        out.push_str("].\n\n");

        out
    }

    /// Title of an article as it appears in headings and the contents.
    pub fn article_title(&self, article: &Article) -> String {
        self.expander.expand(&self.full_stop(&article.title))
    }

    /// The contents listing for `sections`.
    pub fn render_contents(&self, sections: &[Section]) -> String {
        let mut out = String::new();
        self.write_contents(&mut out, sections);
        out
    }

    fn write_contents(&self, out: &mut String, sections: &[Section]) {
        let config = &self.config;

        out.push_str(&config.section_prefix);
        out.push_str(&self.full_stop(&config.contents_label));
        out.push('\n');

        let mut numbering = ArticleNumbering::new();
        for (index, section) in sections.iter().enumerate() {
            out.push('\n');
            out.push_str(&config.section_label);
            out.push(' ');
            out.push_str(&format_number(index + 1));
            out.push_str(&config.section_number_separator);
            out.push_str(&self.full_stop(&section.title));
            out.push_str("\n\n");

            for article in &section.articles {
                if let Some(number) = numbering.assign(article) {
                    out.push_str(&format_number(number));
                    out.push_str(&config.article_number_separator);
                    out.push_str(&self.article_title(article));
                    out.push('\n');
                }
            }
        }

        out.push_str("\n[");
        out.push_str(&config.contents_label);
        out.push_str(&config.ends_label);
        out.push_str("].\n\n\n");
    }

    fn write_section(
        &self,
        out: &mut String,
        number: usize,
        section: &Section,
        numbering: &mut ArticleNumbering,
    ) {
        let config = &self.config;

        if section.is_titled() {
            out.push('\n');
            out.push_str(&config.section_prefix);
            out.push_str(&config.section_label);
            out.push(' ');
            out.push_str(&format_number(number));
            out.push_str(&config.section_number_separator);
            out.push_str(&self.full_stop(&section.title));
            out.push_str("\n\n\n");
        }

        for article in &section.articles {
            match numbering.assign(article) {
                Some(article_number) => self.write_article(out, article_number, article),
                None => {
                    tracing::debug!(title = %article.title, "Skipping article without text");
                }
            }
        }

        if section.is_titled() {
            out.push('[');
            out.push_str(&section.title);
            out.push(' ');
            out.push_str(&config.section_label.to_lowercase());
            out.push_str(&config.ends_label);
            out.push_str("].\n\n");
        }
    }

    fn write_article(&self, out: &mut String, number: usize, article: &Article) {
        out.push_str(&self.config.article_prefix);
        out.push_str(&format_number(number));
        out.push_str(&self.config.article_number_separator);
        out.push_str(&self.article_title(article));
        out.push_str("\n\n");
        out.push_str(&article.filtered_text(&self.filter));
        out.push_str("\n\n\n");
    }

    fn full_stop(&self, text: &str) -> String {
        ensure_full_stop(text, &self.config.list_item_prefix)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(RenderConfig::default())
    }
}

fn non_empty(text: Option<&str>) -> Option<&str> {
    text.filter(|t| !t.is_empty())
}
