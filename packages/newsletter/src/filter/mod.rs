//! Inline markup filter: turns article markup into wrapped TEN text.
//!
//! The filter is an ordered list of [`FilterPass`]es. Order matters: the
//! specific unwrap and convert rules must run before the catch-all tag
//! stripper, and entity expansion and wrapping come last.

mod pass;

use std::borrow::Cow;

pub use pass::{EntityPass, FilterPass, LinkPass, LiteralPass, RegexPass, WrapPass};

use crate::config::RenderConfig;
use crate::text::{EntityExpander, LineWrapper};

/// Converts inline markup into plain text conforming to the TEN standard.
pub struct InlineMarkupFilter {
    passes: Vec<Box<dyn FilterPass>>,
}

impl InlineMarkupFilter {
    /// Build the standard pass sequence from render settings.
    #[must_use]
    pub fn new(config: &RenderConfig) -> Self {
        let passes: Vec<Box<dyn FilterPass>> = vec![
            // Wrappers that would otherwise stop links from matching
            Box::new(RegexPass::unwrap_acronyms()),
            Box::new(RegexPass::unwrap_abbreviations()),
            Box::new(RegexPass::unwrap_strong()),
            Box::new(RegexPass::unwrap_em()),
            Box::new(RegexPass::double_line_breaks()),
            Box::new(LinkPass::new(&config.base_url)),
            // Lists
            Box::new(RegexPass::strip_list_containers()),
            Box::new(LiteralPass::list_paragraph_breaks()),
            Box::new(LiteralPass::list_items(&config.list_item_prefix)),
            Box::new(RegexPass::strip_tags()),
            Box::new(EntityPass::new(EntityExpander::from_config(config))),
            Box::new(WrapPass::new(LineWrapper::from_config(config))),
        ];
        Self { passes }
    }

    /// Build a filter from a custom pass sequence.
    #[must_use]
    pub fn from_passes(passes: Vec<Box<dyn FilterPass>>) -> Self {
        Self { passes }
    }

    /// Names of the passes in the order they run.
    #[must_use]
    pub fn pass_names(&self) -> Vec<&'static str> {
        self.passes.iter().map(|p| p.name()).collect()
    }

    /// Run `markup` through every pass.
    pub fn filter(&self, markup: &str) -> String {
        if markup.is_empty() {
            return String::new();
        }

        let mut text = markup.to_string();
        for pass in &self.passes {
            let rewritten = match pass.apply(&text) {
                Cow::Borrowed(_) => None,
                Cow::Owned(rewritten) => Some(rewritten),
            };
            tracing::trace!(
                pass = pass.name(),
                changed = rewritten.is_some(),
                "Applied filter pass"
            );
            if let Some(rewritten) = rewritten {
                text = rewritten;
            }
        }
        text
    }
}

impl Default for InlineMarkupFilter {
    fn default() -> Self {
        Self::new(&RenderConfig::default())
    }
}
