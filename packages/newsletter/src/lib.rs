//! TEN Newsletter - Render newsletters as plain text for accessible email.
//!
//! This crate turns a structured newsletter (title, strapline, introduction,
//! sections of articles) into a document that conforms to the Text Email
//! Newsletter (TEN) standard: delimiter lines around the newsletter and each
//! section, a generated contents listing, two-digit article numbers, inline
//! markup converted to readable text and lines wrapped at a fixed width.
//!
//! # Example
//!
//! ```
//! use ten_newsletter::{Article, Newsletter, Renderer, Section};
//!
//! let newsletter = Newsletter::new("Community News")
//!     .with_section(Section::new("Events").with_article(Article::new(
//!         "Spring fair",
//!         "Join us on <strong>Saturday</strong>",
//!     )));
//!
//! let text = Renderer::default().render(&newsletter);
//! assert!(text.starts_with("*** Community News.\n"));
//! assert!(text.contains("* 01: Spring fair.\n\nJoin us on Saturday. \n"));
//! ```
//!
//! # Architecture
//!
//! - [`config`]: Render settings, constants and validation
//! - [`types`]: Newsletter, Section and Article
//! - [`error`]: Error types and Result alias
//! - [`text`]: Entity expansion, wrapping, punctuation and numbering
//! - [`filter`]: Inline markup filter built from ordered passes
//! - [`render`]: Document assembly
//! - [`cli`]: Command-line interface

pub mod cli;
pub mod config;
pub mod error;
pub mod filter;
pub mod render;
pub mod text;
pub mod types;

// Re-export commonly used items
pub use config::RenderConfig;
pub use error::{NewsletterError, Result};
pub use filter::InlineMarkupFilter;
pub use render::{ArticleNumbering, Renderer};
pub use types::{Article, Newsletter, Section};
