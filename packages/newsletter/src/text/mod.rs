//! Plain-text primitives: entity expansion, punctuation, numbering and wrapping.

mod entities;
mod numbering;
mod punctuation;
mod wrap;

pub use entities::EntityExpander;
pub use numbering::format_number;
pub use punctuation::ensure_full_stop;
pub use wrap::{strip_dangling_full_stop, LineWrapper};
