//! Font and paragraph styles that are written onto document elements.
//!
//! Styles are plain values: build one, tweak it, and write it onto as many
//! runs, paragraphs or shapes as needed. See [`sheet`] for ready-made styles.

mod font;
mod paragraph;
pub mod sheet;

pub use font::{FontStyle, HasFont};
pub use paragraph::ParagraphStyle;
pub use sheet::StyleDefaults;
