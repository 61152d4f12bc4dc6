//! pptx-tools - declarative styles for building PowerPoint presentations
//!
//! This library writes .pptx files from a small in-memory slide model and puts
//! the styling vocabulary first: fonts, paragraphs and positions are plain
//! values that can be defined once and written onto any number of elements.
//!
//! # Features
//!
//! - **Styles**: [`FontStyle`] and [`ParagraphStyle`] only touch the attributes
//!   they set, so styles can be layered
//! - **Style sheet**: ready-made defaults in [`style::sheet`]
//! - **Positions**: [`Position`] places elements relative to the slide, in
//!   absolute units, from the far edge, or keeping an aspect ratio
//! - **Builder**: [`PptxCreator`] adds title, content and regular slides,
//!   text boxes, tables and figures
//! - **Export**: optional PDF and PNG rendering through LibreOffice
//!
//! # Example - Building a presentation
//!
//! ```no_run
//! use pptx_tools::{PptxCreator, Position};
//! use pptx_tools::deck::LanguageId;
//! use pptx_tools::style::{sheet, FontStyle};
//!
//! # fn main() -> Result<(), pptx_tools::Error> {
//! let mut pp = PptxCreator::default();
//! let defaults = pp.settings().style.clone();
//!
//! let slide = pp.add_slide("page2");
//! let text = pp.add_text_box(
//!     slide,
//!     "This is the first.\nDas ist der zweite ...",
//!     Position::new(0.02, 0.24),
//!     Some(&sheet::font_default(&defaults).size(16.0)),
//! )?;
//!
//! let german = FontStyle::new().size(22.0).bold(true).language(LanguageId::GERMAN);
//! if let Some(frame) = pp.shape_mut(text)?.text_frame_mut() {
//!     german.write_paragraph(&mut frame.paragraphs_mut()[1])?;
//! }
//!
//! pp.add_content_slide(None, true);
//! pp.save("presentation.pptx", true)?;
//! # Ok(())
//! # }
//! ```
//!
//! # Example - Loading settings
//!
//! ```no_run
//! use pptx_tools::{PptxCreator, Settings};
//!
//! # fn main() -> Result<(), pptx_tools::Error> {
//! let settings = Settings::load("pptx-tools.yaml")?;
//! let mut pp = PptxCreator::with_settings(settings);
//! pp.add_title_slide("Quarterly report");
//! # Ok(())
//! # }
//! ```

/// Errors, units, colors and XML helpers shared by every module
pub mod common;

/// Builder settings, loadable from YAML
pub mod config;

/// The high-level presentation builder
pub mod creator;

/// In-memory slide model and the .pptx package writer
///
/// Most users only touch this module through the handles returned by
/// [`PptxCreator`], but the model is public so existing elements can be
/// inspected and styled directly.
pub mod deck;

/// PDF and PNG export through an external renderer
pub mod export;

/// Figures embedded as pictures
pub mod figure;

/// Placement of elements on the slide canvas
pub mod position;

/// Font and paragraph styles
pub mod style;

// Re-export commonly used types for convenience
pub use common::{Error, Length, RGBColor, Result};
pub use config::Settings;
pub use creator::{PptxCreator, SaveOptions, SaveReport, ShapeRef, SlideRef};
pub use figure::{Figure, RasterFigure};
pub use position::{Dimension, Extent, Offset, Position};
pub use style::{FontStyle, ParagraphStyle, StyleDefaults};
