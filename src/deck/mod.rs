//! Slide-deck document model and .pptx writer.
//!
//! A [`Presentation`] owns its [`Slide`]s, each slide owns its [`Shape`]s and
//! every text-bearing shape owns a [`TextFrame`] of [`Paragraph`]s and
//! [`Run`]s. Formatting lives in [`Font`] and paragraph alignment; each
//! property is optional and inherits from the template when unset.
//!
//! [`PackageWriter`] turns the model into the ZIP package PowerPoint and
//! LibreOffice open.

mod format;
mod package;
mod presentation;
mod relmap;
mod shape;
mod slide;
mod template;
mod text;

pub use format::ImageFormat;
pub use package::PackageWriter;
pub use presentation::Presentation;
pub use shape::{Cell, PlaceholderKind, Picture, Shape, ShapeId, ShapeKind, Table};
pub use slide::{Layout, Slide, SlideId};
pub use template::{Template, TemplateKind};
pub use text::{
    Alignment, Font, LanguageId, MAX_FONT_SIZE, MIN_FONT_SIZE, Paragraph, Run, TextFrame,
    Underline,
};
