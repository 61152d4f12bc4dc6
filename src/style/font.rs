//! Declarative character formatting.
//!
//! A [`FontStyle`] lists the attributes it wants changed; every attribute left
//! as `None` is not touched on the target. Writing a style never mutates the
//! style itself, so one style can be applied to any number of targets.
use serde::{Deserialize, Serialize};

use crate::common::{Error, RGBColor, Result};
use crate::deck::{
    Font, LanguageId, MAX_FONT_SIZE, MIN_FONT_SIZE, Paragraph, Run, Shape, TextFrame, Underline,
};

/// Anything that carries a [`Font`] a style can be written onto.
pub trait HasFont {
    fn font_mut(&mut self) -> &mut Font;
}

impl HasFont for Font {
    fn font_mut(&mut self) -> &mut Font {
        self
    }
}

impl HasFont for Run {
    fn font_mut(&mut self) -> &mut Font {
        Run::font_mut(self)
    }
}

/// Targets the paragraph's default run properties.
impl HasFont for Paragraph {
    fn font_mut(&mut self) -> &mut Font {
        Paragraph::font_mut(self)
    }
}

/// Character attributes to apply to runs.
///
/// # Examples
///
/// ```rust
/// use pptx_tools::deck::{Paragraph, Underline};
/// use pptx_tools::style::FontStyle;
///
/// let style = FontStyle::new().size(22.0).bold(true).underline(Underline::WavyDouble);
/// let mut paragraph = Paragraph::from_text("Das ist der zweite ...");
/// style.write_paragraph(&mut paragraph)?;
/// assert_eq!(paragraph.runs()[0].font().size(), Some(22.0));
/// assert_eq!(paragraph.runs()[0].font().italic(), None);
/// # Ok::<(), pptx_tools::Error>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontStyle {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Size in points
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bold: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub italic: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub underline: Option<Underline>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<RGBColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<LanguageId>,
}

impl FontStyle {
    /// A style that changes nothing.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn size(mut self, points: f64) -> Self {
        self.size = Some(points);
        self
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = Some(bold);
        self
    }

    pub fn italic(mut self, italic: bool) -> Self {
        self.italic = Some(italic);
        self
    }

    pub fn underline(mut self, underline: impl Into<Underline>) -> Self {
        self.underline = Some(underline.into());
        self
    }

    pub fn color(mut self, color: impl Into<RGBColor>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn language(mut self, language: LanguageId) -> Self {
        self.language = Some(language);
        self
    }

    /// Overlay every attribute `other` sets; attributes `other` leaves unset keep
    /// their current value.
    pub fn set(&mut self, other: &FontStyle) -> &mut Self {
        let FontStyle {
            name,
            size,
            bold,
            italic,
            underline,
            color,
            language,
        } = other;
        if name.is_some() {
            self.name = name.clone();
        }
        self.size = size.or(self.size);
        self.bold = bold.or(self.bold);
        self.italic = italic.or(self.italic);
        self.underline = underline.or(self.underline);
        self.color = color.or(self.color);
        if language.is_some() {
            self.language = language.clone();
        }
        self
    }

    /// Unset every attribute.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// The explicitly set attributes of an existing font.
    pub fn read_from(font: &Font) -> Self {
        Self {
            name: font.name().map(str::to_string),
            size: font.size(),
            bold: font.bold(),
            italic: font.italic(),
            underline: font.underline(),
            color: font.color(),
            language: font.language().cloned(),
        }
    }

    fn validate(&self) -> Result<()> {
        match self.size {
            Some(size) if !size.is_finite() || !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) => {
                Err(Error::InvalidArgument(format!(
                    "font size {} pt is outside {}..={} pt",
                    size, MIN_FONT_SIZE, MAX_FONT_SIZE
                )))
            },
            _ => Ok(()),
        }
    }

    fn apply(&self, font: &mut Font) -> Result<()> {
        if let Some(ref name) = self.name {
            font.set_name(name.as_str());
        }
        if let Some(size) = self.size {
            font.set_size(size)?;
        }
        if let Some(bold) = self.bold {
            font.set_bold(bold);
        }
        if let Some(italic) = self.italic {
            font.set_italic(italic);
        }
        if let Some(underline) = self.underline {
            font.set_underline(underline);
        }
        if let Some(color) = self.color {
            font.set_color(color);
        }
        if let Some(ref language) = self.language {
            font.set_language(language.clone());
        }
        Ok(())
    }

    /// Apply the set attributes to a single font-bearing target.
    ///
    /// Fails without touching the target when the style holds a size the
    /// document cannot store.
    pub fn write_to<T: HasFont + ?Sized>(&self, target: &mut T) -> Result<()> {
        self.validate()?;
        self.apply(target.font_mut())
    }

    /// Apply to every run of `paragraph`, adding an empty run when it has none.
    pub fn write_paragraph(&self, paragraph: &mut Paragraph) -> Result<()> {
        self.validate()?;
        if paragraph.runs().is_empty() {
            paragraph.add_run("");
        }
        for run in paragraph.runs_mut() {
            self.apply(run.font_mut())?;
        }
        Ok(())
    }

    /// Apply to every paragraph of a text frame.
    pub fn write_text_frame(&self, frame: &mut TextFrame) -> Result<()> {
        self.validate()?;
        for paragraph in frame.paragraphs_mut() {
            self.write_paragraph(paragraph)?;
        }
        Ok(())
    }

    /// Apply to every paragraph in every text frame of `shape` (each cell of a
    /// table). Pictures have no text and are left alone.
    pub fn write_shape(&self, shape: &mut Shape) -> Result<()> {
        self.validate()?;
        for frame in shape.text_frames_mut() {
            self.write_text_frame(frame)?;
        }
        Ok(())
    }
}
