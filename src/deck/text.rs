//! Text content of shapes: frames, paragraphs, runs and their character properties.
//!
//! Every property here is optional. `None` means "inherit from the slide layout
//! or master", which is how the written document distinguishes an explicit
//! 14 pt from "whatever the template says".
use std::borrow::Cow;
use std::fmt::{self, Write as FmtWrite};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::common::unit::pt_to_centipoints;
use crate::common::xml::{escape_xml, strip_invalid_xml_chars};
use crate::common::{Error, RGBColor, Result};

use super::relmap::SlideRelationships;
use super::slide::SlideId;

/// Smallest font size the document format can store, in points.
pub const MIN_FONT_SIZE: f64 = 1.0;
/// Largest font size the document format can store, in points.
pub const MAX_FONT_SIZE: f64 = 4000.0;

/// Horizontal paragraph alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Left,
    Center,
    Right,
    Justify,
    Distributed,
}

impl Alignment {
    /// Value of the `algn` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Left => "l",
            Self::Center => "ctr",
            Self::Right => "r",
            Self::Justify => "just",
            Self::Distributed => "dist",
        }
    }
}

/// Underline kind of a text run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Underline {
    /// Explicitly no underline (overrides an inherited one)
    None,
    Single,
    Double,
    Heavy,
    Dotted,
    DottedHeavy,
    Dash,
    DashHeavy,
    DashLong,
    DotDash,
    DotDotDash,
    Wavy,
    WavyHeavy,
    WavyDouble,
    /// Underline words only, not the spaces between them
    Words,
}

impl Underline {
    /// Value of the `u` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Single => "sng",
            Self::Double => "dbl",
            Self::Heavy => "heavy",
            Self::Dotted => "dotted",
            Self::DottedHeavy => "dottedHeavy",
            Self::Dash => "dash",
            Self::DashHeavy => "dashHeavy",
            Self::DashLong => "dashLong",
            Self::DotDash => "dotDash",
            Self::DotDotDash => "dotDotDash",
            Self::Wavy => "wavy",
            Self::WavyHeavy => "wavyHeavy",
            Self::WavyDouble => "wavyDbl",
            Self::Words => "words",
        }
    }
}

impl From<bool> for Underline {
    fn from(underline: bool) -> Self {
        if underline { Self::Single } else { Self::None }
    }
}

/// Proofing language of a text run, as a BCP 47 tag (`en-GB`, `de-DE`, …).
///
/// # Examples
///
/// ```rust
/// use pptx_tools::deck::LanguageId;
///
/// let german: LanguageId = "de-DE".parse().unwrap();
/// assert_eq!(german, LanguageId::GERMAN);
/// assert!("not a tag!".parse::<LanguageId>().is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageId(Cow<'static, str>);

impl LanguageId {
    pub const ENGLISH_UK: Self = Self(Cow::Borrowed("en-GB"));
    pub const ENGLISH_US: Self = Self(Cow::Borrowed("en-US"));
    pub const GERMAN: Self = Self(Cow::Borrowed("de-DE"));
    pub const FRENCH: Self = Self(Cow::Borrowed("fr-FR"));
    pub const SPANISH: Self = Self(Cow::Borrowed("es-ES"));
    pub const ITALIAN: Self = Self(Cow::Borrowed("it-IT"));
    pub const DUTCH: Self = Self(Cow::Borrowed("nl-NL"));
    pub const JAPANESE: Self = Self(Cow::Borrowed("ja-JP"));
    pub const CHINESE_SIMPLIFIED: Self = Self(Cow::Borrowed("zh-CN"));
    /// Marks text that should not be spell-checked.
    pub const NO_PROOFING: Self = Self(Cow::Borrowed("zxx"));

    /// The language tag.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for LanguageId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let valid = !s.is_empty()
            && s.split('-').all(|part| {
                (1..=8).contains(&part.len()) && part.chars().all(|c| c.is_ascii_alphanumeric())
            });
        if !valid {
            return Err(Error::InvalidArgument(format!(
                "'{}' is not a valid language tag",
                s
            )));
        }
        Ok(Self(Cow::Owned(s.to_string())))
    }
}

impl TryFrom<String> for LanguageId {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<LanguageId> for String {
    fn from(lang: LanguageId) -> Self {
        lang.0.into_owned()
    }
}

impl fmt::Display for LanguageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Character properties of a run (or the default properties of a paragraph).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Font {
    name: Option<String>,
    size: Option<f64>,
    bold: Option<bool>,
    italic: Option<bool>,
    underline: Option<Underline>,
    color: Option<RGBColor>,
    language: Option<LanguageId>,
}

impl Font {
    /// Create a font that inherits every property.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Size in points.
    pub fn size(&self) -> Option<f64> {
        self.size
    }

    pub fn bold(&self) -> Option<bool> {
        self.bold
    }

    pub fn italic(&self) -> Option<bool> {
        self.italic
    }

    pub fn underline(&self) -> Option<Underline> {
        self.underline
    }

    pub fn color(&self) -> Option<RGBColor> {
        self.color
    }

    pub fn language(&self) -> Option<&LanguageId> {
        self.language.as_ref()
    }

    /// Set the typeface (written as the Latin font).
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = Some(name.into());
    }

    /// Set the size in points.
    ///
    /// Fails for sizes the document format cannot represent.
    pub fn set_size(&mut self, size: f64) -> Result<()> {
        if !size.is_finite() || !(MIN_FONT_SIZE..=MAX_FONT_SIZE).contains(&size) {
            return Err(Error::InvalidArgument(format!(
                "font size {} pt is outside {}..={} pt",
                size, MIN_FONT_SIZE, MAX_FONT_SIZE
            )));
        }
        self.size = Some(size);
        Ok(())
    }

    pub fn set_bold(&mut self, bold: bool) {
        self.bold = Some(bold);
    }

    pub fn set_italic(&mut self, italic: bool) {
        self.italic = Some(italic);
    }

    pub fn set_underline(&mut self, underline: Underline) {
        self.underline = Some(underline);
    }

    pub fn set_color(&mut self, color: RGBColor) {
        self.color = Some(color);
    }

    pub fn set_language(&mut self, language: LanguageId) {
        self.language = Some(language);
    }

    /// Reset every property to "inherit".
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Whether every property inherits.
    pub fn is_inherited(&self) -> bool {
        *self == Self::default()
    }

    /// Write this font as a `<a:rPr>`-like element named `tag`.
    ///
    /// `hyperlink` is a relationship ID for an internal slide jump.
    pub(crate) fn write_xml(&self, xml: &mut String, tag: &str, hyperlink: Option<&str>) -> Result<()> {
        write!(xml, "<{}", tag)?;
        if let Some(ref lang) = self.language {
            write!(xml, r#" lang="{}""#, escape_xml(lang.as_str()))?;
        }
        if let Some(size) = self.size {
            let mut buf = itoa::Buffer::new();
            write!(xml, r#" sz="{}""#, buf.format(pt_to_centipoints(size)))?;
        }
        if let Some(bold) = self.bold {
            write!(xml, r#" b="{}""#, u8::from(bold))?;
        }
        if let Some(italic) = self.italic {
            write!(xml, r#" i="{}""#, u8::from(italic))?;
        }
        if let Some(underline) = self.underline {
            write!(xml, r#" u="{}""#, underline.as_str())?;
        }
        xml.push_str(r#" dirty="0""#);

        let has_children = self.color.is_some() || self.name.is_some() || hyperlink.is_some();
        if !has_children {
            xml.push_str("/>");
            return Ok(());
        }
        xml.push('>');

        // Child order is fixed by the schema: fill, then fonts, then hyperlink.
        if let Some(color) = self.color {
            write!(
                xml,
                r#"<a:solidFill><a:srgbClr val="{}"/></a:solidFill>"#,
                color.to_hex()
            )?;
        }
        if let Some(ref name) = self.name {
            let name = escape_xml(name);
            write!(
                xml,
                r#"<a:latin typeface="{0}"/><a:ea typeface="{0}"/><a:cs typeface="{0}"/>"#,
                name
            )?;
        }
        if let Some(rid) = hyperlink {
            write!(
                xml,
                r#"<a:hlinkClick r:id="{}" action="ppaction://hlinksldjump"/>"#,
                rid
            )?;
        }
        write!(xml, "</{}>", tag)?;
        Ok(())
    }
}

/// Smallest styleable span of text within a paragraph.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Run {
    text: String,
    font: Font,
    hyperlink: Option<SlideId>,
}

impl Run {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut Font {
        &mut self.font
    }

    /// Slide this run jumps to when clicked in a slide show.
    pub fn hyperlink(&self) -> Option<SlideId> {
        self.hyperlink
    }

    pub fn set_hyperlink(&mut self, target: Option<SlideId>) {
        self.hyperlink = target;
    }

    fn write_xml(&self, xml: &mut String, rels: Option<&SlideRelationships>) -> Result<()> {
        let link = self
            .hyperlink
            .and_then(|target| rels.and_then(|r| r.slide_link_id(target)));
        xml.push_str("<a:r>");
        self.font.write_xml(xml, "a:rPr", link)?;
        write!(
            xml,
            "<a:t>{}</a:t>",
            escape_xml(&strip_invalid_xml_chars(&self.text))
        )?;
        xml.push_str("</a:r>");
        Ok(())
    }
}

/// Ordered sequence of runs plus paragraph-level formatting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Paragraph {
    runs: Vec<Run>,
    alignment: Option<Alignment>,
    font: Font,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// A paragraph holding a single run with `text`, or no run when `text` is empty.
    pub fn from_text(text: &str) -> Self {
        let mut paragraph = Self::new();
        if !text.is_empty() {
            paragraph.add_run(text);
        }
        paragraph
    }

    pub fn runs(&self) -> &[Run] {
        &self.runs
    }

    pub fn runs_mut(&mut self) -> &mut [Run] {
        &mut self.runs
    }

    /// Append a run and return it for styling.
    pub fn add_run(&mut self, text: impl Into<String>) -> &mut Run {
        self.runs.push(Run::new(text));
        let last = self.runs.len() - 1;
        &mut self.runs[last]
    }

    /// Concatenated text of all runs.
    pub fn text(&self) -> String {
        self.runs.iter().map(Run::text).collect()
    }

    pub fn alignment(&self) -> Option<Alignment> {
        self.alignment
    }

    pub fn set_alignment(&mut self, alignment: Alignment) {
        self.alignment = Some(alignment);
    }

    /// Default character properties for the paragraph (`a:pPr/a:defRPr`).
    ///
    /// PowerPoint consults these only for text typed later into the paragraph;
    /// runs that carry their own properties are not affected by them.
    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn font_mut(&mut self) -> &mut Font {
        &mut self.font
    }

    fn write_xml(&self, xml: &mut String, rels: Option<&SlideRelationships>) -> Result<()> {
        xml.push_str("<a:p>");
        if self.alignment.is_some() || !self.font.is_inherited() {
            xml.push_str("<a:pPr");
            if let Some(alignment) = self.alignment {
                write!(xml, r#" algn="{}""#, alignment.as_str())?;
            }
            if self.font.is_inherited() {
                xml.push_str("/>");
            } else {
                xml.push('>');
                self.font.write_xml(xml, "a:defRPr", None)?;
                xml.push_str("</a:pPr>");
            }
        }
        for run in &self.runs {
            run.write_xml(xml, rels)?;
        }
        xml.push_str("</a:p>");
        Ok(())
    }
}

/// Container of paragraphs inside a shape or table cell.
#[derive(Debug, Clone, PartialEq)]
pub struct TextFrame {
    paragraphs: Vec<Paragraph>,
    word_wrap: bool,
    auto_fit: bool,
}

impl Default for TextFrame {
    fn default() -> Self {
        // A frame always holds at least one paragraph.
        Self {
            paragraphs: vec![Paragraph::new()],
            word_wrap: true,
            auto_fit: false,
        }
    }
}

impl TextFrame {
    pub fn new() -> Self {
        Self::default()
    }

    /// A frame whose paragraphs are the lines of `text`.
    pub fn from_text(text: &str) -> Self {
        let mut frame = Self::new();
        frame.set_text(text);
        frame
    }

    /// Replace the content with one paragraph per line of `text`.
    pub fn set_text(&mut self, text: &str) {
        self.paragraphs = text.split('\n').map(Paragraph::from_text).collect();
    }

    /// Text of all paragraphs joined with newlines.
    pub fn text(&self) -> String {
        self.paragraphs
            .iter()
            .map(Paragraph::text)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn paragraphs(&self) -> &[Paragraph] {
        &self.paragraphs
    }

    pub fn paragraphs_mut(&mut self) -> &mut [Paragraph] {
        &mut self.paragraphs
    }

    pub fn paragraph_mut(&mut self, index: usize) -> Option<&mut Paragraph> {
        self.paragraphs.get_mut(index)
    }

    /// Append an empty paragraph.
    pub fn add_paragraph(&mut self) -> &mut Paragraph {
        self.paragraphs.push(Paragraph::new());
        let last = self.paragraphs.len() - 1;
        &mut self.paragraphs[last]
    }

    pub fn word_wrap(&self) -> bool {
        self.word_wrap
    }

    pub fn set_word_wrap(&mut self, wrap: bool) {
        self.word_wrap = wrap;
    }

    /// Whether the shape grows to fit its text.
    pub fn auto_fit(&self) -> bool {
        self.auto_fit
    }

    pub fn set_auto_fit(&mut self, auto_fit: bool) {
        self.auto_fit = auto_fit;
    }

    /// Write the frame as a text body element (`p:txBody` or `a:txBody`).
    pub(crate) fn write_xml(
        &self,
        xml: &mut String,
        tag: &str,
        rels: Option<&SlideRelationships>,
    ) -> Result<()> {
        write!(xml, "<{}>", tag)?;
        let wrap = if self.word_wrap { "square" } else { "none" };
        if self.auto_fit {
            write!(xml, r#"<a:bodyPr wrap="{}" rtlCol="0"><a:spAutoFit/></a:bodyPr>"#, wrap)?;
        } else {
            write!(xml, r#"<a:bodyPr wrap="{}" rtlCol="0"/>"#, wrap)?;
        }
        xml.push_str("<a:lstStyle/>");
        for paragraph in &self.paragraphs {
            paragraph.write_xml(xml, rels)?;
        }
        write!(xml, "</{}>", tag)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_font_size_limits() {
        let mut font = Font::new();
        assert!(font.set_size(0.5).is_err());
        assert!(font.set_size(f64::NAN).is_err());
        assert!(font.set_size(4001.0).is_err());
        assert!(font.size().is_none());
        font.set_size(14.0).unwrap();
        assert_eq!(font.size(), Some(14.0));
    }

    #[test]
    fn test_inherited_font_writes_empty_element() {
        let mut xml = String::new();
        Font::new().write_xml(&mut xml, "a:rPr", None).unwrap();
        assert_eq!(xml, r#"<a:rPr dirty="0"/>"#);
    }

    #[test]
    fn test_font_xml_attribute_and_child_order() {
        let mut font = Font::new();
        font.set_name("Roboto & Co");
        font.set_size(18.0).unwrap();
        font.set_bold(false);
        font.set_italic(true);
        font.set_underline(Underline::WavyDouble);
        font.set_color(RGBColor::new(255, 0, 0));
        font.set_language(LanguageId::ENGLISH_UK);

        let mut xml = String::new();
        font.write_xml(&mut xml, "a:rPr", Some("rId4")).unwrap();
        assert!(xml.starts_with(
            r#"<a:rPr lang="en-GB" sz="1800" b="0" i="1" u="wavyDbl" dirty="0">"#
        ));
        let fill = xml.find("a:solidFill").unwrap();
        let latin = xml.find(r#"<a:latin typeface="Roboto &amp; Co"/>"#).unwrap();
        let link = xml.find(r#"<a:hlinkClick r:id="rId4""#).unwrap();
        assert!(fill < latin && latin < link);
        assert!(xml.ends_with("</a:rPr>"));
    }

    #[test]
    fn test_text_frame_splits_lines() {
        let frame = TextFrame::from_text("first\nsecond\n\nfourth");
        assert_eq!(frame.paragraphs().len(), 4);
        assert_eq!(frame.paragraphs()[1].text(), "second");
        assert!(frame.paragraphs()[2].runs().is_empty());
        assert_eq!(frame.text(), "first\nsecond\n\nfourth");
    }

    #[test]
    fn test_paragraph_xml_with_alignment_and_default_font() {
        let mut paragraph = Paragraph::from_text("a<b");
        paragraph.set_alignment(Alignment::Center);
        paragraph.font_mut().set_bold(true);

        let mut xml = String::new();
        paragraph.write_xml(&mut xml, None).unwrap();
        assert!(xml.starts_with(r#"<a:p><a:pPr algn="ctr"><a:defRPr b="1" dirty="0"/></a:pPr>"#));
        assert!(xml.contains("<a:t>a&lt;b</a:t>"));
    }

    #[test]
    fn test_unresolved_hyperlink_is_dropped() {
        let mut paragraph = Paragraph::new();
        paragraph
            .add_run("elsewhere")
            .set_hyperlink(Some(SlideId::from_raw(999)));

        let mut xml = String::new();
        paragraph.write_xml(&mut xml, None).unwrap();
        assert!(!xml.contains("hlinkClick"));
    }

    #[test]
    fn test_language_tags() {
        assert!("en".parse::<LanguageId>().is_ok());
        assert!("zh-Hant-TW".parse::<LanguageId>().is_ok());
        assert!("".parse::<LanguageId>().is_err());
        assert!("en--GB".parse::<LanguageId>().is_err());
        assert_eq!(LanguageId::GERMAN.to_string(), "de-DE");
    }
}
