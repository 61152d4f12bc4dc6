use serde::{Deserialize, Serialize};

use crate::common::Result;
use crate::deck::{Alignment, Paragraph, Shape, TextFrame};

use super::font::FontStyle;

/// Paragraph alignment plus the character style of its runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParagraphStyle {
    pub font: FontStyle,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alignment: Option<Alignment>,
}

impl ParagraphStyle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn font(mut self, font: FontStyle) -> Self {
        self.font = font;
        self
    }

    pub fn alignment(mut self, alignment: Alignment) -> Self {
        self.alignment = Some(alignment);
        self
    }

    /// Apply the font style to every run, then the alignment when set.
    ///
    /// The font goes first because it is the only part that can be rejected;
    /// an invalid font returns an error before the alignment is touched, so
    /// the paragraph is left exactly as it was. The two write disjoint
    /// attributes, so the order is otherwise unobservable.
    pub fn write_to(&self, paragraph: &mut Paragraph) -> Result<()> {
        self.font.write_paragraph(paragraph)?;
        if let Some(alignment) = self.alignment {
            paragraph.set_alignment(alignment);
        }
        Ok(())
    }

    pub fn write_text_frame(&self, frame: &mut TextFrame) -> Result<()> {
        for paragraph in frame.paragraphs_mut() {
            self.write_to(paragraph)?;
        }
        Ok(())
    }

    /// Apply to every paragraph of every text frame in `shape`.
    pub fn write_shape(&self, shape: &mut Shape) -> Result<()> {
        for frame in shape.text_frames_mut() {
            self.write_text_frame(frame)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Error;

    #[test]
    fn test_alignment_and_font_are_applied() {
        let mut paragraph = Paragraph::from_text("left");
        let style = ParagraphStyle::new()
            .alignment(Alignment::Left)
            .font(FontStyle::new().size(14.0));
        style.write_to(&mut paragraph).unwrap();
        assert_eq!(paragraph.alignment(), Some(Alignment::Left));
        assert_eq!(paragraph.runs()[0].font().size(), Some(14.0));
    }

    #[test]
    fn test_unset_alignment_is_untouched() {
        let mut paragraph = Paragraph::from_text("centered");
        paragraph.set_alignment(Alignment::Center);
        ParagraphStyle::new()
            .font(FontStyle::new().bold(true))
            .write_to(&mut paragraph)
            .unwrap();
        assert_eq!(paragraph.alignment(), Some(Alignment::Center));
    }

    #[test]
    fn test_failed_font_leaves_alignment_alone() {
        let mut paragraph = Paragraph::from_text("x");
        let before = paragraph.clone();
        let style = ParagraphStyle::new()
            .alignment(Alignment::Right)
            .font(FontStyle::new().size(5000.0));
        assert!(matches!(style.write_to(&mut paragraph), Err(Error::InvalidArgument(_))));
        assert_eq!(paragraph.alignment(), None);
        assert_eq!(paragraph, before);
    }

    #[test]
    fn test_write_text_frame_covers_all_paragraphs() {
        let mut frame = TextFrame::from_text("one\ntwo\nthree");
        ParagraphStyle::new()
            .alignment(Alignment::Justify)
            .write_text_frame(&mut frame)
            .unwrap();
        assert!(frame
            .paragraphs()
            .iter()
            .all(|p| p.alignment() == Some(Alignment::Justify)));
    }
}
