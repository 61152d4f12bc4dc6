/// In-memory presentation: the ordered slides plus the template they are laid out on.
use std::fmt::Write as FmtWrite;

use crate::common::Result;
use crate::position::Size;

use super::slide::{Layout, Slide, SlideId};
use super::template::Template;

/// A presentation being built.
#[derive(Debug, Clone)]
pub struct Presentation {
    template: Template,
    slides: Vec<Slide>,
    next_slide_id: u32,
    title: Option<String>,
}

impl Default for Presentation {
    fn default() -> Self {
        Self::new(Template::default())
    }
}

impl Presentation {
    /// Create an empty presentation on `template`.
    pub fn new(template: Template) -> Self {
        Self {
            template,
            slides: Vec::new(),
            next_slide_id: SlideId::FIRST.get(),
            title: None,
        }
    }

    pub fn template(&self) -> &Template {
        &self.template
    }

    /// Size of every slide in this presentation.
    pub fn slide_size(&self) -> Size {
        self.template.slide_size()
    }

    /// Document title stored in the core properties.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Append a slide with the given layout.
    pub fn add_slide(&mut self, layout: Layout) -> &mut Slide {
        let id = SlideId::from_raw(self.next_slide_id);
        self.next_slide_id += 1;
        self.slides.push(Slide::new(id, layout));
        let last = self.slides.len() - 1;
        &mut self.slides[last]
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Zero-based position of a slide in the deck.
    pub fn slide_index(&self, id: SlideId) -> Option<usize> {
        self.slides.iter().position(|s| s.id() == id)
    }

    pub fn slide(&self, id: SlideId) -> Option<&Slide> {
        self.slides.iter().find(|s| s.id() == id)
    }

    pub fn slide_mut(&mut self, id: SlideId) -> Option<&mut Slide> {
        self.slides.iter_mut().find(|s| s.id() == id)
    }

    /// A copy of this presentation holding only the slide `id`.
    ///
    /// Hyperlinks to the other slides no longer resolve and are dropped when
    /// the copy is written.
    pub fn single_slide(&self, id: SlideId) -> Option<Self> {
        let slide = self.slide(id)?.clone();
        Some(Self {
            template: self.template.clone(),
            slides: vec![slide],
            next_slide_id: self.next_slide_id,
            title: self.title.clone(),
        })
    }

    /// Generate presentation.xml.
    ///
    /// The master is `rId1`; `slide_rel_ids` holds the relationship ID of each
    /// slide in deck order.
    pub(crate) fn to_xml(&self, slide_rel_ids: &[String]) -> Result<String> {
        let mut xml = String::with_capacity(1024);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(r#"<p:presentation xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main" saveSubsetFonts="1">"#);

        xml.push_str(r#"<p:sldMasterIdLst><p:sldMasterId id="2147483648" r:id="rId1"/></p:sldMasterIdLst>"#);

        if !self.slides.is_empty() {
            xml.push_str("<p:sldIdLst>");
            for (slide, rel_id) in self.slides.iter().zip(slide_rel_ids) {
                write!(xml, r#"<p:sldId id="{}" r:id="{}"/>"#, slide.id(), rel_id)?;
            }
            xml.push_str("</p:sldIdLst>");
        }

        let size = self.slide_size();
        write!(
            xml,
            r#"<p:sldSz cx="{}" cy="{}"/>"#,
            size.width.emus(),
            size.height.emus()
        )?;
        xml.push_str(r#"<p:notesSz cx="6858000" cy="9144000"/>"#);
        xml.push_str("</p:presentation>");

        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::template::TemplateKind;

    #[test]
    fn test_slide_ids_are_sequential_from_256() {
        let mut presentation = Presentation::default();
        let first = presentation.add_slide(Layout::TitleSlide).id();
        let second = presentation.add_slide(Layout::TitleOnly).id();
        assert_eq!(first, SlideId::FIRST);
        assert_eq!(second.get(), 257);
        assert_eq!(presentation.slide_index(second), Some(1));
        assert!(presentation.slide(SlideId::from_raw(300)).is_none());
    }

    #[test]
    fn test_slide_size_follows_template() {
        let presentation = Presentation::new(Template::from_kind(TemplateKind::Widescreen));
        assert_eq!(presentation.slide_size().width.emus(), 12_192_000);
    }

    #[test]
    fn test_single_slide_copy() {
        let mut presentation = Presentation::default();
        presentation.add_slide(Layout::TitleSlide);
        let id = presentation.add_slide(Layout::TitleOnly).id();
        presentation.slide_mut(id).unwrap().set_title("Second");

        let copy = presentation.single_slide(id).unwrap();
        assert_eq!(copy.slide_count(), 1);
        assert_eq!(copy.slides()[0].title().as_deref(), Some("Second"));
        assert_eq!(presentation.slide_count(), 2);
    }

    #[test]
    fn test_presentation_xml() {
        let mut presentation = Presentation::default();
        presentation.add_slide(Layout::Blank);
        let xml = presentation.to_xml(&["rId2".to_string()]).unwrap();
        assert!(xml.contains(r#"<p:sldId id="256" r:id="rId2"/>"#));
        assert!(xml.contains(r#"<p:sldSz cx="9144000" cy="6858000"/>"#));
    }
}
