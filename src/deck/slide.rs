/// Slide types and XML generation for PPTX presentations.
use std::fmt;

use crate::common::Result;
use crate::position::Placement;

use super::relmap::SlideRelationships;
use super::shape::{Cell, PlaceholderKind, Shape, ShapeId, ShapeKind};
use super::text::TextFrame;

/// Identifier of a slide, unique within its presentation.
///
/// Slide IDs start at 256, as required by the `p:sldId` element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SlideId(u32);

impl SlideId {
    pub const FIRST: Self = Self(256);

    pub const fn from_raw(id: u32) -> Self {
        Self(id)
    }

    pub const fn get(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Slide layouts provided by the built-in master.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Layout {
    /// Centered title and subtitle
    TitleSlide,
    /// Title bar only
    TitleOnly,
    /// No placeholders
    Blank,
}

impl Layout {
    pub const ALL: [Layout; 3] = [Layout::TitleSlide, Layout::TitleOnly, Layout::Blank];

    /// One-based index of the layout part (`slideLayoutN.xml`).
    pub fn part_index(&self) -> usize {
        match self {
            Self::TitleSlide => 1,
            Self::TitleOnly => 2,
            Self::Blank => 3,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::TitleSlide => "Title Slide",
            Self::TitleOnly => "Title Only",
            Self::Blank => "Blank",
        }
    }

    fn title_kind(&self) -> Option<PlaceholderKind> {
        match self {
            Self::TitleSlide => Some(PlaceholderKind::CenterTitle),
            Self::TitleOnly => Some(PlaceholderKind::Title),
            Self::Blank => None,
        }
    }
}

/// A slide in a presentation.
#[derive(Debug, Clone, PartialEq)]
pub struct Slide {
    id: SlideId,
    layout: Layout,
    shapes: Vec<Shape>,
    next_shape_id: ShapeId,
}

impl Slide {
    /// Create a slide with the title placeholder(s) of its layout.
    pub(crate) fn new(id: SlideId, layout: Layout) -> Self {
        let mut slide = Self {
            id,
            layout,
            shapes: Vec::new(),
            // 1 is the group root of the shape tree
            next_shape_id: 2,
        };
        if let Some(kind) = layout.title_kind() {
            slide.push_shape(None, |_| ShapeKind::Placeholder {
                kind,
                text_frame: TextFrame::new(),
            });
        }
        if layout == Layout::TitleSlide {
            slide.push_shape(None, |_| ShapeKind::Placeholder {
                kind: PlaceholderKind::SubTitle,
                text_frame: TextFrame::new(),
            });
        }
        slide
    }

    pub fn id(&self) -> SlideId {
        self.id
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn shape_mut(&mut self, id: ShapeId) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(|s| s.id() == id)
    }

    pub fn shape_count(&self) -> usize {
        self.shapes.len()
    }

    fn placeholder_mut(&mut self, wanted: fn(PlaceholderKind) -> bool) -> Option<&mut Shape> {
        self.shapes.iter_mut().find(
            |s| matches!(s.kind(), ShapeKind::Placeholder { kind, .. } if wanted(*kind)),
        )
    }

    /// The title placeholder, if the layout has one.
    pub fn title_shape_mut(&mut self) -> Option<&mut Shape> {
        self.placeholder_mut(|kind| kind != PlaceholderKind::SubTitle)
    }

    /// The subtitle placeholder of a title slide.
    pub fn subtitle_shape_mut(&mut self) -> Option<&mut Shape> {
        self.placeholder_mut(|kind| kind == PlaceholderKind::SubTitle)
    }

    /// Text of the title placeholder.
    pub fn title(&self) -> Option<String> {
        self.shapes
            .iter()
            .find(|s| {
                matches!(
                    s.kind(),
                    ShapeKind::Placeholder { kind, .. } if *kind != PlaceholderKind::SubTitle
                )
            })
            .and_then(Shape::text_frame)
            .map(TextFrame::text)
    }

    /// Replace the title text. Returns false when the layout has no title.
    pub fn set_title(&mut self, title: &str) -> bool {
        match self.title_shape_mut().and_then(Shape::text_frame_mut) {
            Some(frame) => {
                frame.set_text(title);
                true
            },
            None => false,
        }
    }

    /// Append a shape built from its assigned ID and return it.
    pub(crate) fn push_shape(
        &mut self,
        placement: Option<Placement>,
        kind: impl FnOnce(ShapeId) -> ShapeKind,
    ) -> &mut Shape {
        let id = self.next_shape_id;
        self.next_shape_id += 1;
        self.shapes.push(Shape::new(id, placement, kind(id)));
        let last = self.shapes.len() - 1;
        &mut self.shapes[last]
    }

    /// Slides targeted by hyperlinks in this slide's text.
    pub(crate) fn hyperlink_targets(&self) -> Vec<SlideId> {
        let mut targets = Vec::new();
        for shape in &self.shapes {
            let frames: Vec<&TextFrame> = match shape.kind() {
                ShapeKind::Table(table) => table.cells().map(Cell::text_frame).collect(),
                _ => shape.text_frame().into_iter().collect(),
            };
            for frame in frames {
                for paragraph in frame.paragraphs() {
                    for run in paragraph.runs() {
                        if let Some(target) = run.hyperlink() {
                            if !targets.contains(&target) {
                                targets.push(target);
                            }
                        }
                    }
                }
            }
        }
        targets
    }

    /// Generate slide XML content with relationship IDs from the mapper.
    pub(crate) fn to_xml(&self, rels: &SlideRelationships) -> Result<String> {
        let mut xml = String::with_capacity(4096);

        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<p:sld xmlns:a="http://schemas.openxmlformats.org/drawingml/2006/main" "#,
        );
        xml.push_str(
            r#"xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships" "#,
        );
        xml.push_str(r#"xmlns:p="http://schemas.openxmlformats.org/presentationml/2006/main">"#);
        xml.push_str("<p:cSld><p:spTree>");

        // Group shape properties (required)
        xml.push_str(r#"<p:nvGrpSpPr><p:cNvPr id="1" name=""/><p:cNvGrpSpPr/><p:nvPr/></p:nvGrpSpPr>"#);
        xml.push_str("<p:grpSpPr><a:xfrm>");
        xml.push_str(r#"<a:off x="0" y="0"/><a:ext cx="0" cy="0"/>"#);
        xml.push_str(r#"<a:chOff x="0" y="0"/><a:chExt cx="0" cy="0"/>"#);
        xml.push_str("</a:xfrm></p:grpSpPr>");

        let mut image_counter = 0;
        for shape in &self.shapes {
            let image_rel_id = if shape.picture().is_some() {
                let rid = rels.image_id(image_counter);
                image_counter += 1;
                rid
            } else {
                None
            };
            shape.write_xml(&mut xml, Some(rels), image_rel_id)?;
        }

        xml.push_str("</p:spTree></p:cSld>");
        xml.push_str("<p:clrMapOvr><a:masterClrMapping/></p:clrMapOvr>");
        xml.push_str("</p:sld>");

        Ok(xml)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::Length;

    #[test]
    fn test_title_slide_has_title_and_subtitle() {
        let mut slide = Slide::new(SlideId::FIRST, Layout::TitleSlide);
        assert_eq!(slide.shape_count(), 2);
        assert!(slide.set_title("Example presentation"));
        assert_eq!(slide.title().as_deref(), Some("Example presentation"));
        assert!(slide.subtitle_shape_mut().is_some());
    }

    #[test]
    fn test_blank_slide_has_no_title() {
        let mut slide = Slide::new(SlideId::FIRST, Layout::Blank);
        assert!(!slide.set_title("ignored"));
        assert_eq!(slide.title(), None);
    }

    #[test]
    fn test_shape_ids_are_unique() {
        let mut slide = Slide::new(SlideId::FIRST, Layout::TitleOnly);
        let placement = Placement::new(Length::ZERO, Length::ZERO, Length::ZERO, Length::ZERO);
        let a = slide
            .push_shape(Some(placement), |_| ShapeKind::TextBox(TextFrame::new()))
            .id();
        let b = slide
            .push_shape(Some(placement), |_| ShapeKind::TextBox(TextFrame::new()))
            .id();
        assert_eq!((a, b), (3, 4));
        assert!(slide.shape(4).is_some());
    }

    #[test]
    fn test_hyperlink_targets_are_deduplicated() {
        let mut slide = Slide::new(SlideId::FIRST, Layout::Blank);
        let shape = slide.push_shape(None, |_| ShapeKind::TextBox(TextFrame::new()));
        let frame = shape.text_frame_mut().unwrap();
        for _ in 0..2 {
            frame
                .add_paragraph()
                .add_run("page 2")
                .set_hyperlink(Some(SlideId::from_raw(257)));
        }
        assert_eq!(slide.hyperlink_targets(), vec![SlideId::from_raw(257)]);
    }

    #[test]
    fn test_slide_xml() {
        let mut slide = Slide::new(SlideId::FIRST, Layout::TitleOnly);
        slide.set_title("A & B");
        let rels = SlideRelationships::new("../slideLayouts/slideLayout2.xml".into());
        let xml = slide.to_xml(&rels).unwrap();
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains(r#"<p:ph type="title"/>"#));
        assert!(xml.contains("<a:t>A &amp; B</a:t>"));
        assert!(xml.ends_with("</p:sld>"));
    }
}
