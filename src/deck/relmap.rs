/// Relationship ID bookkeeping for a single slide part.
///
/// Relationships are assigned before the slide XML is generated, so shapes
/// can reference the real IDs (`rId2`, `rId3`, …) instead of placeholders.
use std::collections::HashMap;

use super::slide::SlideId;

/// Relationship IDs of one slide: its layout, embedded images and the slides
/// its hyperlinks jump to.
#[derive(Debug, Default)]
pub struct SlideRelationships {
    /// Relationship targets in ID order (`rId1` first)
    entries: Vec<RelEntry>,
    /// Relationship ID per image, in shape order
    image_ids: Vec<String>,
    /// Relationship ID per hyperlinked target slide
    slide_link_ids: HashMap<SlideId, String>,
}

/// A relationship to be written into the slide's `.rels` part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelEntry {
    pub id: String,
    pub rel_type: &'static str,
    pub target: String,
}

pub const REL_SLIDE_LAYOUT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
pub const REL_IMAGE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/image";
pub const REL_SLIDE: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";

impl SlideRelationships {
    /// Create a mapper whose first relationship points at the slide layout.
    pub fn new(layout_target: String) -> Self {
        let mut rels = Self::default();
        rels.push(REL_SLIDE_LAYOUT, layout_target);
        rels
    }

    fn push(&mut self, rel_type: &'static str, target: String) -> String {
        let id = format!("rId{}", self.entries.len() + 1);
        self.entries.push(RelEntry {
            id: id.clone(),
            rel_type,
            target,
        });
        id
    }

    /// Register the next image (in shape order) stored at `target`.
    pub fn add_image(&mut self, target: String) -> &str {
        let id = self.push(REL_IMAGE, target);
        self.image_ids.push(id);
        self.image_ids.last().map(String::as_str).unwrap_or_default()
    }

    /// Register a hyperlink target slide; repeated targets share one relationship.
    pub fn add_slide_link(&mut self, slide: SlideId, target: String) {
        if !self.slide_link_ids.contains_key(&slide) {
            let id = self.push(REL_SLIDE, target);
            self.slide_link_ids.insert(slide, id);
        }
    }

    /// Relationship ID of the `index`-th image on the slide.
    pub fn image_id(&self, index: usize) -> Option<&str> {
        self.image_ids.get(index).map(String::as_str)
    }

    /// Relationship ID for jumping to `slide`, if it was registered.
    pub fn slide_link_id(&self, slide: SlideId) -> Option<&str> {
        self.slide_link_ids.get(&slide).map(String::as_str)
    }

    pub fn entries(&self) -> &[RelEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_sequential_after_layout() {
        let mut rels = SlideRelationships::new("../slideLayouts/slideLayout1.xml".into());
        assert_eq!(rels.add_image("../media/image1.png".into()), "rId2");
        rels.add_slide_link(SlideId::from_raw(257), "slide2.xml".into());
        rels.add_slide_link(SlideId::from_raw(257), "slide2.xml".into());
        assert_eq!(rels.add_image("../media/image2.png".into()), "rId4");

        assert_eq!(rels.entries().len(), 4);
        assert_eq!(rels.image_id(1), Some("rId4"));
        assert_eq!(rels.slide_link_id(SlideId::from_raw(257)), Some("rId3"));
        assert_eq!(rels.slide_link_id(SlideId::from_raw(300)), None);
    }
}
