//! Package writer for presentations.
//!
//! Serializes a [`Presentation`] into the ZIP container PowerPoint opens,
//! writing:
//! - `[Content_Types].xml`
//! - package relationships and document properties
//! - presentation, master, layouts and theme with their relationships
//! - one part per slide plus the media it embeds
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufWriter, Cursor, Seek, Write};
use std::path::Path;

use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::common::xml::escape_xml;
use crate::common::Result;

use super::presentation::Presentation;
use super::relmap::{RelEntry, SlideRelationships};
use super::slide::Layout;
use super::template;

mod content_type {
    pub const RELATIONSHIPS: &str = "application/vnd.openxmlformats-package.relationships+xml";
    pub const XML: &str = "application/xml";
    pub const PRESENTATION: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presentation.main+xml";
    pub const SLIDE: &str = "application/vnd.openxmlformats-officedocument.presentationml.slide+xml";
    pub const SLIDE_LAYOUT: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideLayout+xml";
    pub const SLIDE_MASTER: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.slideMaster+xml";
    pub const THEME: &str = "application/vnd.openxmlformats-officedocument.theme+xml";
    pub const PRES_PROPS: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.presProps+xml";
    pub const TABLE_STYLES: &str =
        "application/vnd.openxmlformats-officedocument.presentationml.tableStyles+xml";
    pub const CORE_PROPERTIES: &str = "application/vnd.openxmlformats-package.core-properties+xml";
    pub const EXTENDED_PROPERTIES: &str =
        "application/vnd.openxmlformats-officedocument.extended-properties+xml";
}

mod relationship_type {
    pub const OFFICE_DOCUMENT: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
    pub const CORE_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
    pub const EXTENDED_PROPERTIES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/extended-properties";
    pub const SLIDE_MASTER: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster";
    pub const THEME: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships/theme";
    pub const PRES_PROPS: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/presProps";
    pub const TABLE_STYLES: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/tableStyles";
}

/// Writes presentations as .pptx packages.
///
/// # Example
///
/// ```no_run
/// use pptx_tools::deck::{Layout, PackageWriter, Presentation};
///
/// let mut presentation = Presentation::default();
/// presentation.add_slide(Layout::TitleSlide).set_title("Hello");
/// PackageWriter::write("hello.pptx", &presentation)?;
/// # Ok::<(), pptx_tools::Error>(())
/// ```
pub struct PackageWriter;

impl PackageWriter {
    /// Write a presentation to a file, replacing any existing file.
    pub fn write<P: AsRef<Path>>(path: P, presentation: &Presentation) -> Result<()> {
        let file = BufWriter::new(File::create(path)?);
        let mut file = Self::write_to_stream(file, presentation)?;
        file.flush()?;
        Ok(())
    }

    /// Write a presentation to a seekable stream and hand the stream back.
    pub fn write_to_stream<W: Write + Seek>(writer: W, presentation: &Presentation) -> Result<W> {
        let mut package = PackageBuilder::new(ZipWriter::new(writer));
        package.write_presentation(presentation)?;
        Ok(package.zip.finish()?)
    }

    /// Serialize a presentation to bytes.
    pub fn to_bytes(presentation: &Presentation) -> Result<Vec<u8>> {
        let cursor = Self::write_to_stream(Cursor::new(Vec::new()), presentation)?;
        Ok(cursor.into_inner())
    }
}

struct PackageBuilder<W: Write + Seek> {
    zip: ZipWriter<W>,
    options: SimpleFileOptions,
    content_types: ContentTypes,
}

impl<W: Write + Seek> PackageBuilder<W> {
    fn new(zip: ZipWriter<W>) -> Self {
        Self {
            zip,
            options: SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated),
            content_types: ContentTypes::new(),
        }
    }

    fn put(&mut self, name: &str, data: &[u8]) -> Result<()> {
        self.zip.start_file(name, self.options)?;
        self.zip.write_all(data)?;
        Ok(())
    }

    /// Write a part and record its content type as an override.
    fn put_part(&mut self, name: &str, content_type: &'static str, data: &[u8]) -> Result<()> {
        self.content_types.add_override(name, content_type);
        self.put(name, data)
    }

    fn put_rels(&mut self, name: &str, entries: &[RelEntry]) -> Result<()> {
        self.put(name, relationships_xml(entries).as_bytes())
    }

    fn write_presentation(&mut self, presentation: &Presentation) -> Result<()> {
        self.put_rels(
            "_rels/.rels",
            &[
                rel(1, relationship_type::OFFICE_DOCUMENT, "ppt/presentation.xml"),
                rel(2, relationship_type::CORE_PROPERTIES, "docProps/core.xml"),
                rel(3, relationship_type::EXTENDED_PROPERTIES, "docProps/app.xml"),
            ],
        )?;
        self.put_part(
            "docProps/core.xml",
            content_type::CORE_PROPERTIES,
            template::core_props_xml(presentation.title()).as_bytes(),
        )?;
        self.put_part(
            "docProps/app.xml",
            content_type::EXTENDED_PROPERTIES,
            template::app_props_xml(presentation.slide_count()).as_bytes(),
        )?;

        // presentation.xml: master first, then slides, then the shared parts
        let slide_count = presentation.slide_count();
        let mut pres_rels = vec![rel(1, relationship_type::SLIDE_MASTER, "slideMasters/slideMaster1.xml")];
        let mut slide_rel_ids = Vec::with_capacity(slide_count);
        for index in 0..slide_count {
            let entry = rel(
                pres_rels.len() + 1,
                super::relmap::REL_SLIDE,
                &format!("slides/slide{}.xml", index + 1),
            );
            slide_rel_ids.push(entry.id.clone());
            pres_rels.push(entry);
        }
        for (rel_type, target) in [
            (relationship_type::PRES_PROPS, "presProps.xml"),
            (relationship_type::TABLE_STYLES, "tableStyles.xml"),
            (relationship_type::THEME, "theme/theme1.xml"),
        ] {
            pres_rels.push(rel(pres_rels.len() + 1, rel_type, target));
        }
        self.put_part(
            "ppt/presentation.xml",
            content_type::PRESENTATION,
            presentation.to_xml(&slide_rel_ids)?.as_bytes(),
        )?;
        self.put_rels("ppt/_rels/presentation.xml.rels", &pres_rels)?;
        self.put_part(
            "ppt/presProps.xml",
            content_type::PRES_PROPS,
            template::pres_props_xml().as_bytes(),
        )?;
        self.put_part(
            "ppt/tableStyles.xml",
            content_type::TABLE_STYLES,
            template::table_styles_xml().as_bytes(),
        )?;

        self.write_master(presentation)?;
        self.write_slides(presentation)?;

        let content_types = self.content_types.to_xml();
        self.put("[Content_Types].xml", content_types.as_bytes())
    }

    fn write_master(&mut self, presentation: &Presentation) -> Result<()> {
        let template = presentation.template();
        let mut master_rels: Vec<RelEntry> = Layout::ALL
            .iter()
            .enumerate()
            .map(|(index, layout)| {
                rel(
                    index + 1,
                    super::relmap::REL_SLIDE_LAYOUT,
                    &format!("../slideLayouts/slideLayout{}.xml", layout.part_index()),
                )
            })
            .collect();
        master_rels.push(rel(master_rels.len() + 1, relationship_type::THEME, "../theme/theme1.xml"));

        self.put_part(
            "ppt/slideMasters/slideMaster1.xml",
            content_type::SLIDE_MASTER,
            template::slide_master_xml(template, Layout::ALL.len())?.as_bytes(),
        )?;
        self.put_rels("ppt/slideMasters/_rels/slideMaster1.xml.rels", &master_rels)?;

        for layout in Layout::ALL {
            let index = layout.part_index();
            self.put_part(
                &format!("ppt/slideLayouts/slideLayout{}.xml", index),
                content_type::SLIDE_LAYOUT,
                template::slide_layout_xml(template, layout)?.as_bytes(),
            )?;
            self.put_rels(
                &format!("ppt/slideLayouts/_rels/slideLayout{}.xml.rels", index),
                &[rel(1, relationship_type::SLIDE_MASTER, "../slideMasters/slideMaster1.xml")],
            )?;
        }

        self.put_part(
            "ppt/theme/theme1.xml",
            content_type::THEME,
            template::theme_xml(template)?.as_bytes(),
        )
    }

    fn write_slides(&mut self, presentation: &Presentation) -> Result<()> {
        let mut image_counter = 0usize;
        for (index, slide) in presentation.slides().iter().enumerate() {
            let mut rels = SlideRelationships::new(format!(
                "../slideLayouts/slideLayout{}.xml",
                slide.layout().part_index()
            ));

            let mut media = Vec::new();
            for picture in slide.shapes().iter().filter_map(|s| s.picture()) {
                image_counter += 1;
                let extension = picture.format().extension();
                let name = format!("image{}.{}", image_counter, extension);
                rels.add_image(format!("../media/{}", name));
                self.content_types
                    .add_default(extension, picture.format().content_type());
                media.push((format!("ppt/media/{}", name), picture.data()));
            }

            for target in slide.hyperlink_targets() {
                // Links to slides outside this package are dropped.
                if let Some(target_index) = presentation.slide_index(target) {
                    rels.add_slide_link(target, format!("slide{}.xml", target_index + 1));
                }
            }

            let number = index + 1;
            self.put_part(
                &format!("ppt/slides/slide{}.xml", number),
                content_type::SLIDE,
                slide.to_xml(&rels)?.as_bytes(),
            )?;
            self.put_rels(
                &format!("ppt/slides/_rels/slide{}.xml.rels", number),
                rels.entries(),
            )?;
            for (name, data) in media {
                self.put(&name, data)?;
            }
        }
        Ok(())
    }
}

fn rel(index: usize, rel_type: &'static str, target: &str) -> RelEntry {
    RelEntry {
        id: format!("rId{}", index),
        rel_type,
        target: target.to_string(),
    }
}

fn relationships_xml(entries: &[RelEntry]) -> String {
    let mut xml = String::with_capacity(256 + entries.len() * 160);
    xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
    xml.push_str(
        r#"<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">"#,
    );
    for entry in entries {
        xml.push_str(&format!(
            r#"<Relationship Id="{}" Type="{}" Target="{}"/>"#,
            entry.id,
            entry.rel_type,
            escape_xml(&entry.target)
        ));
    }
    xml.push_str("</Relationships>");
    xml
}

/// Default and Override entries of `[Content_Types].xml`.
struct ContentTypes {
    /// Content types by extension
    defaults: BTreeMap<String, &'static str>,
    /// Content types by part name
    overrides: BTreeMap<String, &'static str>,
}

impl ContentTypes {
    fn new() -> Self {
        let mut defaults = BTreeMap::new();
        defaults.insert("rels".to_string(), content_type::RELATIONSHIPS);
        defaults.insert("xml".to_string(), content_type::XML);
        Self {
            defaults,
            overrides: BTreeMap::new(),
        }
    }

    fn add_default(&mut self, extension: &str, content_type: &'static str) {
        self.defaults.insert(extension.to_string(), content_type);
    }

    fn add_override(&mut self, part_name: &str, content_type: &'static str) {
        self.overrides.insert(format!("/{}", part_name), content_type);
    }

    fn to_xml(&self) -> String {
        let mut xml = String::with_capacity(2048);
        xml.push_str(r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>"#);
        xml.push_str(
            r#"<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">"#,
        );
        for (extension, content_type) in &self.defaults {
            xml.push_str(&format!(
                r#"<Default Extension="{}" ContentType="{}"/>"#,
                escape_xml(extension),
                content_type
            ));
        }
        for (part_name, content_type) in &self.overrides {
            xml.push_str(&format!(
                r#"<Override PartName="{}" ContentType="{}"/>"#,
                escape_xml(part_name),
                content_type
            ));
        }
        xml.push_str("</Types>");
        xml
    }
}

#[cfg(test)]
mod tests {
    use std::io::Read;

    use super::*;
    use crate::common::Length;
    use crate::deck::shape::{Picture, ShapeKind};
    use crate::deck::slide::SlideId;
    use crate::deck::text::TextFrame;
    use crate::figure::solid_png;
    use crate::position::Placement;

    fn read_part(bytes: &[u8], name: &str) -> String {
        let mut archive = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
        let mut file = archive.by_name(name).unwrap();
        let mut content = String::new();
        file.read_to_string(&mut content).unwrap();
        content
    }

    fn sample() -> Presentation {
        let mut presentation = Presentation::default();
        presentation.set_title("Sample");
        presentation.add_slide(Layout::TitleSlide).set_title("First");
        let slide = presentation.add_slide(Layout::TitleOnly);
        slide.set_title("Second");
        let placement = Placement::new(Length::ZERO, Length::ZERO, Length::from_inches(1.0), Length::from_inches(1.0));
        let picture = Picture::new(solid_png(4, 3), "pixel").unwrap();
        slide.push_shape(Some(placement), |_| ShapeKind::Picture(picture));
        let link = slide.push_shape(Some(placement), |_| ShapeKind::TextBox(TextFrame::new()));
        let frame = link.text_frame_mut().unwrap();
        frame.add_paragraph().add_run("back").set_hyperlink(Some(SlideId::FIRST));
        frame.add_paragraph().add_run("gone").set_hyperlink(Some(SlideId::from_raw(999)));
        presentation
    }

    #[test]
    fn test_package_contains_required_parts() {
        let bytes = PackageWriter::to_bytes(&sample()).unwrap();
        let archive = zip::ZipArchive::new(Cursor::new(bytes.as_slice())).unwrap();
        let names: Vec<&str> = archive.file_names().collect();
        for required in [
            "[Content_Types].xml",
            "_rels/.rels",
            "ppt/presentation.xml",
            "ppt/_rels/presentation.xml.rels",
            "ppt/slideMasters/slideMaster1.xml",
            "ppt/slideLayouts/slideLayout3.xml",
            "ppt/theme/theme1.xml",
            "ppt/slides/slide1.xml",
            "ppt/slides/slide2.xml",
            "ppt/media/image1.png",
            "docProps/core.xml",
        ] {
            assert!(names.contains(&required), "missing {}", required);
        }
    }

    #[test]
    fn test_content_types_cover_parts_and_media() {
        let bytes = PackageWriter::to_bytes(&sample()).unwrap();
        let types = read_part(&bytes, "[Content_Types].xml");
        assert!(types.contains(r#"<Default Extension="png" ContentType="image/png"/>"#));
        assert!(types.contains(r#"<Override PartName="/ppt/slides/slide2.xml""#));
        assert!(types.contains(r#"<Override PartName="/ppt/presentation.xml""#));
    }

    #[test]
    fn test_slide_relationships() {
        let bytes = PackageWriter::to_bytes(&sample()).unwrap();
        let rels = read_part(&bytes, "ppt/slides/_rels/slide2.xml.rels");
        assert!(rels.contains(r#"Target="../slideLayouts/slideLayout2.xml""#));
        assert!(rels.contains(r#"Target="../media/image1.png""#));
        assert!(rels.contains(r#"Target="slide1.xml""#));

        let slide = read_part(&bytes, "ppt/slides/slide2.xml");
        assert!(slide.contains(r#"<a:blip r:embed="rId2"/>"#));
        assert_eq!(slide.matches("hlinkClick").count(), 1);
    }

    #[test]
    fn test_presentation_rels_order() {
        let bytes = PackageWriter::to_bytes(&sample()).unwrap();
        let rels = read_part(&bytes, "ppt/_rels/presentation.xml.rels");
        assert!(rels.contains(r#"Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideMaster""#));
        assert!(rels.contains(r#"Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide" Target="slides/slide2.xml""#));
        let presentation = read_part(&bytes, "ppt/presentation.xml");
        assert!(presentation.contains(r#"<p:sldId id="257" r:id="rId3"/>"#));
    }

    #[test]
    fn test_write_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.pptx");
        PackageWriter::write(&path, &sample()).unwrap();
        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[..2], b"PK");
        assert!(read_part(&bytes, "docProps/core.xml").contains("<dc:title>Sample</dc:title>"));
    }
}
