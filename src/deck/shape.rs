//! Shapes placed on a slide: text boxes, title placeholders, tables and pictures.
use std::fmt::Write as FmtWrite;

use crate::common::xml::escape_xml;
use crate::common::{Length, Result};
use crate::position::Placement;

use super::format::ImageFormat;
use super::relmap::SlideRelationships;
use super::text::TextFrame;

/// Identifier of a shape, unique within its slide.
pub type ShapeId = u32;

/// Layout placeholder a title shape is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderKind {
    /// Centered title of a title slide
    CenterTitle,
    /// Title of a regular slide
    Title,
    /// Subtitle of a title slide
    SubTitle,
}

impl PlaceholderKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::CenterTitle => "ctrTitle",
            Self::Title => "title",
            Self::SubTitle => "subTitle",
        }
    }
}

/// A single table cell.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cell {
    text_frame: TextFrame,
}

impl Cell {
    pub fn new(text: &str) -> Self {
        Self {
            text_frame: TextFrame::from_text(text),
        }
    }

    pub fn text(&self) -> String {
        self.text_frame.text()
    }

    pub fn text_frame(&self) -> &TextFrame {
        &self.text_frame
    }

    pub fn text_frame_mut(&mut self) -> &mut TextFrame {
        &mut self.text_frame
    }
}

/// A rectangular grid of cells.
///
/// Rows are padded to a common column count, so every row has `columns()` cells.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    rows: Vec<Vec<Cell>>,
    column_widths: Vec<Length>,
    row_heights: Vec<Length>,
}

impl Table {
    /// Build a table from rows of already stringified cell texts.
    ///
    /// Shorter rows are padded with empty cells. Column widths and row heights
    /// start out evenly distributed over `size`.
    pub fn from_rows(rows: Vec<Vec<String>>, width: Length, height: Length) -> Self {
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        let rows: Vec<Vec<Cell>> = rows
            .into_iter()
            .map(|row| {
                let mut cells: Vec<Cell> = row.iter().map(|text| Cell::new(text)).collect();
                cells.resize_with(columns, Cell::default);
                cells
            })
            .collect();

        let mut table = Self {
            column_widths: Vec::new(),
            row_heights: Vec::new(),
            rows,
        };
        table.distribute(width, height);
        table
    }

    /// Spread `width` and `height` evenly over the columns and rows.
    pub fn distribute(&mut self, width: Length, height: Length) {
        self.column_widths = split_evenly(width, self.columns());
        self.row_heights = split_evenly(height, self.rows.len());
    }

    pub fn rows(&self) -> usize {
        self.rows.len()
    }

    pub fn columns(&self) -> usize {
        self.rows.first().map(Vec::len).unwrap_or(0)
    }

    pub fn cell(&self, row: usize, column: usize) -> Option<&Cell> {
        self.rows.get(row)?.get(column)
    }

    pub fn cell_mut(&mut self, row: usize, column: usize) -> Option<&mut Cell> {
        self.rows.get_mut(row)?.get_mut(column)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.rows.iter().flatten()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.rows.iter_mut().flatten()
    }

    pub fn column_widths(&self) -> &[Length] {
        &self.column_widths
    }

    pub fn row_heights(&self) -> &[Length] {
        &self.row_heights
    }

    fn write_xml(&self, xml: &mut String, rels: Option<&SlideRelationships>) -> Result<()> {
        xml.push_str("<a:tbl>");
        xml.push_str(r#"<a:tblPr firstRow="1" bandRow="1"/>"#);
        xml.push_str("<a:tblGrid>");
        for width in &self.column_widths {
            write!(xml, r#"<a:gridCol w="{}"/>"#, width.emus())?;
        }
        xml.push_str("</a:tblGrid>");
        for (row, height) in self.rows.iter().zip(&self.row_heights) {
            write!(xml, r#"<a:tr h="{}">"#, height.emus())?;
            for cell in row {
                xml.push_str("<a:tc>");
                cell.text_frame.write_xml(xml, "a:txBody", rels)?;
                xml.push_str("<a:tcPr/>");
                xml.push_str("</a:tc>");
            }
            xml.push_str("</a:tr>");
        }
        xml.push_str("</a:tbl>");
        Ok(())
    }
}

/// Split `total` into `parts` lengths that add up to exactly `total`.
fn split_evenly(total: Length, parts: usize) -> Vec<Length> {
    if parts == 0 {
        return Vec::new();
    }
    let base = total.emus() / parts as i64;
    let remainder = total.emus() - base * parts as i64;
    (0..parts)
        .map(|index| {
            let extra = if (index as i64) < remainder { 1 } else { 0 };
            Length::from_emus(base + extra)
        })
        .collect()
}

/// An embedded raster image.
#[derive(Debug, Clone, PartialEq)]
pub struct Picture {
    data: Vec<u8>,
    format: ImageFormat,
    description: String,
}

impl Picture {
    /// Wrap encoded image bytes, sniffing their format.
    pub fn new(data: Vec<u8>, description: impl Into<String>) -> Result<Self> {
        let format = ImageFormat::from_bytes(&data)?;
        Ok(Self {
            data,
            format,
            description: description.into(),
        })
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// What a shape contains.
#[derive(Debug, Clone, PartialEq)]
pub enum ShapeKind {
    TextBox(TextFrame),
    Placeholder {
        kind: PlaceholderKind,
        text_frame: TextFrame,
    },
    Table(Table),
    Picture(Picture),
}

/// A placeable element on a slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Shape {
    id: ShapeId,
    name: String,
    /// `None` inherits the geometry of the layout placeholder.
    placement: Option<Placement>,
    kind: ShapeKind,
}

impl Shape {
    pub(crate) fn new(id: ShapeId, placement: Option<Placement>, kind: ShapeKind) -> Self {
        let label = match &kind {
            ShapeKind::TextBox(_) => "TextBox",
            ShapeKind::Placeholder {
                kind: PlaceholderKind::SubTitle,
                ..
            } => "Subtitle",
            ShapeKind::Placeholder { .. } => "Title",
            ShapeKind::Table(_) => "Table",
            ShapeKind::Picture(_) => "Picture",
        };
        Self {
            id,
            // Names follow PowerPoint's "<Kind> <id - 1>" convention.
            name: format!("{} {}", label, id.saturating_sub(1)),
            placement,
            kind,
        }
    }

    pub fn id(&self) -> ShapeId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn placement(&self) -> Option<Placement> {
        self.placement
    }

    pub fn set_placement(&mut self, placement: Placement) {
        self.placement = Some(placement);
        if let ShapeKind::Table(table) = &mut self.kind {
            table.distribute(placement.width, placement.height);
        }
    }

    pub fn kind(&self) -> &ShapeKind {
        &self.kind
    }

    /// The shape's own text frame (text boxes and placeholders).
    pub fn text_frame(&self) -> Option<&TextFrame> {
        match &self.kind {
            ShapeKind::TextBox(frame) | ShapeKind::Placeholder { text_frame: frame, .. } => {
                Some(frame)
            },
            _ => None,
        }
    }

    pub fn text_frame_mut(&mut self) -> Option<&mut TextFrame> {
        match &mut self.kind {
            ShapeKind::TextBox(frame) | ShapeKind::Placeholder { text_frame: frame, .. } => {
                Some(frame)
            },
            _ => None,
        }
    }

    pub fn table(&self) -> Option<&Table> {
        match &self.kind {
            ShapeKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn table_mut(&mut self) -> Option<&mut Table> {
        match &mut self.kind {
            ShapeKind::Table(table) => Some(table),
            _ => None,
        }
    }

    pub fn picture(&self) -> Option<&Picture> {
        match &self.kind {
            ShapeKind::Picture(picture) => Some(picture),
            _ => None,
        }
    }

    /// Every text frame in the shape: its own frame, or one per table cell.
    pub fn text_frames_mut(&mut self) -> Vec<&mut TextFrame> {
        match &mut self.kind {
            ShapeKind::TextBox(frame) | ShapeKind::Placeholder { text_frame: frame, .. } => {
                vec![frame]
            },
            ShapeKind::Table(table) => table.cells_mut().map(Cell::text_frame_mut).collect(),
            ShapeKind::Picture(_) => Vec::new(),
        }
    }

    fn write_xfrm(&self, xml: &mut String, tag: &str) -> Result<()> {
        let Some(placement) = self.placement else {
            return Ok(());
        };
        write!(
            xml,
            r#"<{tag}><a:off x="{}" y="{}"/><a:ext cx="{}" cy="{}"/></{tag}>"#,
            placement.left.emus(),
            placement.top.emus(),
            placement.width.emus().max(0),
            placement.height.emus().max(0),
        )?;
        Ok(())
    }

    /// Generate XML for this shape.
    ///
    /// `image_rel_id` is the relationship of the embedded image for pictures.
    pub(crate) fn write_xml(
        &self,
        xml: &mut String,
        rels: Option<&SlideRelationships>,
        image_rel_id: Option<&str>,
    ) -> Result<()> {
        let name = escape_xml(&self.name);
        match &self.kind {
            ShapeKind::TextBox(frame) => {
                xml.push_str("<p:sp><p:nvSpPr>");
                write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, self.id, name)?;
                xml.push_str(r#"<p:cNvSpPr txBox="1"/><p:nvPr/></p:nvSpPr>"#);
                xml.push_str("<p:spPr>");
                self.write_xfrm(xml, "a:xfrm")?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom><a:noFill/>"#);
                xml.push_str("</p:spPr>");
                frame.write_xml(xml, "p:txBody", rels)?;
                xml.push_str("</p:sp>");
            },
            ShapeKind::Placeholder { kind, text_frame } => {
                xml.push_str("<p:sp><p:nvSpPr>");
                write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, self.id, name)?;
                xml.push_str(r#"<p:cNvSpPr><a:spLocks noGrp="1"/></p:cNvSpPr>"#);
                match kind {
                    PlaceholderKind::SubTitle => {
                        write!(xml, r#"<p:nvPr><p:ph type="{}" idx="1"/></p:nvPr>"#, kind.as_str())?
                    },
                    _ => write!(xml, r#"<p:nvPr><p:ph type="{}"/></p:nvPr>"#, kind.as_str())?,
                }
                xml.push_str("</p:nvSpPr>");
                if self.placement.is_some() {
                    xml.push_str("<p:spPr>");
                    self.write_xfrm(xml, "a:xfrm")?;
                    xml.push_str("</p:spPr>");
                } else {
                    xml.push_str("<p:spPr/>");
                }
                text_frame.write_xml(xml, "p:txBody", rels)?;
                xml.push_str("</p:sp>");
            },
            ShapeKind::Table(table) => {
                xml.push_str("<p:graphicFrame><p:nvGraphicFramePr>");
                write!(xml, r#"<p:cNvPr id="{}" name="{}"/>"#, self.id, name)?;
                xml.push_str(
                    r#"<p:cNvGraphicFramePr><a:graphicFrameLocks noGrp="1"/></p:cNvGraphicFramePr><p:nvPr/>"#,
                );
                xml.push_str("</p:nvGraphicFramePr>");
                self.write_xfrm(xml, "p:xfrm")?;
                xml.push_str(
                    r#"<a:graphic><a:graphicData uri="http://schemas.openxmlformats.org/drawingml/2006/table">"#,
                );
                table.write_xml(xml, rels)?;
                xml.push_str("</a:graphicData></a:graphic></p:graphicFrame>");
            },
            ShapeKind::Picture(picture) => {
                xml.push_str("<p:pic><p:nvPicPr>");
                write!(
                    xml,
                    r#"<p:cNvPr id="{}" name="{}" descr="{}"/>"#,
                    self.id,
                    name,
                    escape_xml(&picture.description)
                )?;
                xml.push_str(r#"<p:cNvPicPr><a:picLocks noChangeAspect="1"/></p:cNvPicPr><p:nvPr/>"#);
                xml.push_str("</p:nvPicPr>");
                xml.push_str("<p:blipFill>");
                if let Some(rid) = image_rel_id {
                    write!(xml, r#"<a:blip r:embed="{}"/>"#, rid)?;
                }
                xml.push_str("<a:stretch><a:fillRect/></a:stretch></p:blipFill>");
                xml.push_str("<p:spPr>");
                self.write_xfrm(xml, "a:xfrm")?;
                xml.push_str(r#"<a:prstGeom prst="rect"><a:avLst/></a:prstGeom>"#);
                xml.push_str("</p:spPr></p:pic>");
            },
        }
        Ok(())
    }
}
