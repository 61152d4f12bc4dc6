//! High-level presentation builder.
//!
//! [`PptxCreator`] creates slides and places text boxes, tables and figures on
//! them using [`Position`]s and styles. Every `add_*` call returns a small
//! copyable handle ([`SlideRef`], [`ShapeRef`]) that can be turned back into a
//! mutable element for further styling.
//!
//! # Examples
//!
//! ```rust,no_run
//! use pptx_tools::creator::PptxCreator;
//! use pptx_tools::position::Position;
//! use pptx_tools::style::sheet;
//!
//! let mut pp = PptxCreator::default();
//! let defaults = pp.settings().style.clone();
//!
//! let title_slide = pp.add_title_slide("Example presentation");
//! if let Some(title) = pp.slide_mut(title_slide)?.title_shape_mut() {
//!     sheet::font_title(&defaults).write_shape(title)?;
//! }
//! let text = pp.add_text_box(
//!     title_slide,
//!     "first\nsecond\nthird",
//!     Position::new(0.02, 0.24),
//!     Some(&sheet::font_default(&defaults).size(16.0)),
//! )?;
//! sheet::font_sub_title(&defaults).write_shape(pp.shape_mut(text)?)?;
//! pp.save("example.pptx", true)?;
//! # Ok::<(), pptx_tools::Error>(())
//! ```
use std::fmt::{self, Display};
use std::path::{Path, PathBuf};

use crate::common::{Error, Length, Result};
use crate::config::Settings;
use crate::deck::{
    Layout, PackageWriter, Picture, Presentation, Shape, ShapeId, ShapeKind, Slide, SlideId,
    Table, Template, TextFrame,
};
use crate::export::{self, ExportFormat, LibreOffice, Renderer};
use crate::figure::{Figure, RasterFigure};
use crate::position::{Dimension, Extent, Placement, Position, Size};
use crate::style::FontStyle;

/// Title of slides created by [`PptxCreator::add_content_slide`] by default.
pub const CONTENT_SLIDE_TITLE: &str = "Content";

/// Default column width of tables without an explicit width.
const TABLE_COLUMN_WIDTH: Length = Length::from_emus(914_400);
/// Default row height of tables without an explicit height.
const TABLE_ROW_HEIGHT: Length = Length::from_emus(370_840);

/// Handle of a slide created by a [`PptxCreator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlideRef(SlideId);

impl SlideRef {
    pub fn id(&self) -> SlideId {
        self.0
    }
}

impl Display for SlideRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "slide {}", self.0)
    }
}

/// Handle of a shape created by a [`PptxCreator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShapeRef {
    slide: SlideId,
    shape: ShapeId,
}

impl ShapeRef {
    pub fn slide(&self) -> SlideRef {
        SlideRef(self.slide)
    }

    pub fn id(&self) -> ShapeId {
        self.shape
    }
}

/// What [`PptxCreator::save_with`] writes besides the .pptx file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SaveOptions {
    /// Replace existing output files
    pub overwrite: bool,
    /// Also export `<name>.pdf` next to the presentation
    pub create_pdf: bool,
    /// Also export slide images into `<name>_pngs/`
    pub create_pngs: bool,
}

/// Outcome of [`PptxCreator::save_with`].
#[derive(Debug, Default)]
pub struct SaveReport {
    pub pptx: PathBuf,
    pub pdf: Option<PathBuf>,
    pub pngs: Vec<PathBuf>,
    /// Secondary exports that failed; the .pptx was still written
    pub failures: Vec<(ExportFormat, Error)>,
}

impl SaveReport {
    /// Whether every requested export succeeded.
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Builds a presentation slide by slide.
pub struct PptxCreator {
    presentation: Presentation,
    settings: Settings,
    renderer: Option<Box<dyn Renderer>>,
}

impl Default for PptxCreator {
    fn default() -> Self {
        Self::with_settings(Settings::default())
    }
}

impl PptxCreator {
    /// Start an empty presentation on `template` with default settings.
    pub fn new(template: Template) -> Self {
        Self {
            presentation: Presentation::new(template),
            settings: Settings::default(),
            renderer: None,
        }
    }

    /// Start an empty presentation as described by `settings`.
    pub fn with_settings(settings: Settings) -> Self {
        Self {
            presentation: Presentation::new(Template::from_kind(settings.template)),
            settings,
            renderer: None,
        }
    }

    /// Use `renderer` for PDF and PNG export instead of locating LibreOffice.
    pub fn with_renderer(mut self, renderer: Box<dyn Renderer>) -> Self {
        self.renderer = Some(renderer);
        self
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn presentation(&self) -> &Presentation {
        &self.presentation
    }

    pub fn presentation_mut(&mut self) -> &mut Presentation {
        &mut self.presentation
    }

    /// Size of the slide canvas positions are resolved against.
    pub fn canvas(&self) -> Size {
        self.presentation.slide_size()
    }

    fn add_titled_slide(&mut self, layout: Layout, title: &str) -> SlideRef {
        let slide = self.presentation.add_slide(layout);
        slide.set_title(title);
        log::debug!("Added {} slide {} '{}'", layout.name(), slide.id(), title);
        SlideRef(slide.id())
    }

    /// Add a slide with a centered title and an empty subtitle.
    pub fn add_title_slide(&mut self, title: &str) -> SlideRef {
        self.add_titled_slide(Layout::TitleSlide, title)
    }

    /// Add a slide with a title bar.
    pub fn add_slide(&mut self, title: &str) -> SlideRef {
        self.add_titled_slide(Layout::TitleOnly, title)
    }

    /// Add a table-of-contents slide listing every other slide.
    ///
    /// Each existing slide gets one paragraph holding its title (or
    /// "Slide N" when it has none). With `link_slides` the paragraph jumps to
    /// its slide in a slide show.
    pub fn add_content_slide(&mut self, title: Option<&str>, link_slides: bool) -> SlideRef {
        let (targets, labels): (Vec<SlideId>, Vec<String>) = self
            .presentation
            .slides()
            .iter()
            .enumerate()
            .map(|(index, slide)| {
                let label = slide
                    .title()
                    .map(|t| t.replace('\n', " "))
                    .filter(|t| !t.is_empty())
                    .unwrap_or_else(|| format!("Slide {}", index + 1));
                (slide.id(), label)
            })
            .unzip();

        let mut frame = TextFrame::from_text(&labels.join("\n"));
        if link_slides {
            for (paragraph, target) in frame.paragraphs_mut().iter_mut().zip(targets) {
                for run in paragraph.runs_mut() {
                    run.set_hyperlink(Some(target));
                }
            }
        }

        let slide_ref = self.add_titled_slide(Layout::TitleOnly, title.unwrap_or(CONTENT_SLIDE_TITLE));
        let placement = Position::new(0.0625, 0.25)
            .with_size(Dimension::Relative(0.875), Dimension::Relative(0.65))
            .resolve(self.canvas(), None);
        if let Some(slide) = self.presentation.slide_mut(slide_ref.id()) {
            slide.push_shape(Some(placement), |_| ShapeKind::TextBox(frame));
        }
        slide_ref
    }

    pub fn slide(&self, slide: SlideRef) -> Result<&Slide> {
        self.presentation
            .slide(slide.id())
            .ok_or_else(|| Error::NotFound(slide.to_string()))
    }

    pub fn slide_mut(&mut self, slide: SlideRef) -> Result<&mut Slide> {
        self.presentation
            .slide_mut(slide.id())
            .ok_or_else(|| Error::NotFound(slide.to_string()))
    }

    pub fn shape(&self, shape: ShapeRef) -> Result<&Shape> {
        self.slide(shape.slide())?
            .shape(shape.id())
            .ok_or_else(|| Error::NotFound(format!("shape {} on {}", shape.id(), shape.slide())))
    }

    pub fn shape_mut(&mut self, shape: ShapeRef) -> Result<&mut Shape> {
        self.slide_mut(shape.slide())?
            .shape_mut(shape.id())
            .ok_or_else(|| Error::NotFound(format!("shape {} on {}", shape.id(), shape.slide())))
    }

    fn push_shape(&mut self, slide: SlideRef, placement: Placement, kind: ShapeKind) -> Result<ShapeRef> {
        let canvas = self.canvas();
        let shape = self
            .slide_mut(slide)?
            .push_shape(Some(placement), |_| kind);
        if !placement.fits_within(canvas) {
            log::debug!("{} extends beyond the slide", shape.name());
        }
        Ok(ShapeRef {
            slide: slide.id(),
            shape: shape.id(),
        })
    }

    /// Add a text box with one paragraph per line of `text`.
    ///
    /// Without an explicit width the box grows with its text and does not wrap.
    pub fn add_text_box(
        &mut self,
        slide: SlideRef,
        text: &str,
        position: Position,
        font: Option<&FontStyle>,
    ) -> Result<ShapeRef> {
        let mut frame = TextFrame::from_text(text);
        frame.set_auto_fit(true);
        frame.set_word_wrap(!matches!(position.width, Extent::Auto));
        if let Some(font) = font {
            font.write_text_frame(&mut frame)?;
        }
        let placement = position.resolve(self.canvas(), None);
        let shape = self.push_shape(slide, placement, ShapeKind::TextBox(frame))?;
        log::debug!("Added text box {} to {}", shape.id(), slide);
        Ok(shape)
    }

    /// Add a table; every value is converted to its display text.
    ///
    /// Rows may differ in length; shorter rows are padded with empty cells.
    /// Without an explicit size every column is 1" wide and every row 0.41" high.
    pub fn add_table<R, C, T>(&mut self, slide: SlideRef, rows: R, position: Position) -> Result<ShapeRef>
    where
        R: IntoIterator<Item = C>,
        C: IntoIterator<Item = T>,
        T: Display,
    {
        let rows: Vec<Vec<String>> = rows
            .into_iter()
            .map(|row| row.into_iter().map(|value| value.to_string()).collect())
            .collect();
        let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
        if columns == 0 {
            return Err(Error::InvalidArgument("a table needs at least one cell".to_string()));
        }

        let natural = Size::new(
            Length::from_emus(TABLE_COLUMN_WIDTH.emus() * columns as i64),
            Length::from_emus(TABLE_ROW_HEIGHT.emus() * rows.len() as i64),
        );
        let placement = position.resolve(self.canvas(), Some(natural));
        let table = Table::from_rows(rows, placement.width, placement.height);
        let shape = self.push_shape(slide, placement, ShapeKind::Table(table))?;
        log::debug!(
            "Added {}-column table {} to {}",
            columns,
            shape.id(),
            slide
        );
        Ok(shape)
    }

    /// Add an encoded image; its natural size is its pixel size at the
    /// configured figure resolution, scaled by `zoom`.
    pub fn add_picture(
        &mut self,
        slide: SlideRef,
        data: Vec<u8>,
        position: Position,
        zoom: f64,
    ) -> Result<ShapeRef> {
        check_zoom(zoom)?;
        let figure = RasterFigure::new(data, self.settings.figure_dpi)?;
        let natural = figure.natural_size(zoom);
        let description = figure.description().to_string();
        let picture = Picture::new(figure.into_data(), description)?;
        let placement = position.resolve(self.canvas(), Some(natural));
        self.push_shape(slide, placement, ShapeKind::Picture(picture))
    }

    /// Add a rendered figure at its own size scaled by `zoom`.
    pub fn add_figure(
        &mut self,
        slide: SlideRef,
        figure: &dyn Figure,
        position: Position,
        zoom: f64,
    ) -> Result<ShapeRef> {
        check_zoom(zoom)?;
        let png = figure.to_png(self.settings.figure_dpi)?;
        let picture = Picture::new(png, figure.description())?;
        let placement = position.resolve(self.canvas(), Some(figure.natural_size(zoom)));
        let shape = self.push_shape(slide, placement, ShapeKind::Picture(picture))?;
        log::debug!("Added figure {} to {} at zoom {}", shape.id(), slide, zoom);
        Ok(shape)
    }

    /// Write the presentation to `path`.
    ///
    /// Fails with [`Error::AlreadyExists`] when `path` exists and `overwrite`
    /// is false.
    pub fn save<P: AsRef<Path>>(&self, path: P, overwrite: bool) -> Result<()> {
        let path = path.as_ref();
        export::ensure_writable(path, overwrite)?;
        PackageWriter::write(path, &self.presentation)?;
        log::info!(
            "Saved {} slides to {}",
            self.presentation.slide_count(),
            path.display()
        );
        Ok(())
    }

    fn with_renderer_for<T>(
        &mut self,
        export: impl FnOnce(&dyn Renderer, &Presentation) -> Result<T>,
    ) -> Result<T> {
        if self.renderer.is_none() {
            let renderer = LibreOffice::locate(&self.settings.renderer)?;
            log::debug!("Using LibreOffice at {}", renderer.program().display());
            self.renderer = Some(Box::new(renderer));
        }
        match self.renderer.as_deref() {
            Some(renderer) => export(renderer, &self.presentation),
            None => Err(Error::RendererUnavailable("no renderer configured".to_string())),
        }
    }

    /// Export the presentation as PDF.
    pub fn save_as_pdf<P: AsRef<Path>>(&mut self, path: P, overwrite: bool) -> Result<()> {
        let path = path.as_ref();
        self.with_renderer_for(|renderer, presentation| {
            export::export_pdf(renderer, presentation, path, overwrite)
        })
    }

    /// Export one PNG per slide into `folder`.
    pub fn save_as_png<P: AsRef<Path>>(
        &mut self,
        folder: P,
        overwrite_folder: bool,
    ) -> Result<Vec<PathBuf>> {
        let folder = folder.as_ref();
        self.with_renderer_for(|renderer, presentation| {
            export::export_pngs(renderer, presentation, folder, overwrite_folder)
        })
    }

    /// Save the .pptx, then attempt the requested exports.
    ///
    /// Only the .pptx is required: export failures are logged and collected
    /// in the report instead of being returned.
    pub fn save_with<P: AsRef<Path>>(&mut self, path: P, options: SaveOptions) -> Result<SaveReport> {
        let path = path.as_ref();
        self.save(path, options.overwrite)?;
        let mut report = SaveReport {
            pptx: path.to_path_buf(),
            ..SaveReport::default()
        };

        if options.create_pdf {
            let pdf = path.with_extension("pdf");
            match self.save_as_pdf(&pdf, options.overwrite) {
                Ok(()) => report.pdf = Some(pdf),
                Err(e) => {
                    log::warn!("PDF export skipped: {}", e);
                    report.failures.push((ExportFormat::Pdf, e));
                },
            }
        }
        if options.create_pngs {
            let folder = png_folder_for(path);
            match self.save_as_png(&folder, options.overwrite) {
                Ok(images) => report.pngs = images,
                Err(e) => {
                    log::warn!("PNG export skipped: {}", e);
                    report.failures.push((ExportFormat::Png, e));
                },
            }
        }
        Ok(report)
    }
}

fn check_zoom(zoom: f64) -> Result<()> {
    if zoom.is_finite() && zoom > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidArgument(format!("zoom must be positive, got {}", zoom)))
    }
}

/// `deck.pptx` exports its images into `deck_pngs/`.
fn png_folder_for(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "presentation".to_string());
    path.with_file_name(format!("{}_pngs", stem))
}
