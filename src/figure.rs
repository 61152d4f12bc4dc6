//! Figures rendered elsewhere (by a plotting library) and embedded as pictures.
use std::io::Cursor;
use std::path::Path;

use crate::common::{Error, Length, Result};
use crate::position::Size;

/// A figure that can be rasterized for embedding.
///
/// Implement this for the figure type of a plotting library to place its
/// output on slides with [`PptxCreator::add_figure`](crate::creator::PptxCreator::add_figure).
pub trait Figure {
    /// Width and height in inches.
    fn size_inches(&self) -> (f64, f64);

    /// The figure encoded as PNG at `dpi` dots per inch.
    fn to_png(&self, dpi: u32) -> Result<Vec<u8>>;

    /// Alternative text for the picture.
    fn description(&self) -> &str {
        "figure"
    }

    /// Size on the slide at the given zoom factor.
    fn natural_size(&self, zoom: f64) -> Size {
        let (width, height) = self.size_inches();
        Size::new(Length::from_inches(width), Length::from_inches(height)).scale(zoom)
    }
}

/// An already rendered raster image with a known resolution.
#[derive(Debug, Clone)]
pub struct RasterFigure {
    data: Vec<u8>,
    width_px: u32,
    height_px: u32,
    dpi: u32,
    description: String,
}

impl RasterFigure {
    /// Wrap encoded image bytes rendered at `dpi`.
    pub fn new(data: Vec<u8>, dpi: u32) -> Result<Self> {
        if dpi == 0 {
            return Err(Error::InvalidArgument("figure dpi must be positive".to_string()));
        }
        let (width_px, height_px) = image::ImageReader::new(Cursor::new(&data))
            .with_guessed_format()?
            .into_dimensions()?;
        Ok(Self {
            data,
            width_px,
            height_px,
            dpi,
            description: "figure".to_string(),
        })
    }

    /// Read an image file rendered at `dpi`.
    pub fn open<P: AsRef<Path>>(path: P, dpi: u32) -> Result<Self> {
        let data = std::fs::read(path)?;
        Self::new(data, dpi)
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn pixel_size(&self) -> (u32, u32) {
        (self.width_px, self.height_px)
    }

    /// The encoded bytes as given.
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
}

impl Figure for RasterFigure {
    fn size_inches(&self) -> (f64, f64) {
        let dpi = f64::from(self.dpi);
        (f64::from(self.width_px) / dpi, f64::from(self.height_px) / dpi)
    }

    /// The stored pixels; a raster cannot gain detail, so `dpi` is ignored.
    /// Non-PNG data is re-encoded.
    fn to_png(&self, _dpi: u32) -> Result<Vec<u8>> {
        if image::guess_format(&self.data)? == image::ImageFormat::Png {
            return Ok(self.data.clone());
        }
        let decoded = image::load_from_memory(&self.data)?;
        let mut png = Cursor::new(Vec::new());
        decoded.write_to(&mut png, image::ImageFormat::Png)?;
        Ok(png.into_inner())
    }

    fn description(&self) -> &str {
        &self.description
    }
}

/// A white PNG of the given pixel size.
#[cfg(test)]
pub(crate) fn solid_png(width: u32, height: u32) -> Vec<u8> {
    encode_solid(width, height, image::ImageFormat::Png)
}

#[cfg(test)]
fn encode_solid(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
    let pixels = image::RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]));
    let mut bytes = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(pixels)
        .write_to(&mut bytes, format)
        .unwrap();
    bytes.into_inner()
}
