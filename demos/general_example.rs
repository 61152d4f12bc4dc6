use std::env;
use std::fmt::Display;
use std::io::Cursor;
use std::path::PathBuf;

use clap::Parser;
use pptx_tools::deck::{LanguageId, Underline};
use pptx_tools::style::{FontStyle, sheet};
use pptx_tools::{Error, Extent, PptxCreator, Position, RGBColor, RasterFigure, SaveOptions};

/// Figure resolution of the generated plot.
const PLOT_DPI: u32 = 100;

#[derive(Parser, Debug)]
#[command(version, about = "Build a small example presentation", long_about = None)]
struct Args {
    /// Directory the presentation is written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also export a PDF and one PNG per slide (needs LibreOffice)
    #[arg(long, default_value_t = false)]
    export: bool,
}

/// A 3.4" x 1.8" sine plot on a white background.
fn sine_plot() -> Result<Vec<u8>, Error> {
    let (width, height) = (34 * PLOT_DPI / 10, 18 * PLOT_DPI / 10);
    let mut pixels = image::RgbImage::from_pixel(width, height, image::Rgb([255, 255, 255]));
    let middle = f64::from(height) / 2.0;
    for x in 0..width {
        let phase = f64::from(x) / f64::from(width) * std::f64::consts::TAU * 2.0;
        let y = (middle - phase.sin() * middle * 0.8).round() as u32;
        for dy in 0..3 {
            let y = (y + dy).min(height - 1);
            pixels.put_pixel(x, y, image::Rgb([31, 119, 180]));
        }
        pixels.put_pixel(x, height / 2, image::Rgb([160, 160, 160]));
    }
    let mut png = Cursor::new(Vec::new());
    image::DynamicImage::ImageRgb8(pixels).write_to(&mut png, image::ImageFormat::Png)?;
    Ok(png.into_inner())
}

fn main() -> Result<(), Error> {
    if env::var("RUST_LOG").is_err() {
        unsafe {
            env::set_var("RUST_LOG", "pptx_tools=info");
        }
    }
    env_logger::init();

    let args = Args::parse();

    let mut pp = PptxCreator::default();
    let defaults = pp.settings().style.clone();

    let title_slide = pp.add_title_slide("General example 01 - title slide");
    if let Some(title) = pp.slide_mut(title_slide)?.title_shape_mut() {
        sheet::font_title(&defaults).write_shape(title)?;
    }

    let slide2 = pp.add_slide("page2");
    let slide3 = pp.add_slide("page3");
    let slide4 = pp.add_slide("page4");
    pp.add_content_slide(None, true);
    println!("✓ Added {} slides", pp.presentation().slide_count());

    let text = "This text box uses the default font.\n\
                Das ist der zweite Absatz ...\n\
                ... and this is the third one.";
    let text_box = pp.add_text_box(
        title_slide,
        text,
        Position::new(0.02, 0.24),
        Some(&sheet::font_default(&defaults).size(16.0)),
    )?;

    let mut emphasis = FontStyle::new();
    emphasis.set(&FontStyle::new().size(22.0).bold(true).language(LanguageId::GERMAN));
    let decorated = FontStyle::new()
        .size(18.0)
        .bold(false)
        .italic(true)
        .name("Vivaldi")
        .language(LanguageId::ENGLISH_UK)
        .underline(Underline::WavyDouble)
        .color(RGBColor::new(255, 0, 0));
    if let Some(frame) = pp.shape_mut(text_box)?.text_frame_mut() {
        emphasis.write_paragraph(&mut frame.paragraphs_mut()[1])?;
        decorated.write_paragraph(&mut frame.paragraphs_mut()[2])?;
    }
    println!("✓ Styled text box");

    let rows: Vec<Vec<&dyn Display>> = vec![
        vec![&1, &2],
        vec![&4, &slide2, &6],
        vec![&"", &8, &9],
    ];
    pp.add_table(slide2, rows, Position::new(0.02, 0.4))?;
    println!("✓ Added table");

    let figure = RasterFigure::new(sine_plot()?, PLOT_DPI)?.with_description("sine plot");
    pp.add_figure(slide3, &figure, Position::new(0.3, 0.4), 1.0)?;
    for (index, zoom) in [0.4, 0.5, 0.6].into_iter().enumerate() {
        let position = Position::new(0.05 + 0.3 * index as f64, 0.3).with_height(Extent::KeepAspect);
        pp.add_figure(slide4, &figure, position, zoom)?;
    }
    println!("✓ Added figures");

    std::fs::create_dir_all(&args.out_dir)?;
    let path = args.out_dir.join("general_example_01.pptx");
    let report = pp.save_with(
        &path,
        SaveOptions {
            overwrite: true,
            create_pdf: args.export,
            create_pngs: args.export,
        },
    )?;

    println!("\nSuccess! Generated {}", report.pptx.display());
    if let Some(pdf) = &report.pdf {
        println!("✓ PDF: {}", pdf.display());
    }
    if !report.pngs.is_empty() {
        println!("✓ {} slide images", report.pngs.len());
    }
    for (format, error) in &report.failures {
        println!("✗ {} export skipped: {}", format.extension(), error);
    }
    Ok(())
}
