//! PDF and PNG export through an external office suite.
//!
//! Nothing here renders slides itself. The presentation is written to a
//! staging directory and handed to a [`Renderer`]; by default that is
//! LibreOffice running headless. Calls block until the renderer exits and have
//! no timeout.
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use log::{debug, info};

use crate::common::{Error, Result};
use crate::config::RendererSettings;
use crate::deck::{PackageWriter, Presentation};

/// Environment variable naming the LibreOffice executable.
pub const SOFFICE_ENV: &str = "PPTX_TOOLS_SOFFICE";

const SOFFICE_CANDIDATES: &[&str] = &["soffice", "libreoffice"];

/// Output formats of a [`Renderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Pdf,
    /// Image of the first slide of the input
    Png,
}

impl ExportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Pdf => "pdf",
            Self::Png => "png",
        }
    }
}

/// Converts a .pptx file into another format.
pub trait Renderer {
    /// Convert `input` into `format`, writing into `out_dir`, and return the
    /// path of the produced file.
    fn convert(&self, input: &Path, format: ExportFormat, out_dir: &Path) -> Result<PathBuf>;
}

/// LibreOffice in headless mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LibreOffice {
    program: PathBuf,
}

impl LibreOffice {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Find LibreOffice: the configured program, then `PPTX_TOOLS_SOFFICE`,
    /// then the first of `soffice` / `libreoffice` that runs.
    pub fn locate(settings: &RendererSettings) -> Result<Self> {
        if let Some(ref program) = settings.program {
            return Ok(Self::new(program));
        }
        if let Ok(program) = env::var(SOFFICE_ENV) {
            if !program.is_empty() {
                return Ok(Self::new(program));
            }
        }
        find_program(SOFFICE_CANDIDATES)
            .map(Self::new)
            .ok_or_else(|| {
                Error::RendererUnavailable(format!(
                    "LibreOffice not found (tried {}); install it or set {}",
                    SOFFICE_CANDIDATES.join(", "),
                    SOFFICE_ENV
                ))
            })
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

/// Returns the first program from `candidates` that executes successfully.
fn find_program(candidates: &[&str]) -> Option<PathBuf> {
    candidates
        .iter()
        .copied()
        .find(|name| {
            Command::new(name)
                .arg("--version")
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .status()
                .is_ok_and(|status| status.success())
        })
        .map(PathBuf::from)
}

impl Renderer for LibreOffice {
    fn convert(&self, input: &Path, format: ExportFormat, out_dir: &Path) -> Result<PathBuf> {
        debug!(
            "Running {} --convert-to {} on {}",
            self.program.display(),
            format.extension(),
            input.display()
        );
        let output = Command::new(&self.program)
            .arg("--headless")
            .arg("--convert-to")
            .arg(format.extension())
            .arg("--outdir")
            .arg(out_dir)
            .arg(input)
            .output()
            .map_err(|e| {
                Error::RendererUnavailable(format!("cannot run {}: {}", self.program.display(), e))
            })?;

        if !output.status.success() {
            return Err(Error::Export(format!(
                "{} exited with {}: {}",
                self.program.display(),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        let stem = input
            .file_stem()
            .ok_or_else(|| Error::Export(format!("'{}' has no file name", input.display())))?;
        let produced = out_dir.join(stem).with_extension(format.extension());
        if !produced.is_file() {
            return Err(Error::Export(format!(
                "renderer did not produce '{}'",
                produced.display()
            )));
        }
        Ok(produced)
    }
}

/// Fail with [`Error::AlreadyExists`] when `path` exists and may not be replaced.
pub(crate) fn ensure_writable(path: &Path, overwrite: bool) -> Result<()> {
    if !overwrite && path.exists() {
        return Err(Error::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    Ok(())
}

/// Render `presentation` into a PDF at `path`.
pub fn export_pdf(
    renderer: &dyn Renderer,
    presentation: &Presentation,
    path: &Path,
    overwrite: bool,
) -> Result<()> {
    ensure_writable(path, overwrite)?;
    let staging = tempfile::tempdir()?;
    let input = staging.path().join("presentation.pptx");
    PackageWriter::write(&input, presentation)?;

    let produced = renderer.convert(&input, ExportFormat::Pdf, staging.path())?;
    fs::copy(&produced, path)?;
    info!("Exported PDF to {}", path.display());
    Ok(())
}

/// Render each slide to `folder/slide_001.png`, `folder/slide_002.png`, …
///
/// An existing folder is replaced when `overwrite_folder` is set, but only
/// once every slide has been rendered; a failing renderer leaves it as it was.
pub fn export_pngs(
    renderer: &dyn Renderer,
    presentation: &Presentation,
    folder: &Path,
    overwrite_folder: bool,
) -> Result<Vec<PathBuf>> {
    ensure_writable(folder, overwrite_folder)?;

    let staging = tempfile::tempdir()?;
    let mut rendered = Vec::with_capacity(presentation.slide_count());
    for (index, slide) in presentation.slides().iter().enumerate() {
        let name = format!("slide_{:03}", index + 1);
        // Office suites render only the first slide to an image.
        let single = presentation
            .single_slide(slide.id())
            .ok_or_else(|| Error::NotFound(format!("slide {}", slide.id())))?;
        let input = staging.path().join(&name).with_extension("pptx");
        PackageWriter::write(&input, &single)?;

        let produced = renderer.convert(&input, ExportFormat::Png, staging.path())?;
        rendered.push((produced, name));
    }

    if folder.exists() {
        fs::remove_dir_all(folder)?;
    }
    fs::create_dir_all(folder)?;
    let mut images = Vec::with_capacity(rendered.len());
    for (produced, name) in rendered {
        let target = folder.join(name).with_extension("png");
        fs::copy(&produced, &target)?;
        images.push(target);
    }
    info!("Exported {} slide images to {}", images.len(), folder.display());
    Ok(images)
}

#[cfg(test)]
pub(crate) mod testing {
    use std::cell::RefCell;

    use super::*;

    /// Renderer that copies its input, recording every call.
    #[derive(Default)]
    pub struct CopyRenderer {
        pub calls: RefCell<Vec<(PathBuf, ExportFormat)>>,
    }

    impl Renderer for CopyRenderer {
        fn convert(&self, input: &Path, format: ExportFormat, out_dir: &Path) -> Result<PathBuf> {
            self.calls.borrow_mut().push((input.to_path_buf(), format));
            let stem = input.file_stem().unwrap_or_default();
            let output = out_dir.join(stem).with_extension(format.extension());
            fs::copy(input, &output)?;
            Ok(output)
        }
    }

    /// Renderer that is never installed.
    pub struct MissingRenderer;

    impl Renderer for MissingRenderer {
        fn convert(&self, _: &Path, _: ExportFormat, _: &Path) -> Result<PathBuf> {
            Err(Error::RendererUnavailable("no renderer in tests".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{CopyRenderer, MissingRenderer};
    use super::*;
    use crate::deck::Layout;

    fn deck(slides: usize) -> Presentation {
        let mut presentation = Presentation::default();
        for index in 0..slides {
            presentation
                .add_slide(Layout::TitleOnly)
                .set_title(&format!("page {}", index + 1));
        }
        presentation
    }

    #[test]
    fn test_configured_program_wins() {
        let settings = RendererSettings {
            program: Some(PathBuf::from("/opt/office/soffice")),
        };
        let renderer = LibreOffice::locate(&settings).unwrap();
        assert_eq!(renderer.program(), Path::new("/opt/office/soffice"));
    }

    #[test]
    fn test_missing_program_is_renderer_unavailable() {
        let renderer = LibreOffice::new("/nonexistent/pptx-tools-soffice");
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.pptx");
        let err = renderer.convert(&input, ExportFormat::Pdf, dir.path()).unwrap_err();
        assert!(matches!(err, Error::RendererUnavailable(_)));
        assert!(err.is_renderer_error());
    }

    #[test]
    fn test_export_pdf_respects_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("deck.pdf");
        let renderer = CopyRenderer::default();

        export_pdf(&renderer, &deck(2), &path, false).unwrap();
        assert!(path.is_file());
        assert!(matches!(
            export_pdf(&renderer, &deck(2), &path, false),
            Err(Error::AlreadyExists { .. })
        ));
        export_pdf(&renderer, &deck(2), &path, true).unwrap();
        assert_eq!(renderer.calls.borrow().len(), 2);
    }

    #[test]
    fn test_export_pngs_one_file_per_slide() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("pngs");
        let renderer = CopyRenderer::default();

        let images = export_pngs(&renderer, &deck(3), &folder, false).unwrap();
        let names: Vec<_> = images
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["slide_001.png", "slide_002.png", "slide_003.png"]);
        assert!(renderer
            .calls
            .borrow()
            .iter()
            .all(|(_, format)| *format == ExportFormat::Png));
    }

    #[test]
    fn test_export_pngs_clears_folder_only_when_allowed() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("pngs");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("stale.png"), b"old").unwrap();

        let renderer = CopyRenderer::default();
        assert!(matches!(
            export_pngs(&renderer, &deck(1), &folder, false),
            Err(Error::AlreadyExists { .. })
        ));
        assert!(folder.join("stale.png").exists());

        export_pngs(&renderer, &deck(1), &folder, true).unwrap();
        assert!(!folder.join("stale.png").exists());
        assert!(folder.join("slide_001.png").exists());
    }

    #[test]
    fn test_failed_render_keeps_previous_images() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("pngs");
        fs::create_dir_all(&folder).unwrap();
        fs::write(folder.join("slide_001.png"), b"previous").unwrap();

        let err = export_pngs(&MissingRenderer, &deck(2), &folder, true).unwrap_err();
        assert!(err.is_renderer_error());
        assert_eq!(fs::read(folder.join("slide_001.png")).unwrap(), b"previous");
    }

    #[test]
    fn test_renderer_failure_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let err = export_pdf(&MissingRenderer, &deck(1), &dir.path().join("x.pdf"), false)
            .unwrap_err();
        assert!(err.is_renderer_error());
        assert!(!dir.path().join("x.pdf").exists());
    }
}
