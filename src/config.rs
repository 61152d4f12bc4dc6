//! Builder settings, loadable from YAML.
//!
//! Every field has a default, so a settings file only needs the values it
//! changes:
//!
//! ```yaml
//! style:
//!   language: de-DE
//!   font_name: Arial
//! template: widescreen
//! figure_dpi: 200
//! renderer:
//!   program: /opt/libreoffice/program/soffice
//! ```
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::common::{Error, Result};
use crate::deck::TemplateKind;
use crate::style::StyleDefaults;

/// Resolution figures are rasterized at unless configured otherwise.
pub const DEFAULT_FIGURE_DPI: u32 = 150;

/// Settings for [`PptxCreator`](crate::creator::PptxCreator).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Defaults the style sheet factories start from
    pub style: StyleDefaults,
    /// Slide format of new presentations
    pub template: TemplateKind,
    /// Resolution used when rasterizing figures
    pub figure_dpi: u32,
    pub renderer: RendererSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            style: StyleDefaults::default(),
            template: TemplateKind::default(),
            figure_dpi: DEFAULT_FIGURE_DPI,
            renderer: RendererSettings::default(),
        }
    }
}

/// External renderer used for PDF and PNG export.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RendererSettings {
    /// LibreOffice executable; searched for when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub program: Option<PathBuf>,
}

impl Settings {
    /// Parse settings from a YAML document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let settings: Self = serde_saphyr::from_str(yaml)
            .map_err(|e| Error::Config(format!("Failed to parse settings: {}", e)))?;
        settings.validate()?;
        Ok(settings)
    }

    /// Read settings from a YAML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let yaml = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read '{}': {}", path.display(), e)))?;
        Self::from_yaml_str(&yaml)
    }

    pub fn to_yaml_string(&self) -> Result<String> {
        serde_saphyr::to_string(self)
            .map_err(|e| Error::Config(format!("Failed to serialize settings: {}", e)))
    }

    fn validate(&self) -> Result<()> {
        if self.figure_dpi == 0 {
            return Err(Error::Config("figure_dpi must be positive".to_string()));
        }
        if self.style.font_name.trim().is_empty() {
            return Err(Error::Config("style.font_name must not be empty".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::deck::LanguageId;

    #[test]
    fn test_empty_document_gives_defaults() {
        let settings = Settings::from_yaml_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.style.font_name, "Roboto");
        assert_eq!(settings.figure_dpi, DEFAULT_FIGURE_DPI);
    }

    #[test]
    fn test_partial_document() {
        let yaml = "style:\n  language: de-DE\ntemplate: widescreen\nrenderer:\n  program: /usr/bin/soffice\n";
        let settings = Settings::from_yaml_str(yaml).unwrap();
        assert_eq!(settings.style.language, LanguageId::GERMAN);
        assert_eq!(settings.style.font_name, "Roboto");
        assert_eq!(settings.template, TemplateKind::Widescreen);
        assert_eq!(settings.renderer.program, Some(PathBuf::from("/usr/bin/soffice")));
    }

    #[test]
    fn test_invalid_values_are_config_errors() {
        assert!(matches!(
            Settings::from_yaml_str("figure_dpi: 0"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Settings::from_yaml_str("style:\n  language: 'not a tag'"),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            Settings::from_yaml_str("template: [1, 2]"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_yaml_round_trip() {
        let mut settings = Settings::default();
        settings.template = TemplateKind::Widescreen;
        settings.figure_dpi = 300;
        let yaml = settings.to_yaml_string().unwrap();
        assert_eq!(Settings::from_yaml_str(&yaml).unwrap(), settings);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("settings.yaml");
        std::fs::write(&path, "figure_dpi: 96\n").unwrap();
        assert_eq!(Settings::load(&path).unwrap().figure_dpi, 96);
        assert!(matches!(
            Settings::load(dir.path().join("missing.yaml")),
            Err(Error::Config(_))
        ));
    }
}
