//! Preconfigured styles for a presentation.
//!
//! Each factory returns a fresh, independent object built by layering on top of
//! the previous one: default, then title, then slide title and sub-title.
//! Copy this module into your project and adjust it to create your own house
//! style.
use serde::{Deserialize, Serialize};

use crate::deck::{Alignment, LanguageId};

use super::{FontStyle, ParagraphStyle};

/// Presentation-wide defaults the factories start from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleDefaults {
    /// Proofing language of normal text
    pub language: LanguageId,
    /// Typeface of normal text
    pub font_name: String,
}

impl Default for StyleDefaults {
    fn default() -> Self {
        Self {
            language: LanguageId::ENGLISH_UK,
            font_name: "Roboto".to_string(),
        }
    }
}

/// Font for normal text: default typeface and language at 14 pt.
pub fn font_default(defaults: &StyleDefaults) -> FontStyle {
    FontStyle::new()
        .language(defaults.language.clone())
        .name(defaults.font_name.as_str())
        .size(14.0)
}

/// Font for the presentation title: 32 pt bold.
pub fn font_title(defaults: &StyleDefaults) -> FontStyle {
    font_default(defaults).size(32.0).bold(true)
}

pub fn font_slide_title(defaults: &StyleDefaults) -> FontStyle {
    font_title(defaults).size(28.0)
}

pub fn font_sub_title(defaults: &StyleDefaults) -> FontStyle {
    font_title(defaults).size(18.0)
}

/// Left-aligned paragraphs in the default font.
pub fn paragraph_default(defaults: &StyleDefaults) -> ParagraphStyle {
    ParagraphStyle::new()
        .font(font_default(defaults))
        .alignment(Alignment::Left)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font() {
        let font = font_default(&StyleDefaults::default());
        assert_eq!(font.name.as_deref(), Some("Roboto"));
        assert_eq!(font.language, Some(LanguageId::ENGLISH_UK));
        assert_eq!(font.size, Some(14.0));
        assert_eq!(font.bold, None);
    }

    #[test]
    fn test_title_is_independent_of_later_default_changes() {
        let defaults = StyleDefaults::default();
        let title = font_title(&defaults);

        let mut default = font_default(&defaults);
        default.set(&FontStyle::new().size(10.0).bold(false).name("Arial"));

        assert_eq!(title.size, Some(32.0));
        assert_eq!(title.bold, Some(true));
        assert_eq!(title.name.as_deref(), Some("Roboto"));
        assert_eq!(font_title(&defaults), title);
    }

    #[test]
    fn test_derived_titles() {
        let defaults = StyleDefaults {
            language: LanguageId::GERMAN,
            font_name: "Arial Narrow".to_string(),
        };
        let slide_title = font_slide_title(&defaults);
        assert_eq!((slide_title.size, slide_title.bold), (Some(28.0), Some(true)));
        assert_eq!(slide_title.language, Some(LanguageId::GERMAN));

        let sub_title = font_sub_title(&defaults);
        assert_eq!((sub_title.size, sub_title.bold), (Some(18.0), Some(true)));
        assert_eq!(sub_title.name.as_deref(), Some("Arial Narrow"));
    }

    #[test]
    fn test_paragraph_default() {
        let defaults = StyleDefaults::default();
        let style = paragraph_default(&defaults);
        assert_eq!(style.alignment, Some(Alignment::Left));
        assert_eq!(style.font, font_default(&defaults));
    }
}
