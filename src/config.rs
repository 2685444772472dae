//! Tunable layout parameters. Every field has a default, so a configuration file only
//! needs to name what it changes:
//!
//! ```
//! use pdf_letter::{LayoutConfig, pagesize::PagePreset, Pt};
//!
//! let config = LayoutConfig::from_toml_str(r#"
//!     page = "letter"
//!     margin = 72.0
//! "#).expect("valid config");
//! assert_eq!(config.page, PagePreset::Letter);
//! assert_eq!(config.margin, Pt(72.0));
//! assert_eq!(config.font_size, Pt(11.0));
//! ```

use crate::layout::Margins;
use crate::pagesize::{PagePreset, PageSize};
use crate::units::Pt;
use crate::LetterError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LayoutConfig {
    /// Paper size used for every page
    pub page: PagePreset,
    /// Uniform margin on all four sides
    pub margin: Pt,
    /// Body font size; headings and names use the same size in bold
    pub font_size: Pt,
    /// Line height as a multiple of the font size
    pub line_height_factor: f32,
    /// Space after the date line, the address blocks, the subject line and the body
    pub block_gap: Pt,
    /// Space between body paragraphs, and after the salutation, closing and signature
    pub paragraph_gap: Pt,
    /// Signature images are scaled down (never up) to this width
    pub signature_max_width: Pt,
    /// [chrono] strftime pattern for the date line
    pub date_format: String,
    pub closing: String,
    /// Addressee used in the salutation when the receiver has no name
    pub salutation_fallback: String,
    /// Printed in place of a signature image that cannot be decoded
    pub signature_placeholder: String,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            page: PagePreset::A4,
            margin: Pt(50.0),
            font_size: Pt(11.0),
            line_height_factor: 1.4,
            block_gap: Pt(20.0),
            paragraph_gap: Pt(10.0),
            signature_max_width: Pt(150.0),
            date_format: "%-d %B %Y".to_string(),
            closing: "Sincerely,".to_string(),
            salutation_fallback: "Sir/Madam".to_string(),
            signature_placeholder: "(Signature on file)".to_string(),
        }
    }
}

impl LayoutConfig {
    /// Parse a configuration from TOML, filling unspecified fields with defaults
    pub fn from_toml_str(source: &str) -> Result<LayoutConfig, LetterError> {
        let config: LayoutConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn page_size(&self) -> PageSize {
        self.page.size()
    }

    pub fn margins(&self) -> Margins {
        Margins::all(self.margin)
    }

    pub fn line_height(&self) -> Pt {
        self.font_size * self.line_height_factor
    }

    /// Width of the text column between the left and right margins
    pub fn content_width(&self) -> Pt {
        self.page_size().0 - self.margin * 2.0
    }

    /// Height available for content between the top and bottom margins
    pub fn drawable_height(&self) -> Pt {
        self.page_size().1 - self.margin * 2.0
    }

    pub fn validate(&self) -> Result<(), LetterError> {
        let (width, height) = self.page_size();
        if self.font_size <= Pt(0.0) {
            return Err(LetterError::Config(format!(
                "font size must be positive, got {}",
                self.font_size
            )));
        }
        if self.line_height_factor < 1.0 {
            return Err(LetterError::Config(format!(
                "line height factor must be at least 1.0, got {}",
                self.line_height_factor
            )));
        }
        if self.margin < Pt(0.0) || self.margin * 2.0 >= width.min(height) {
            return Err(LetterError::Config(format!(
                "margin of {} leaves no room on a {width} x {height} page",
                self.margin
            )));
        }
        if self.signature_max_width <= Pt(0.0) {
            return Err(LetterError::Config(
                "signature width must be positive".to_string(),
            ));
        }
        if self.block_gap < Pt(0.0) || self.paragraph_gap < Pt(0.0) {
            return Err(LetterError::Config("gaps cannot be negative".to_string()));
        }
        Ok(())
    }
}
