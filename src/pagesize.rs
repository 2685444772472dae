//! Paper sizes that letters can be laid out on.
//!
//! Both sizes are given in portrait orientation as (width, height) in points.
//!
//! # Example
//!
//! ```
//! use pdf_letter::pagesize::{PagePreset, A4};
//!
//! assert_eq!(PagePreset::A4.size(), A4);
//! ```

use crate::units::*;
use serde::{Deserialize, Serialize};

/// Page dimensions as (width, height) in points.
pub type PageSize = (Pt, Pt);

/// US Letter, 8.5 × 11 inches
pub const LETTER: PageSize = (Pt(8.5 * 72.0), Pt(11.0 * 72.0));

/// ISO A4, 210 × 297 millimetres
pub const A4: PageSize = (Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));

/// The page size every page of a letter is laid out on, chosen once per configuration
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PagePreset {
    #[default]
    A4,
    Letter,
}

impl PagePreset {
    pub fn size(self) -> PageSize {
        match self {
            PagePreset::A4 => A4,
            PagePreset::Letter => LETTER,
        }
    }
}

impl std::str::FromStr for PagePreset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "a4" => Ok(PagePreset::A4),
            "letter" | "us-letter" => Ok(PagePreset::Letter),
            other => Err(format!("unknown page size {other:?}, expected \"a4\" or \"letter\"")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_paper_dimensions() {
        assert_eq!(PagePreset::Letter.size(), (Pt(612.0), Pt(792.0)));
        let (w, h) = PagePreset::A4.size();
        assert_eq!(w.0.round(), 595.0);
        assert_eq!(h.0.round(), 842.0);
    }

    #[test]
    fn parses_names() {
        assert_eq!("A4".parse::<PagePreset>(), Ok(PagePreset::A4));
        assert_eq!("letter".parse::<PagePreset>(), Ok(PagePreset::Letter));
        assert!("legal".parse::<PagePreset>().is_err());
    }
}
