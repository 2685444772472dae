//! Metrics for the PDF standard fonts Helvetica and Helvetica-Bold. Every conforming PDF
//! reader ships these, so letters set in them need no font embedding at all. Text is
//! limited to what the WinAnsi encoding can express.

use crate::error::MeasurementError;
use crate::layout::{FontStyle, TextMeasurer};
use crate::units::Pt;

/// Advance widths (1/1000 em) of the printable ASCII range, space through tilde
#[rustfmt::skip]
const HELVETICA: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

#[rustfmt::skip]
const HELVETICA_BOLD: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611,
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556,
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611,
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584,
];

/// Ascender of both weights, in 1/1000 em
pub const ASCENT: f32 = 718.0;

/// Map a character onto its WinAnsi (Windows-1252) code, if it has one
pub fn winansi_code(ch: char) -> Option<u8> {
    match ch {
        ' '..='~' | '\u{A0}'..='\u{FF}' => Some(ch as u32 as u8),
        '€' => Some(0x80),
        '‚' => Some(0x82),
        '„' => Some(0x84),
        '…' => Some(0x85),
        '‘' => Some(0x91),
        '’' => Some(0x92),
        '“' => Some(0x93),
        '”' => Some(0x94),
        '•' => Some(0x95),
        '–' => Some(0x96),
        '—' => Some(0x97),
        '™' => Some(0x99),
        _ => None,
    }
}

/// Advance width of a character in 1/1000 em. Accented Latin-1 letters take the width of
/// their base letter.
fn glyph_width(ch: char, style: FontStyle) -> Option<u16> {
    let ascii = match style {
        FontStyle::Regular => &HELVETICA,
        FontStyle::Bold => &HELVETICA_BOLD,
    };
    let bold = style.is_bold();
    let from_ascii = |base: char| ascii[base as usize - 0x20];

    let width = match ch {
        ' '..='~' => from_ascii(ch),
        '\u{A0}' => from_ascii(' '),
        'À'..='Å' => from_ascii('A'),
        'Ç' => from_ascii('C'),
        'È'..='Ë' => from_ascii('E'),
        'Ì'..='Ï' | 'ì'..='ï' => from_ascii('I'),
        'Ð' => from_ascii('D'),
        'Ñ' => from_ascii('N'),
        'Ò'..='Ö' | 'Ø' => from_ascii('O'),
        'Ù'..='Ü' => from_ascii('U'),
        'Ý' => from_ascii('Y'),
        'à'..='å' => from_ascii('a'),
        'ç' => from_ascii('c'),
        'è'..='ë' => from_ascii('e'),
        'ñ' => from_ascii('n'),
        'ò'..='ö' | 'ø' => from_ascii('o'),
        'ù'..='ü' => from_ascii('u'),
        'ý' | 'ÿ' => from_ascii('y'),
        'Æ' => 1000,
        'æ' => 889,
        'ß' => 611,
        '×' | '÷' | '¬' | '±' => 584,
        '‘' | '’' | '‚' => if bold { 278 } else { 222 },
        '“' | '”' | '„' => if bold { 500 } else { 333 },
        '•' => 350,
        '–' => 556,
        '—' | '…' | '™' => 1000,
        _ if winansi_code(ch).is_some() => 556,
        _ => return None,
    };
    Some(width)
}

/// Measures text set in Helvetica (regular) and Helvetica-Bold (bold)
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct StandardFonts;

impl StandardFonts {
    /// The PDF base font name for a style
    pub fn base_font(style: FontStyle) -> &'static str {
        match style {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
        }
    }

    /// Encode text as WinAnsi bytes for a content stream
    pub fn encode(text: &str) -> Result<Vec<u8>, MeasurementError> {
        text.chars()
            .map(|ch| {
                winansi_code(ch).ok_or_else(|| {
                    MeasurementError::new(text, format!("{ch:?} is not available in Helvetica"))
                })
            })
            .collect()
    }

    pub fn ascent(size: Pt) -> Pt {
        size * (ASCENT / 1000.0)
    }
}

impl TextMeasurer for StandardFonts {
    fn text_width(&self, text: &str, style: FontStyle, size: Pt) -> Result<Pt, MeasurementError> {
        let mut units: u32 = 0;
        for ch in text.chars() {
            let width = glyph_width(ch, style).ok_or_else(|| {
                MeasurementError::new(text, format!("{ch:?} is not available in {}", StandardFonts::base_font(style)))
            })?;
            units += width as u32;
        }
        Ok(size * (units as f32 / 1000.0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn measures_ascii_with_afm_widths() {
        // H=722 e=556 l=222 l=222 o=556
        let width = StandardFonts
            .text_width("Hello", FontStyle::Regular, Pt(10.0))
            .expect("measurable");
        assert!((width.0 - 22.78).abs() < 1e-4);

        let bold = StandardFonts
            .text_width("Hello", FontStyle::Bold, Pt(10.0))
            .expect("measurable");
        assert!(bold > width);
    }

    #[test]
    fn accented_letters_and_typographic_quotes_are_measurable() {
        let plain = StandardFonts
            .text_width("Jose", FontStyle::Regular, Pt(11.0))
            .expect("measurable");
        let accented = StandardFonts
            .text_width("José", FontStyle::Regular, Pt(11.0))
            .expect("measurable");
        assert_eq!(plain, accented);
        assert!(StandardFonts
            .text_width("“Don’t” — ok…", FontStyle::Bold, Pt(11.0))
            .is_ok());
    }

    #[test]
    fn text_outside_winansi_cannot_be_measured() {
        let result = StandardFonts.text_width("こんにちは", FontStyle::Regular, Pt(11.0));
        assert!(result.is_err());
        assert!(StandardFonts::encode("日本").is_err());
    }

    #[test]
    fn encodes_latin1_and_windows_extras() {
        assert_eq!(
            StandardFonts::encode("é€—").expect("encodable"),
            vec![0xE9, 0x80, 0x97]
        );
    }
}
