use crate::error::MeasurementError;
use crate::units::Pt;

/// The two weights of the single font family a letter is set in
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontStyle {
    Regular,
    Bold,
}

impl FontStyle {
    pub fn bold(bold: bool) -> FontStyle {
        if bold {
            FontStyle::Bold
        } else {
            FontStyle::Regular
        }
    }

    pub fn is_bold(self) -> bool {
        self == FontStyle::Bold
    }
}

/// Reports how wide a run of text is when set in a given style and size. Implementations
/// must be pure: the same input always measures the same.
pub trait TextMeasurer {
    fn text_width(&self, text: &str, style: FontStyle, size: Pt) -> Result<Pt, MeasurementError>;
}

impl<M: TextMeasurer + ?Sized> TextMeasurer for &M {
    fn text_width(&self, text: &str, style: FontStyle, size: Pt) -> Result<Pt, MeasurementError> {
        (**self).text_width(text, style, size)
    }
}
