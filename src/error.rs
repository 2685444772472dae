use crate::units::Pt;
use thiserror::Error;

/// All fatal errors that producing a letter can generate. No partially laid out or
/// partially rendered document is ever returned alongside one of these.
#[derive(Error, Debug)]
pub enum LetterError {
    #[error("invalid letter: {0}")]
    /// The [LetterContent](crate::LetterContent) is missing or has a malformed required field
    Validation(String),

    #[error(transparent)]
    /// Text could not be measured, so no reliable layout is possible
    Measurement(#[from] MeasurementError),

    #[error("element of height {element_height}pt can never fit in a drawable height of {drawable_height}pt")]
    /// A single element that cannot be split is taller than an empty page
    PaginationOverflow {
        element_height: Pt,
        drawable_height: Pt,
    },

    #[error("invalid layout configuration: {0}")]
    /// The [LayoutConfig](crate::LayoutConfig) describes an impossible page
    Config(String),

    #[error(transparent)]
    /// [toml] failed to parse a configuration file
    ConfigParse(#[from] toml::de::Error),

    #[error("renderer used out of order: {0}")]
    /// A [DrawingBackend](crate::render::DrawingBackend) was asked to draw before a page existed
    Render(String),

    #[error(transparent)]
    /// [image] failed to decode an image while writing the PDF
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FontParsing(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),
}

/// A piece of text that a [TextMeasurer](crate::layout::TextMeasurer) cannot measure
#[derive(Error, Debug, Clone, PartialEq)]
#[error("cannot measure {text:?}: {reason}")]
pub struct MeasurementError {
    pub text: String,
    pub reason: String,
}

impl MeasurementError {
    pub fn new<S: ToString, R: ToString>(text: S, reason: R) -> MeasurementError {
        MeasurementError {
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// The signature image could not be obtained or decoded. This is always recoverable: the
/// layout engine substitutes a text placeholder and carries on.
#[derive(Error, Debug)]
pub enum ImageDecodeError {
    #[error(transparent)]
    /// [image] could not read the image data
    Image(#[from] image::ImageError),

    #[error("malformed data URL: {0}")]
    /// A `data:` URL was not a base64 encoded image
    DataUrl(String),

    #[error(transparent)]
    /// The base64 payload of a data URL was corrupt
    Base64(#[from] base64::DecodeError),

    #[error("unable to fetch signature: {0}")]
    /// The signature could not be downloaded
    Fetch(String),
}
