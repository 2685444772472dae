use crate::error::{ImageDecodeError, LetterError};
use base64::Engine;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A snapshot of everything that ends up on the printed letter. The layout engine never
/// mutates it and never consults the wall clock; the date printed is `render_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LetterContent {
    pub id: String,
    #[serde(default)]
    pub sender_name: String,
    /// Free-form address, lines separated by newlines and/or `", "`
    #[serde(default)]
    pub sender_address: String,
    #[serde(default)]
    pub receiver_name: String,
    #[serde(default)]
    pub receiver_address: String,
    #[serde(default)]
    pub subject: Option<String>,
    /// Paragraphs separated by blank lines; single newlines are hard line breaks
    #[serde(default)]
    pub body_text: String,
    #[serde(skip)]
    pub signature: Option<SignatureImage>,
    pub render_date: NaiveDate,
}

/// A hand-drawn signature as encoded image bytes (PNG, JPEG, ...). The intrinsic size
/// is optional; when it is missing it is read from the image itself.
#[derive(Clone, PartialEq)]
pub struct SignatureImage {
    pub bytes: Vec<u8>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl std::fmt::Debug for SignatureImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureImage")
            .field("bytes", &format_args!("[{} bytes]", self.bytes.len()))
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

impl SignatureImage {
    pub fn new(bytes: Vec<u8>) -> SignatureImage {
        SignatureImage {
            bytes,
            width: None,
            height: None,
        }
    }

    pub fn with_dimensions(bytes: Vec<u8>, width: u32, height: u32) -> SignatureImage {
        SignatureImage {
            bytes,
            width: Some(width),
            height: Some(height),
        }
    }

    /// A signature that was asked for but could not be obtained. It is laid out as the
    /// configured placeholder text, never as an image.
    pub fn unavailable() -> SignatureImage {
        SignatureImage::new(Vec::new())
    }

    pub fn is_unavailable(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Decode a `data:image/png;base64,...` URL, which is what signature pads export
    pub fn from_data_url(url: &str) -> Result<SignatureImage, ImageDecodeError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| ImageDecodeError::DataUrl("missing data: scheme".to_string()))?;
        let (header, payload) = rest
            .split_once(',')
            .ok_or_else(|| ImageDecodeError::DataUrl("missing ',' separator".to_string()))?;
        if !header.starts_with("image/") {
            return Err(ImageDecodeError::DataUrl(format!(
                "unsupported media type {header:?}"
            )));
        }
        if !header.ends_with(";base64") {
            return Err(ImageDecodeError::DataUrl(
                "only base64 encoded data URLs are supported".to_string(),
            ));
        }

        let bytes = base64::engine::general_purpose::STANDARD.decode(payload.trim())?;
        Ok(SignatureImage::new(bytes))
    }

    /// The intrinsic pixel size, taken from the declared dimensions if both are known and
    /// otherwise from the image header. Fails if the bytes are not a readable image.
    pub fn intrinsic_size(&self) -> Result<(u32, u32), ImageDecodeError> {
        if let (Some(w), Some(h)) = (self.width, self.height) {
            // still make sure the payload is an image we can embed later
            image::guess_format(&self.bytes)?;
            return Ok((w, h));
        }
        let reader = image::io::Reader::new(std::io::Cursor::new(self.bytes.as_slice()))
            .with_guessed_format()
            .map_err(image::ImageError::IoError)?;
        Ok(reader.into_dimensions()?)
    }

    /// Fully decode the image, which is the only way to be certain the renderer can embed it
    pub fn decode(&self) -> Result<image::DynamicImage, ImageDecodeError> {
        Ok(image::load_from_memory(&self.bytes)?)
    }
}

impl LetterContent {
    /// Check the fields that rendering cannot do without
    pub fn validate(&self) -> Result<(), LetterError> {
        let id = self.id.trim();
        if id.is_empty() {
            return Err(LetterError::Validation("letter id is required".to_string()));
        }
        if id.contains(['/', '\\']) || id.contains("..") {
            return Err(LetterError::Validation(format!(
                "letter id {id:?} cannot be used in a file name"
            )));
        }
        Ok(())
    }

    /// The name the rendered file should be offered under
    pub fn suggested_filename(&self) -> String {
        format!("letter_{}.pdf", self.id.trim())
    }
}
