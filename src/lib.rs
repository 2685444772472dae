//! Lay out physical letters (sender and receiver addresses, a dated body, a closing and a
//! hand-drawn signature) onto paginated pages and render them to PDF.
//!
//! ```no_run
//! use pdf_letter::{render_letter, LayoutConfig, LetterContent, LetterFonts};
//!
//! let json = std::fs::read_to_string("letter.json").expect("letter exists");
//! let letter: LetterContent = serde_json::from_str(&json).expect("valid letter");
//! let rendered = render_letter(&letter, &LayoutConfig::default(), &LetterFonts::default())
//!     .expect("letter renders");
//! std::fs::write(&rendered.filename, &rendered.bytes).expect("can write pdf");
//! ```

use base64::Engine;

mod config;
pub use config::*;

mod document;
pub use document::*;

mod error;
pub use error::*;

#[cfg(feature = "fetch")]
mod fetch;
#[cfg(feature = "fetch")]
pub use fetch::*;

mod font;
pub use font::*;

mod image;

mod info;
pub use info::*;

/// Splitting letters into blocks and placing them on pages
pub mod layout;
pub use layout::layout_letter;

mod letter;
pub use letter::*;

mod page;
pub use page::*;

/// Paper sizes
pub mod pagesize;

mod rect;
pub use rect::*;

pub(crate) mod refs;

/// Turning laid out pages into bytes
pub mod render;
use render::{PageRenderer, PdfRenderer};

mod standard_fonts;
pub use standard_fonts::StandardFonts;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality, for custom [render::DrawingBackend]s built on it
pub use pdf_writer;

/// A finished letter and the file name it should be saved or served under
#[derive(Clone, PartialEq)]
pub struct RenderedLetter {
    pub bytes: Vec<u8>,
    pub filename: String,
}

impl std::fmt::Debug for RenderedLetter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderedLetter")
            .field("bytes", &format_args!("[{} bytes]", self.bytes.len()))
            .field("filename", &self.filename)
            .finish()
    }
}

impl RenderedLetter {
    /// The PDF as standard base64, for transports that cannot carry binary
    pub fn to_base64(&self) -> String {
        base64::engine::general_purpose::STANDARD.encode(&self.bytes)
    }
}

/// Lay out and render a letter to PDF, measuring and drawing with the same `fonts`.
/// Either the whole letter is produced or an error is returned.
pub fn render_letter(
    content: &LetterContent,
    config: &LayoutConfig,
    fonts: &LetterFonts,
) -> Result<RenderedLetter, LetterError> {
    let document = layout_letter(content, config, fonts)?;
    let bytes = PdfRenderer::new(fonts, config.font_size)
        .with_info(Info::for_letter(content))
        .render(&document)?;

    let filename = content.suggested_filename();
    log::info!(
        "rendered {filename}: {} page(s), {} element(s), {} bytes",
        document.page_count(),
        document.element_count(),
        bytes.len()
    );

    Ok(RenderedLetter { bytes, filename })
}
