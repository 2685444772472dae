//! Serializing a laid out [DocumentModel] into a file format.
//!
//! Layout never calls a drawing library directly. A renderer only has to provide the four
//! operations of [DrawingBackend]; [render_with] replays the model onto it page by page.
//! [PdfRenderer] is the implementation shipped with the crate.

mod pdf;

pub use self::pdf::*;

use crate::document::DocumentModel;
use crate::page::PositionedElement;
use crate::units::Pt;
use crate::LetterError;

/// The drawing capabilities a target format has to offer. Coordinates follow
/// [PositionedElement]: points from the bottom-left corner, `y` at the element's top edge.
pub trait DrawingBackend {
    fn new_page(&mut self, width: Pt, height: Pt) -> Result<(), LetterError>;

    fn draw_text(&mut self, x: Pt, y: Pt, text: &str, bold: bool) -> Result<(), LetterError>;

    fn draw_image(
        &mut self,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        bytes: &[u8],
    ) -> Result<(), LetterError>;

    /// Finish the document and hand back its bytes
    fn save(self) -> Result<Vec<u8>, LetterError>;
}

/// Anything that can turn a [DocumentModel] into a byte buffer
pub trait PageRenderer {
    fn render(&self, document: &DocumentModel) -> Result<Vec<u8>, LetterError>;
}

/// Replay every page and element of `document`, in order, onto `backend`
pub fn render_with<B: DrawingBackend>(
    document: &DocumentModel,
    mut backend: B,
) -> Result<Vec<u8>, LetterError> {
    for page in &document.pages {
        backend.new_page(page.width, page.height)?;
        for element in &page.elements {
            match element {
                PositionedElement::Text {
                    x,
                    y,
                    content,
                    bold,
                } => backend.draw_text(*x, *y, content, *bold)?,
                PositionedElement::Image {
                    x,
                    y,
                    width,
                    height,
                    bytes,
                } => backend.draw_image(*x, *y, *width, *height, bytes)?,
            }
        }
    }
    backend.save()
}
