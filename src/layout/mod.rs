//! Turning a [LetterContent](crate::LetterContent) into positioned, paginated content.
//!
//! The pipeline is:
//!
//! 1. [letter_blocks] splits the letter into semantic [Block]s in their canonical order,
//!    normalising addresses with [format_address] and splitting the body into paragraphs.
//! 2. [BlockLayoutEngine] walks the blocks top to bottom, wrapping text with [wrap_line],
//!    sizing the signature with [scale_image], and starting new pages as the
//!    [LayoutCursor] reaches the bottom margin.
//! 3. The result is a [DocumentModel](crate::DocumentModel), ready for a
//!    [PageRenderer](crate::render::PageRenderer).
//!
//! Nothing in here knows about PDF. Text widths come from a [TextMeasurer], so layout
//! can be tested with any metrics at all.
//!
//! # Example
//!
//! ```
//! use pdf_letter::layout::{layout_letter, FontStyle, TextMeasurer};
//! use pdf_letter::{LayoutConfig, LetterContent, MeasurementError, Pt};
//! use chrono::NaiveDate;
//!
//! struct Fixed;
//! impl TextMeasurer for Fixed {
//!     fn text_width(&self, text: &str, _: FontStyle, size: Pt) -> Result<Pt, MeasurementError> {
//!         Ok(size * 0.5 * text.chars().count() as f32)
//!     }
//! }
//!
//! let letter = LetterContent {
//!     id: "1".into(),
//!     sender_name: "Ada Lovelace".into(),
//!     sender_address: "12 Main St, Springfield".into(),
//!     receiver_name: "Charles Babbage".into(),
//!     receiver_address: "1 Dorset St\nLondon".into(),
//!     subject: None,
//!     body_text: "Thank you for the engine plans.".into(),
//!     signature: None,
//!     render_date: NaiveDate::from_ymd_opt(1843, 7, 1).unwrap(),
//! };
//!
//! let model = layout_letter(&letter, &LayoutConfig::default(), &Fixed).expect("fits");
//! assert_eq!(model.page_count(), 1);
//! ```

mod address;
mod block;
mod engine;
mod margins;
mod measure;
mod scale;
mod wrap;

pub use address::*;
pub use block::*;
pub use engine::*;
pub use margins::*;
pub use measure::*;
pub use scale::*;
pub use wrap::*;
