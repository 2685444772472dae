use super::block::{letter_blocks, Block};
use super::measure::{FontStyle, TextMeasurer};
use super::scale::scale_image;
use super::wrap::wrap_line;
use crate::config::LayoutConfig;
use crate::document::DocumentModel;
use crate::letter::{LetterContent, SignatureImage};
use crate::page::{Page, PositionedElement};
use crate::units::Pt;
use crate::LetterError;
use log::{debug, warn};

/// The vertical write position on the current page, measured in points from the bottom
/// edge. Each engine owns exactly one cursor for the duration of one layout call.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct LayoutCursor {
    /// 0-based index of the page being filled
    pub page: usize,
    pub y: Pt,
    top: Pt,
    bottom: Pt,
}

impl LayoutCursor {
    pub fn new(top: Pt, bottom: Pt) -> LayoutCursor {
        LayoutCursor {
            page: 0,
            y: top,
            top,
            bottom,
        }
    }

    /// Whether something `height` tall can be placed without crossing the bottom margin
    pub fn fits(&self, height: Pt) -> bool {
        self.y - height >= self.bottom
    }

    pub fn advance(&mut self, height: Pt) {
        self.y -= height;
    }

    pub fn next_page(&mut self) {
        self.page += 1;
        self.y = self.top;
    }

    /// Return to the top of the current page without starting a new one
    pub fn rewind(&mut self) {
        self.y = self.top;
    }

    pub fn drawable_height(&self) -> Pt {
        self.top - self.bottom
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
enum Align {
    Left,
    Right,
}

/// Turns the canonical [Block] sequence into a paginated [DocumentModel].
///
/// Text is placed line by line; whenever the next line would cross the bottom margin the
/// page is finished and the line goes at the top of a fresh page, so body paragraphs
/// flow across pages. Address blocks and the signature are kept together: if they do not
/// fit in what is left of a page, they start on the next one. An address block taller than
/// a whole page falls back to the line-by-line rule; a signature taller than a whole page
/// is a [LetterError::PaginationOverflow].
pub struct BlockLayoutEngine<'a, M: TextMeasurer + ?Sized> {
    config: &'a LayoutConfig,
    measurer: &'a M,
    cursor: LayoutCursor,
    current: Page,
    pages: Vec<Page>,
}

impl<'a, M: TextMeasurer + ?Sized> BlockLayoutEngine<'a, M> {
    pub fn new(config: &'a LayoutConfig, measurer: &'a M) -> BlockLayoutEngine<'a, M> {
        let size = config.page_size();
        let margins = config.margins();
        BlockLayoutEngine {
            config,
            measurer,
            cursor: LayoutCursor::new(size.1 - margins.top, margins.bottom),
            current: Page::new(size),
            pages: Vec::default(),
        }
    }

    /// Lay out all blocks, consuming the engine. Absent blocks are skipped, along with the
    /// gap that would have followed them.
    pub fn layout(mut self, blocks: &[Block]) -> Result<DocumentModel, LetterError> {
        let mut previous: Option<&Block> = None;
        for block in blocks.iter().filter(|block| !block.is_absent()) {
            if let Some(previous) = previous {
                self.cursor.advance(previous.gap_before(block, self.config));
            }
            self.place_block(block)?;
            previous = Some(block);
        }

        self.pages.push(self.current);
        debug!(
            "laid out {} blocks over {} page(s)",
            blocks.len(),
            self.pages.len()
        );
        Ok(DocumentModel { pages: self.pages })
    }

    fn place_block(&mut self, block: &Block) -> Result<(), LetterError> {
        match block {
            Block::DateLine { text } => self.place_line(text.trim().to_string(), false, Align::Right),
            Block::AddressBlock { title, name, lines } => {
                let mut rendered: Vec<(String, bool)> = Vec::new();
                for line in self.wrap(name, FontStyle::Bold)? {
                    rendered.push((line, true));
                }
                for address_line in lines {
                    for line in self.wrap(address_line, FontStyle::Regular)? {
                        rendered.push((line, false));
                    }
                }
                debug!("{title:?} address block: {} line(s)", rendered.len());
                self.place_unit(rendered)
            }
            Block::SubjectLine { text } => self.place_wrapped(text, FontStyle::Bold),
            Block::Salutation { text } | Block::Closing { text } | Block::Signatory { name: text } => {
                self.place_wrapped(text, FontStyle::Regular)
            }
            Block::BodyParagraph { text } => {
                for hard_line in text.split('\n') {
                    self.place_wrapped(hard_line, FontStyle::Regular)?;
                }
                Ok(())
            }
            Block::SignatureImage { image: Some(image) } => self.place_signature(image),
            Block::SignatureImage { image: None } => Ok(()),
        }
    }

    fn wrap(&self, text: &str, style: FontStyle) -> Result<Vec<String>, LetterError> {
        Ok(wrap_line(
            self.measurer,
            text,
            style,
            self.config.font_size,
            self.config.content_width(),
        )?)
    }

    fn place_wrapped(&mut self, text: &str, style: FontStyle) -> Result<(), LetterError> {
        for line in self.wrap(text, style)? {
            self.place_line(line, style.is_bold(), Align::Left)?;
        }
        Ok(())
    }

    /// Place lines that should stay on one page if at all possible
    fn place_unit(&mut self, lines: Vec<(String, bool)>) -> Result<(), LetterError> {
        let height = self.config.line_height() * lines.len() as f32;
        if height <= self.cursor.drawable_height() {
            self.ensure_room(height)?;
        }
        for (line, bold) in lines {
            self.place_line(line, bold, Align::Left)?;
        }
        Ok(())
    }

    fn place_line(&mut self, content: String, bold: bool, align: Align) -> Result<(), LetterError> {
        let line_height = self.config.line_height();
        self.ensure_room(line_height)?;

        let margins = self.config.margins();
        let x = match align {
            Align::Left => margins.left,
            Align::Right => {
                let width = self.measurer.text_width(
                    &content,
                    FontStyle::bold(bold),
                    self.config.font_size,
                )?;
                // never push the line past the left margin
                (self.current.width - margins.right - width).max(margins.left)
            }
        };

        self.current.add_element(PositionedElement::Text {
            x,
            y: self.cursor.y,
            content,
            bold,
        });
        self.cursor.advance(line_height);
        Ok(())
    }

    fn place_signature(&mut self, signature: &SignatureImage) -> Result<(), LetterError> {
        let decoded = match signature.decode() {
            Ok(decoded) => decoded,
            Err(e) => {
                if signature.is_unavailable() {
                    warn!("signature could not be obtained, using a placeholder");
                } else {
                    warn!("signature image could not be decoded, using a placeholder: {e}");
                }
                let placeholder = self.config.signature_placeholder.clone();
                return self.place_wrapped(&placeholder, FontStyle::Regular);
            }
        };

        let intrinsic = signature
            .width
            .zip(signature.height)
            .filter(|&(w, h)| w > 0 && h > 0)
            .unwrap_or((decoded.width(), decoded.height()));
        let (width, height) = scale_image(Some(intrinsic), self.config.signature_max_width);
        self.ensure_room(height)?;

        self.current.add_element(PositionedElement::Image {
            x: self.config.margins().left,
            y: self.cursor.y,
            width,
            height,
            bytes: signature.bytes.clone(),
        });
        self.cursor.advance(height);
        Ok(())
    }

    /// Make sure `height` fits below the cursor, finishing the current page if needed
    fn ensure_room(&mut self, height: Pt) -> Result<(), LetterError> {
        if self.cursor.fits(height) {
            return Ok(());
        }

        if self.current.is_empty() {
            // only gaps have been spent on this page; starting another would not help
            self.cursor.rewind();
        } else {
            self.break_page();
        }

        if self.cursor.fits(height) {
            Ok(())
        } else {
            Err(LetterError::PaginationOverflow {
                element_height: height,
                drawable_height: self.cursor.drawable_height(),
            })
        }
    }

    fn break_page(&mut self) {
        let finished = std::mem::replace(&mut self.current, Page::new(self.config.page_size()));
        debug!(
            "page {} full with {} element(s), starting page {}",
            self.cursor.page + 1,
            finished.elements.len(),
            self.cursor.page + 2
        );
        self.pages.push(finished);
        self.cursor.next_page();
    }
}

/// Lay out a letter into pages without rendering it. The content is validated first;
/// nothing is returned unless the whole letter could be placed.
pub fn layout_letter<M: TextMeasurer + ?Sized>(
    content: &LetterContent,
    config: &LayoutConfig,
    measurer: &M,
) -> Result<DocumentModel, LetterError> {
    content.validate()?;
    config.validate()?;

    let blocks = letter_blocks(content, config)?;
    BlockLayoutEngine::new(config, measurer).layout(&blocks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MeasurementError;
    use crate::layout::{AddressRole, Margins};
    use crate::rect::Rect;

    /// 5pt per character regardless of style or size
    struct Monospace;

    impl TextMeasurer for Monospace {
        fn text_width(&self, text: &str, _: FontStyle, _: Pt) -> Result<Pt, MeasurementError> {
            Ok(Pt(text.chars().count() as f32 * 5.0))
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([0, 0, 0, 255]));
        let mut bytes: Vec<u8> = Vec::new();
        image::DynamicImage::ImageRgba8(image)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageOutputFormat::Png)
            .expect("can encode png");
        bytes
    }

    fn texts_on(model: &DocumentModel, page: usize) -> Vec<&str> {
        model.pages[page]
            .elements
            .iter()
            .filter_map(|element| element.text())
            .collect()
    }

    #[test]
    fn cursor_fits_down_to_the_bottom_margin() {
        let mut cursor = LayoutCursor::new(Pt(100.0), Pt(50.0));
        assert!(cursor.fits(Pt(50.0)));
        assert!(!cursor.fits(Pt(50.5)));
        cursor.advance(Pt(30.0));
        assert_eq!(cursor.y, Pt(70.0));
        cursor.next_page();
        assert_eq!(cursor.page, 1);
        assert_eq!(cursor.y, Pt(100.0));
    }

    #[test]
    fn date_is_right_aligned() {
        let config = LayoutConfig::default();
        let blocks = vec![Block::DateLine {
            text: "18 October 2026".to_string(),
        }];
        let model = BlockLayoutEngine::new(&config, &Monospace)
            .layout(&blocks)
            .expect("layout");
        let element = &model.pages[0].elements[0];
        let page_width = config.page_size().0;
        let expected = page_width - config.margin - Pt(15.0 * 5.0);
        assert!((element.x().0 - expected.0).abs() < 1e-3);
        assert_eq!(element.y(), config.page_size().1 - config.margin);
    }

    #[test]
    fn tall_address_blocks_move_to_the_next_page_whole() {
        let config = LayoutConfig::default();
        let line_height = config.line_height();
        let drawable = config.drawable_height();
        // leave room for only two more lines on the first page
        let filler = ((drawable / line_height).floor() as usize) - 2;
        let mut blocks: Vec<Block> = (0..filler)
            .map(|i| Block::Closing {
                text: format!("line {i}"),
            })
            .collect();
        // closings are followed by a paragraph gap, so keep gaps out of the picture
        let config = LayoutConfig {
            paragraph_gap: Pt(0.0),
            ..config
        };
        blocks.push(Block::AddressBlock {
            title: AddressRole::Receiver,
            name: "Charles Babbage".to_string(),
            lines: vec!["1 Dorset St".to_string(), "London".to_string()],
        });

        let model = BlockLayoutEngine::new(&config, &Monospace)
            .layout(&blocks)
            .expect("layout");
        assert_eq!(model.page_count(), 2);
        assert_eq!(
            texts_on(&model, 1),
            vec!["Charles Babbage", "1 Dorset St", "London"]
        );
    }

    #[test]
    fn signatures_move_to_the_next_page_whole() {
        let config = LayoutConfig {
            paragraph_gap: Pt(0.0),
            ..LayoutConfig::default()
        };
        let line_height = config.line_height();
        // less than three lines, and so less than the 75pt signature, stays free
        let filler = ((config.drawable_height() / line_height).floor() as usize) - 2;
        let mut blocks: Vec<Block> = (0..filler)
            .map(|i| Block::Closing {
                text: format!("line {i}"),
            })
            .collect();
        blocks.push(Block::SignatureImage {
            image: Some(SignatureImage::new(png(800, 400))),
        });
        blocks.push(Block::Signatory {
            name: "Ada".to_string(),
        });

        let model = BlockLayoutEngine::new(&config, &Monospace)
            .layout(&blocks)
            .expect("layout");
        assert_eq!(model.page_count(), 2);
        assert!(model.pages[0].elements.iter().all(|element| !element.is_image()));

        let second = &model.pages[1];
        match &second.elements[0] {
            PositionedElement::Image { y, height, .. } => {
                assert_eq!(*y, second.height - config.margin);
                assert_eq!(*height, Pt(75.0));
            }
            other => panic!("expected the signature first, got {other:?}"),
        }
        assert_eq!(texts_on(&model, 1), vec!["Ada"]);
    }

    #[test]
    fn address_blocks_taller_than_a_page_split_line_by_line() {
        let config = LayoutConfig::default();
        let lines: Vec<String> = (0..100).map(|i| format!("line {i}")).collect();
        let blocks = vec![Block::AddressBlock {
            title: AddressRole::Sender,
            name: "Ada".to_string(),
            lines,
        }];
        let model = BlockLayoutEngine::new(&config, &Monospace)
            .layout(&blocks)
            .expect("layout");
        assert!(model.page_count() >= 3);
        assert_eq!(model.element_count(), 101);
    }

    #[test]
    fn every_element_stays_inside_the_drawable_region() {
        let config = LayoutConfig::default();
        let blocks: Vec<Block> = (0..6)
            .map(|_| Block::BodyParagraph {
                text: lipsum::lipsum(300),
            })
            .collect();
        let model = BlockLayoutEngine::new(&config, &Monospace)
            .layout(&blocks)
            .expect("layout");

        let margins: Margins = config.margins();
        for page in &model.pages {
            let region: Rect = page.drawable_region(&margins);
            for element in &page.elements {
                assert!(region.contains_y(element.y()), "{element:?} escapes {region:?}");
                assert!(element.y() - config.line_height() >= region.y1);
            }
        }
    }

    #[test]
    fn lines_taller_than_a_page_overflow() {
        let config = LayoutConfig {
            font_size: Pt(600.0),
            ..LayoutConfig::default()
        };
        let blocks = vec![Block::Salutation {
            text: "Dear Ada,".to_string(),
        }];
        let result = BlockLayoutEngine::new(&config, &Monospace).layout(&blocks);
        assert!(matches!(
            result,
            Err(LetterError::PaginationOverflow { .. })
        ));
    }

    #[test]
    fn gaps_alone_never_produce_blank_pages() {
        let config = LayoutConfig {
            block_gap: Pt(2000.0),
            ..LayoutConfig::default()
        };
        let blocks = vec![
            Block::DateLine {
                text: "today".to_string(),
            },
            Block::SubjectLine {
                text: "Subject: hello".to_string(),
            },
        ];
        let model = BlockLayoutEngine::new(&config, &Monospace)
            .layout(&blocks)
            .expect("layout");
        assert_eq!(model.page_count(), 2);
        assert!(model.pages.iter().all(|page| !page.is_empty()));
    }
}
