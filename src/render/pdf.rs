use super::{render_with, DrawingBackend, PageRenderer};
use crate::document::DocumentModel;
use crate::font::LetterFonts;
use crate::image::EncodedImage;
use crate::info::Info;
use crate::layout::FontStyle;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::standard_fonts::StandardFonts;
use crate::units::Pt;
use crate::LetterError;
use pdf_writer::{Content, Finish, Name, Pdf, Ref, Str};
use std::collections::{BTreeMap, BTreeSet};

const STYLES: [FontStyle; 2] = [FontStyle::Regular, FontStyle::Bold];

fn font_resource(style: FontStyle) -> &'static [u8] {
    match style {
        FontStyle::Regular => b"F0",
        FontStyle::Bold => b"F1",
    }
}

fn style_index(style: FontStyle) -> usize {
    match style {
        FontStyle::Regular => 0,
        FontStyle::Bold => 1,
    }
}

struct PendingPage {
    media_box: Rect,
    content: Content,
    images: BTreeSet<usize>,
}

/// A [DrawingBackend] that accumulates pages in memory and writes them out as a PDF with
/// [pdf_writer] on [save](DrawingBackend::save).
///
/// All text is set at one font size. With [LetterFonts::Standard] the document references
/// the built-in Helvetica fonts; with [LetterFonts::TrueType] both fonts are embedded.
pub struct PdfBackend<'f> {
    fonts: &'f LetterFonts,
    font_size: Pt,
    info: Option<Info>,
    pages: Vec<PendingPage>,
    images: Vec<EncodedImage>,
    /// glyph id -> character, per style, for embedded fonts
    glyphs: [BTreeMap<u16, char>; 2],
    styles_used: [bool; 2],
}

impl<'f> PdfBackend<'f> {
    pub fn new(fonts: &'f LetterFonts, font_size: Pt) -> PdfBackend<'f> {
        PdfBackend {
            fonts,
            font_size,
            info: None,
            pages: Vec::default(),
            images: Vec::default(),
            glyphs: [BTreeMap::new(), BTreeMap::new()],
            styles_used: [false; 2],
        }
    }

    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    fn current_page(&mut self) -> Result<&mut PendingPage, LetterError> {
        self.pages
            .last_mut()
            .ok_or_else(|| LetterError::Render("no page has been started".to_string()))
    }

    /// Encode text for the content stream: WinAnsi bytes for the standard fonts, big-endian
    /// glyph ids for embedded ones
    fn encode(&mut self, text: &str, style: FontStyle) -> Result<Vec<u8>, LetterError> {
        match self.fonts {
            LetterFonts::Standard => Ok(StandardFonts::encode(text)?),
            LetterFonts::TrueType { regular, bold } => {
                let font = match style {
                    FontStyle::Regular => regular,
                    FontStyle::Bold => bold,
                };
                let used = &mut self.glyphs[style_index(style)];
                let mut encoded = Vec::with_capacity(text.len() * 2);
                for ch in text.chars() {
                    let gid = font.resolve_glyph(ch)?;
                    used.entry(gid).or_insert(ch);
                    encoded.extend_from_slice(&gid.to_be_bytes());
                }
                Ok(encoded)
            }
        }
    }

    fn write_fonts(&self, refs: &mut ObjectReferences, writer: &mut Pdf) {
        for style in STYLES.into_iter().filter(|s| self.styles_used[style_index(*s)]) {
            match self.fonts {
                LetterFonts::Standard => {
                    writer
                        .type1_font(refs.get(RefType::Font(style)))
                        .base_font(Name(StandardFonts::base_font(style).as_bytes()))
                        .encoding_predefined(Name(b"WinAnsiEncoding"));
                }
                LetterFonts::TrueType { regular, bold } => {
                    let font = match style {
                        FontStyle::Regular => regular,
                        FontStyle::Bold => bold,
                    };
                    font.write(refs, style, &self.glyphs[style_index(style)], writer);
                }
            }
        }
    }
}

impl DrawingBackend for PdfBackend<'_> {
    fn new_page(&mut self, width: Pt, height: Pt) -> Result<(), LetterError> {
        self.pages.push(PendingPage {
            media_box: Rect {
                x1: Pt(0.0),
                y1: Pt(0.0),
                x2: width,
                y2: height,
            },
            content: Content::new(),
            images: BTreeSet::new(),
        });
        Ok(())
    }

    fn draw_text(&mut self, x: Pt, y: Pt, text: &str, bold: bool) -> Result<(), LetterError> {
        let style = FontStyle::bold(bold);
        let encoded = self.encode(text, style)?;
        self.styles_used[style_index(style)] = true;

        let baseline = y - self.fonts.ascent(style, self.font_size);
        let size = self.font_size;
        let content = &mut self.current_page()?.content;
        content.begin_text();
        content.set_font(Name(font_resource(style)), size.0);
        content.next_line(x.0, baseline.0);
        content.show(Str(&encoded));
        content.end_text();
        Ok(())
    }

    fn draw_image(
        &mut self,
        x: Pt,
        y: Pt,
        width: Pt,
        height: Pt,
        bytes: &[u8],
    ) -> Result<(), LetterError> {
        // fail before touching the page if the image cannot be embedded
        let encoded = EncodedImage::from_bytes(bytes)?;
        let index = self.images.len();
        self.images.push(encoded);

        let page = self.current_page()?;
        page.images.insert(index);
        page.content.save_state();
        page.content
            .transform([width.0, 0.0, 0.0, height.0, x.0, (y - height).0]);
        page.content.x_object(Name(format!("Im{index}").as_bytes()));
        page.content.restore_state();
        Ok(())
    }

    fn save(self) -> Result<Vec<u8>, LetterError> {
        let mut refs = ObjectReferences::new();
        let mut writer = Pdf::new();

        let catalog_id = refs.get(RefType::Catalog);
        let page_tree_id = refs.get(RefType::PageTree);
        writer.catalog(catalog_id).pages(page_tree_id);

        let page_ids: Vec<Ref> = (0..self.pages.len())
            .map(|i| refs.get(RefType::Page(i)))
            .collect();
        writer
            .pages(page_tree_id)
            .kids(page_ids.iter().copied())
            .count(page_ids.len() as i32);

        self.write_fonts(&mut refs, &mut writer);

        for (i, image) in self.images.iter().enumerate() {
            image.write(&mut refs, i, &mut writer);
        }

        let styles: Vec<FontStyle> = STYLES
            .into_iter()
            .filter(|s| self.styles_used[style_index(*s)])
            .collect();

        for (i, page) in self.pages.into_iter().enumerate() {
            let content_id = refs.get(RefType::ContentForPage(i));

            let mut pdf_page = writer.page(page_ids[i]);
            pdf_page.media_box(page.media_box.into());
            pdf_page.parent(page_tree_id);
            pdf_page.contents(content_id);

            let mut resources = pdf_page.resources();
            let mut fonts = resources.fonts();
            for style in &styles {
                fonts.pair(Name(font_resource(*style)), refs.get(RefType::Font(*style)));
            }
            fonts.finish();
            let mut x_objects = resources.x_objects();
            for index in &page.images {
                x_objects.pair(
                    Name(format!("Im{index}").as_bytes()),
                    refs.get(RefType::Image(*index)),
                );
            }
            x_objects.finish();
            resources.finish();
            pdf_page.finish();

            writer.stream(content_id, &page.content.finish());
        }

        if let Some(info) = &self.info {
            info.write(&mut refs, &mut writer);
        }

        Ok(writer.finish())
    }
}

/// Renders a [DocumentModel] to PDF bytes with the same fonts that measured it
pub struct PdfRenderer<'f> {
    fonts: &'f LetterFonts,
    font_size: Pt,
    info: Option<Info>,
}

impl<'f> PdfRenderer<'f> {
    pub fn new(fonts: &'f LetterFonts, font_size: Pt) -> PdfRenderer<'f> {
        PdfRenderer {
            fonts,
            font_size,
            info: None,
        }
    }

    /// Set the document metadata written to the PDF
    pub fn with_info(mut self, info: Info) -> Self {
        self.info = Some(info);
        self
    }
}

impl PageRenderer for PdfRenderer<'_> {
    fn render(&self, document: &DocumentModel) -> Result<Vec<u8>, LetterError> {
        let mut backend = PdfBackend::new(self.fonts, self.font_size);
        if let Some(info) = &self.info {
            backend.set_info(info.clone());
        }
        render_with(document, backend)
    }
}
