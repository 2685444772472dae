use base64::Engine;
use chrono::NaiveDate;
use image::{DynamicImage, ImageOutputFormat, Rgba, RgbaImage};
use pdf_letter::render::{render_with, DrawingBackend, PageRenderer, PdfRenderer};
use pdf_letter::*;
use std::io::Cursor;

#[derive(Debug, PartialEq)]
enum Call {
    NewPage(Pt, Pt),
    Text(Pt, Pt, String, bool),
    Image(Pt, Pt, Pt, Pt, usize),
}

#[derive(Default)]
struct RecordingBackend {
    calls: Vec<Call>,
}

impl DrawingBackend for RecordingBackend {
    fn new_page(&mut self, width: Pt, height: Pt) -> Result<(), LetterError> {
        self.calls.push(Call::NewPage(width, height));
        Ok(())
    }

    fn draw_text(&mut self, x: Pt, y: Pt, text: &str, bold: bool) -> Result<(), LetterError> {
        self.calls.push(Call::Text(x, y, text.to_string(), bold));
        Ok(())
    }

    fn draw_image(&mut self, x: Pt, y: Pt, width: Pt, height: Pt, bytes: &[u8]) -> Result<(), LetterError> {
        self.calls.push(Call::Image(x, y, width, height, bytes.len()));
        Ok(())
    }

    fn save(self) -> Result<Vec<u8>, LetterError> {
        Ok(format!("{:?}", self.calls).into_bytes())
    }
}

fn png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba([20, 20, 120, 200]));
    let mut bytes: Vec<u8> = Vec::new();
    DynamicImage::ImageRgba8(image)
        .write_to(&mut Cursor::new(&mut bytes), ImageOutputFormat::Png)
        .expect("can encode png");
    bytes
}

fn letter() -> LetterContent {
    LetterContent {
        id: "2026-0042".to_string(),
        sender_name: "Ada Lovelace".to_string(),
        sender_address: "12 Main St, Springfield, IL\nUSA".to_string(),
        receiver_name: "Charles Babbage".to_string(),
        receiver_address: "1 Dorset Street, London".to_string(),
        subject: Some("Analytical Engine".to_string()),
        body_text: format!("{}\n\n{}", lipsum::lipsum(120), lipsum::lipsum(900)),
        signature: Some(SignatureImage::new(png(300, 100))),
        render_date: NaiveDate::from_ymd_opt(2026, 10, 18).unwrap(),
    }
}

#[test]
fn replays_pages_and_elements_in_order() {
    let model = DocumentModel {
        pages: vec![
            Page {
                width: Pt(200.0),
                height: Pt(300.0),
                elements: vec![PositionedElement::Text {
                    x: Pt(10.0),
                    y: Pt(290.0),
                    content: "Hello".to_string(),
                    bold: true,
                }],
            },
            Page {
                width: Pt(200.0),
                height: Pt(300.0),
                elements: vec![PositionedElement::Image {
                    x: Pt(10.0),
                    y: Pt(100.0),
                    width: Pt(50.0),
                    height: Pt(20.0),
                    bytes: vec![1, 2, 3],
                }],
            },
        ],
    };

    let recorded = render_with(&model, RecordingBackend::default()).expect("records");
    let expected = vec![
        Call::NewPage(Pt(200.0), Pt(300.0)),
        Call::Text(Pt(10.0), Pt(290.0), "Hello".to_string(), true),
        Call::NewPage(Pt(200.0), Pt(300.0)),
        Call::Image(Pt(10.0), Pt(100.0), Pt(50.0), Pt(20.0), 3),
    ];
    assert_eq!(recorded, format!("{expected:?}").into_bytes());
}

#[test]
fn renders_a_complete_pdf() {
    let content = letter();
    let rendered = render_letter(&content, &LayoutConfig::default(), &LetterFonts::default())
        .expect("renders");

    assert_eq!(rendered.filename, "letter_2026-0042.pdf");
    assert!(rendered.bytes.starts_with(b"%PDF-"));
    let tail = String::from_utf8_lossy(&rendered.bytes[rendered.bytes.len() - 32..]).to_string();
    assert!(tail.contains("%%EOF"));

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(rendered.to_base64())
        .expect("valid base64");
    assert_eq!(decoded, rendered.bytes);
}

#[test]
fn rendering_is_deterministic() {
    let content = letter();
    let config = LayoutConfig::default();
    let fonts = LetterFonts::default();
    let first = render_letter(&content, &config, &fonts).expect("renders");
    let second = render_letter(&content, &config, &fonts).expect("renders");
    assert_eq!(first, second);
}

#[test]
fn pdf_has_one_page_object_per_laid_out_page() {
    let content = letter();
    let config = LayoutConfig::default();
    let fonts = LetterFonts::default();
    let model = layout_letter(&content, &config, &fonts).expect("lays out");
    assert!(model.page_count() >= 2);

    let bytes = PdfRenderer::new(&fonts, config.font_size)
        .render(&model)
        .expect("renders");
    let text = String::from_utf8_lossy(&bytes);
    assert_eq!(text.matches("/Type /Page\n").count() + text.matches("/Type /Page ").count(), model.page_count());
    assert!(text.contains("/BaseFont /Helvetica"));
    assert!(text.contains("/BaseFont /Helvetica-Bold"));
    assert!(text.contains("/Subtype /Image"));
}

#[test]
fn text_outside_the_standard_fonts_is_fatal() {
    let mut content = letter();
    content.receiver_name = "山田太郎".to_string();
    let result = render_letter(&content, &LayoutConfig::default(), &LetterFonts::default());
    assert!(matches!(result, Err(LetterError::Measurement(_))));
}

#[test]
fn backends_need_a_page_before_drawing() {
    let fonts = LetterFonts::default();
    let mut backend = render::PdfBackend::new(&fonts, Pt(11.0));
    assert!(matches!(
        backend.draw_text(Pt(0.0), Pt(0.0), "orphan", false),
        Err(LetterError::Render(_))
    ));
}

/// A regular/bold TrueType pair to embed, if the machine has one. Point
/// `PDF_LETTER_FONT_DIR` at a directory holding `DejaVuSans.ttf` and
/// `DejaVuSans-Bold.ttf` to run the TrueType tests elsewhere.
fn truetype_fonts() -> Option<LetterFonts> {
    let dir = std::env::var("PDF_LETTER_FONT_DIR")
        .unwrap_or_else(|_| "/usr/share/fonts/truetype/dejavu".to_string());
    let dir = std::path::Path::new(&dir);
    let regular = std::fs::read(dir.join("DejaVuSans.ttf")).ok()?;
    let bold = std::fs::read(dir.join("DejaVuSans-Bold.ttf")).ok()?;
    Some(LetterFonts::load_truetype(regular, bold).expect("fixture fonts parse"))
}

#[test]
fn truetype_fonts_measure_and_embed() {
    let Some(fonts) = truetype_fonts() else {
        eprintln!("no TrueType fixture fonts found, skipping");
        return;
    };

    use pdf_letter::layout::{FontStyle, TextMeasurer};
    let regular = fonts
        .text_width("Zoë Ωmega", FontStyle::Regular, Pt(11.0))
        .expect("measurable");
    let bold = fonts
        .text_width("Zoë Ωmega", FontStyle::Bold, Pt(11.0))
        .expect("measurable");
    assert!(regular > Pt(0.0));
    assert!(bold > regular);

    let mut content = letter();
    content.receiver_name = "Zoë Ωmega".to_string();
    let rendered =
        render_letter(&content, &LayoutConfig::default(), &fonts).expect("renders");
    let text = String::from_utf8_lossy(&rendered.bytes);
    assert!(text.contains("/Type0"));
    assert!(text.contains("/CIDFontType2"));
    assert!(text.contains("/Identity-H"));
    assert!(text.contains("/FontFile2"));
    assert!(text.contains("/ToUnicode"));
    assert!(!text.contains("/BaseFont /Helvetica"));
}
