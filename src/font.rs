use crate::error::MeasurementError;
use crate::layout::{FontStyle, TextMeasurer};
use crate::refs::{ObjectReferences, RefType};
use crate::standard_fonts::StandardFonts;
use crate::units::Pt;
use crate::LetterError;
use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Finish, Name, Pdf, Ref, Str,
};
use std::collections::BTreeMap;

/// A parsed TrueType or OpenType font. Fonts are embedded in their entirety in the
/// generated PDF, so large fonts dramatically increase the size of every letter.
pub struct Font {
    pub face: OwnedFace,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.postscript_name())
            .finish()
    }
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, LetterError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    /// The PostScript name of the font, reduced to characters that are legal in a PDF name
    pub fn postscript_name(&self) -> Option<String> {
        self.face
            .as_face_ref()
            .names()
            .into_iter()
            .find(|name| name.name_id == owned_ttf_parser::name_id::POST_SCRIPT_NAME && name.is_unicode())
            .and_then(|name| name.to_string())
            .map(|name| {
                name.chars()
                    .filter(|ch| ch.is_ascii_alphanumeric() || *ch == '-')
                    .collect::<String>()
            })
            .filter(|name| !name.is_empty())
    }

    fn scaling(&self, size: Pt) -> Pt {
        size / self.face.as_face_ref().units_per_em() as f32
    }

    /// Distance from the baseline to the top of the font at the given size
    pub fn ascent(&self, size: Pt) -> Pt {
        self.scaling(size) * self.face.as_face_ref().ascender() as f32
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face.as_face_ref().glyph_index(ch).map(|gid| gid.0)
    }

    /// The glyph drawn for `ch`: its own, else the replacement character, else `?`
    pub fn resolve_glyph(&self, ch: char) -> Result<u16, MeasurementError> {
        self.glyph_id(ch)
            .or_else(|| self.glyph_id('\u{FFFD}'))
            .or_else(|| self.glyph_id('?'))
            .ok_or_else(|| MeasurementError::new(ch, "font has no glyph and no replacement glyph"))
    }

    fn advance(&self, gid: u16) -> u16 {
        self.face
            .as_face_ref()
            .glyph_hor_advance(GlyphId(gid))
            .unwrap_or_default()
    }

    /// Width of a run of text. Newlines and other control characters take no space.
    pub fn width_of_text(&self, text: &str, size: Pt) -> Result<Pt, MeasurementError> {
        let mut units: u32 = 0;
        for ch in text.chars().filter(|ch| !ch.is_control()) {
            let gid = self.resolve_glyph(ch).map_err(|e| MeasurementError::new(text, e.reason))?;
            units += self.advance(gid) as u32;
        }
        Ok(self.scaling(size) * units as f32)
    }

    /// Embed the font as a Type0 font with an Identity-H encoding, so content streams
    /// address glyphs by id. `used` maps every glyph id drawn to the character it shows.
    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        style: FontStyle,
        used: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) {
        let base_font = self
            .postscript_name()
            .unwrap_or_else(|| format!("LetterFont-{style:?}"));

        let font_id = refs.get(RefType::Font(style));
        let cid_font_id = self.write_cid(refs, style, &base_font, used, writer);
        let to_unicode_id = self.write_to_unicode(refs, style, used, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(base_font.as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }

    fn write_cid(
        &self,
        refs: &mut ObjectReferences,
        style: FontStyle,
        base_font: &str,
        used: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let descriptor_id = self.write_descriptor(refs, style, base_font, writer);
        let id = refs.get(RefType::CidFont(style));
        let scaling = 1000.0 / self.face.as_face_ref().units_per_em() as f32;

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(base_font.as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(descriptor_id);
        cid_font.default_width(self.advance(0) as f32 * scaling);

        // group runs of consecutive glyph ids into one widths entry each
        let mut widths = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for &gid in used.keys() {
            match run_start {
                Some(start) if start as usize + run.len() == gid as usize => {}
                Some(start) => {
                    widths.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                }
                None => run_start = Some(gid),
            }
            run.push(self.advance(gid) as f32 * scaling);
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run.drain(..));
        }
        widths.finish();

        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));
        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        style: FontStyle,
        base_font: &str,
        writer: &mut Pdf,
    ) -> Ref {
        let face = self.face.as_face_ref();
        let scaling = 1000.0 / face.units_per_em() as f32;

        let data_id = refs.get(RefType::FontData(style));
        writer
            .stream(data_id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }

        let bbox = face.global_bounding_box();
        let id = refs.get(RefType::FontDescriptor(style));
        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(base_font.as_bytes()));
        descriptor.flags(flags);
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: bbox.y_max as f32 * scaling,
        });
        descriptor.italic_angle(if face.is_italic() { -12.0 } else { 0.0 });
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.cap_height(
            face.capital_height()
                .map(|h| h as f32 * scaling)
                .unwrap_or(face.ascender() as f32 * scaling),
        );
        // not recorded in TrueType fonts; a conventional value for regular/bold text
        descriptor.stem_v(if style.is_bold() { 120.0 } else { 80.0 });
        descriptor.font_file2(data_id);
        descriptor.finish();

        id
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        style: FontStyle,
        used: &BTreeMap<u16, char>,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.get(RefType::ToUnicode(style));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n<0000> <FFFF>\nendcodespacerange\n",
        );

        // bfchar sections hold at most 100 entries
        let pairs: Vec<(&u16, &char)> = used.iter().collect();
        for chunk in pairs.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
            for (gid, ch) in chunk {
                let mut utf16 = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut utf16)
                    .iter()
                    .map(|unit| format!("{unit:04x}"))
                    .collect();
                cmap.push_str(&format!("<{gid:04x}> <{hex}>\n"));
            }
            cmap.push_str("endbfchar\n");
        }
        cmap.push_str("endcmap\nCMapName currentdict /CMap defineresource pop\nend\nend\n");

        let compressed = miniz_oxide::deflate::compress_to_vec_zlib(
            cmap.as_bytes(),
            miniz_oxide::deflate::CompressionLevel::DefaultLevel as u8,
        );
        writer
            .stream(id, compressed.as_slice())
            .filter(pdf_writer::Filter::FlateDecode);

        id
    }
}

/// The font family a letter is set in. The same value measures text for layout and
/// supplies fonts to the [PdfRenderer](crate::render::PdfRenderer), so what was measured is
/// what gets drawn.
#[derive(Debug, Default)]
pub enum LetterFonts {
    /// Helvetica and Helvetica-Bold, built into every PDF reader
    #[default]
    Standard,
    /// An embedded TrueType family
    TrueType { regular: Font, bold: Font },
}

impl LetterFonts {
    pub fn load_truetype(regular: Vec<u8>, bold: Vec<u8>) -> Result<LetterFonts, LetterError> {
        Ok(LetterFonts::TrueType {
            regular: Font::load(regular)?,
            bold: Font::load(bold)?,
        })
    }

    /// Distance from the top of a line to its baseline
    pub fn ascent(&self, style: FontStyle, size: Pt) -> Pt {
        match self {
            LetterFonts::Standard => StandardFonts::ascent(size),
            LetterFonts::TrueType { regular, bold } => match style {
                FontStyle::Regular => regular.ascent(size),
                FontStyle::Bold => bold.ascent(size),
            },
        }
    }
}

impl TextMeasurer for LetterFonts {
    fn text_width(&self, text: &str, style: FontStyle, size: Pt) -> Result<Pt, MeasurementError> {
        match self {
            LetterFonts::Standard => StandardFonts.text_width(text, style, size),
            LetterFonts::TrueType { regular, bold } => match style {
                FontStyle::Regular => regular.width_of_text(text, size),
                FontStyle::Bold => bold.width_of_text(text, size),
            },
        }
    }
}
