use crate::{
    metrics::FontMetrics,
    refs::{ObjectReferences, RefType},
    PDFError, Pt,
};
use id_arena::Id;
use owned_ttf_parser::{AsFaceRef, Face, GlyphId, OwnedFace};
use pdf_writer::{
    types::{CidFontType, FontFlags, SystemInfo},
    Filter, Finish, Name, Pdf, Ref, Str,
};
use std::collections::HashMap;

/// A parsed TrueType or OpenType font. The same font measures text for layout (through
/// [FontMetrics]) and is embedded in its entirety in the written PDF.
///
/// Fonts are added to a [Document](crate::Document) and referred to by their `Id` from
/// then on.
pub struct Font {
    pub face: OwnedFace,
}

impl std::fmt::Debug for Font {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Font")
            .field("name", &self.name())
            .field("bytes", &self.face.as_slice().len())
            .finish()
    }
}

impl Font {
    /// Load a font from raw bytes, returning an error if the font could not be parsed
    pub fn load(bytes: Vec<u8>) -> Result<Font, PDFError> {
        let face = OwnedFace::from_vec(bytes, 0)?;
        Ok(Font { face })
    }

    fn face(&self) -> &Face<'_> {
        self.face.as_face_ref()
    }

    fn name_record(&self, name_id: u16) -> Option<String> {
        self.face()
            .names()
            .into_iter()
            .find(|name| name.name_id == name_id && name.is_unicode())
            .and_then(|name| name.to_string())
    }

    /// The full name of the font, if it carries one
    pub fn name(&self) -> Option<String> {
        self.name_record(owned_ttf_parser::name_id::FULL_NAME)
    }

    /// The family name of the font, if it carries one
    pub fn family(&self) -> Option<String> {
        self.name_record(owned_ttf_parser::name_id::FAMILY)
    }

    pub fn glyph_id(&self, ch: char) -> Option<u16> {
        self.face().glyph_index(ch).map(|i| i.0)
    }

    pub fn replacement_glyph_id(&self) -> Option<u16> {
        self.glyph_id('\u{FFFD}').or_else(|| self.glyph_id('?'))
    }

    /// Glyph to draw for `ch`: its own glyph, else the replacement glyph
    pub(crate) fn glyph_for_drawing(&self, ch: char) -> Result<u16, PDFError> {
        self.glyph_id(ch)
            .or_else(|| self.replacement_glyph_id())
            .ok_or(PDFError::MissingGlyph { ch })
    }

    fn write_cid(&self, refs: &mut ObjectReferences, font_index: usize, writer: &mut Pdf) -> Ref {
        let font_descriptor_id = self.write_descriptor(refs, font_index, writer);

        let id = refs.gen(RefType::CidFont(font_index));

        let mut cid_font = writer.cid_font(id);
        cid_font.subtype(CidFontType::Type2);
        cid_font.base_font(Name(format!("F{font_index}").as_bytes()));
        cid_font.system_info(SystemInfo {
            registry: Str(b"Adobe"),
            ordering: Str(b"Identity"),
            supplement: 0,
        });
        cid_font.font_descriptor(font_descriptor_id);

        let scaling = 1000.0 / self.face().units_per_em() as f32;
        let mut advances: Vec<(u16, u16)> = self
            .glyph_metrics()
            .into_iter()
            .map(|(gid, metrics)| (gid, metrics.advance))
            .collect();
        advances.sort_by_key(|&(gid, _)| gid);

        // the most frequent advance becomes /DW, everything is still listed in /W
        let mut counts: HashMap<u16, usize> = HashMap::new();
        for &(_, advance) in advances.iter() {
            *counts.entry(advance).or_insert(0) += 1;
        }
        let default_width = counts
            .into_iter()
            .max_by_key(|&(advance, count)| (count, advance))
            .map(|(advance, _)| advance as f32 * scaling)
            .unwrap_or(1000.0);

        let mut widths = cid_font.widths();
        let mut run_start: Option<u16> = None;
        let mut run: Vec<f32> = Vec::new();
        for (gid, advance) in advances {
            if let Some(start) = run_start {
                if gid as usize != start as usize + run.len() {
                    widths.consecutive(start, run.drain(..));
                    run_start = Some(gid);
                }
            } else {
                run_start = Some(gid);
            }
            run.push(advance as f32 * scaling);
        }
        if let Some(start) = run_start {
            widths.consecutive(start, run);
        }
        widths.finish();

        cid_font.default_width(default_width);
        cid_font.cid_to_gid_map_predefined(Name(b"Identity"));

        id
    }

    fn write_font_data(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::FontData(font_index));

        writer
            .stream(id, self.face.as_slice())
            .pair(Name(b"Length1"), self.face.as_slice().len() as i32);

        id
    }

    fn write_descriptor(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let font_data_stream_id = self.write_font_data(refs, font_index, writer);

        let glyphs = self.glyph_metrics();
        let max_width = glyphs.values().map(|g| g.advance).max().unwrap_or_default();
        let max_height = glyphs.values().map(|g| g.height).max().unwrap_or_default();
        let avg_width = if glyphs.is_empty() {
            0.0
        } else {
            glyphs.values().map(|g| g.advance as f32).sum::<f32>() / glyphs.len() as f32
        };

        let id = refs.gen(RefType::FontDescriptor(font_index));
        let face = self.face();
        let base_name = self.name().unwrap_or_else(|| format!("F{font_index}"));

        let mut descriptor = writer.font_descriptor(id);
        descriptor.name(Name(base_name.replace(' ', "").as_bytes()));
        if let Some(family) = self.family() {
            descriptor.family(Str(family.as_bytes()));
        }
        descriptor.weight(face.weight().to_number());

        let mut flags = FontFlags::NON_SYMBOLIC;
        if face.is_monospaced() {
            flags.insert(FontFlags::FIXED_PITCH);
        }
        if face.is_italic() {
            flags.insert(FontFlags::ITALIC);
        }
        descriptor.flags(flags);

        let scaling = 1000.0 / face.units_per_em() as f32;
        let bbox = face.global_bounding_box();
        descriptor.bbox(pdf_writer::Rect {
            x1: bbox.x_min as f32 * scaling,
            y1: bbox.y_min as f32 * scaling,
            x2: bbox.x_max as f32 * scaling,
            y2: (bbox.y_max.max(max_height)) as f32 * scaling,
        });
        descriptor.italic_angle(face.italic_angle());
        descriptor.ascent(face.ascender() as f32 * scaling);
        descriptor.descent(face.descender() as f32 * scaling);
        descriptor.leading(face.line_gap() as f32 * scaling);
        let cap_height = face.capital_height().unwrap_or(face.ascender());
        descriptor.cap_height(cap_height as f32 * scaling);
        descriptor.x_height(face.x_height().unwrap_or(cap_height) as f32 * scaling);
        // truetype fonts carry no stem width; 80 is the customary stand-in
        descriptor.stem_v(80.0);
        descriptor.avg_width(avg_width * scaling);
        descriptor.max_width(max_width as f32 * scaling);
        descriptor.missing_width(max_width as f32 * scaling);

        descriptor.font_file2(font_data_stream_id);

        id
    }

    /// Every glyph reachable from a unicode cmap subtable, with the first character that
    /// maps onto it
    fn glyph_chars(&self) -> HashMap<u16, char> {
        let mut map: HashMap<u16, char> = HashMap::new();
        let Some(cmap) = self.face().tables().cmap else {
            return map;
        };

        for subtable in cmap.subtables.into_iter().filter(|table| table.is_unicode()) {
            subtable.codepoints(|codepoint: u32| {
                if let Ok(ch) = char::try_from(codepoint) {
                    if let Some(gid) = subtable.glyph_index(codepoint).filter(|gid| gid.0 > 0) {
                        map.entry(gid.0).or_insert(ch);
                    }
                }
            });
        }

        map
    }

    fn glyph_metrics(&self) -> HashMap<u16, GlyphMetrics> {
        let face = self.face();
        self.glyph_chars()
            .into_iter()
            .filter_map(|(gid, ch)| {
                let advance = face.glyph_hor_advance(GlyphId(gid))?;
                let height = face
                    .glyph_bounding_box(GlyphId(gid))
                    .map(|bbox| bbox.y_max)
                    .unwrap_or(face.ascender());
                Some((gid, GlyphMetrics { ch, advance, height }))
            })
            .collect()
    }

    fn write_to_unicode(
        &self,
        refs: &mut ObjectReferences,
        font_index: usize,
        writer: &mut Pdf,
    ) -> Ref {
        let id = refs.gen(RefType::ToUnicode(font_index));

        let mut cmap = String::from(
            "/CIDInit /ProcSet findresource begin\n\
             12 dict begin\n\
             begincmap\n\
             /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
             /CMapName /Adobe-Identity-UCS def\n\
             /CMapType 2 def\n\
             1 begincodespacerange\n\
             <0000> <FFFF>\n\
             endcodespacerange\n",
        );

        let mut glyphs: Vec<(u16, char)> = self
            .glyph_metrics()
            .into_iter()
            .map(|(gid, metrics)| (gid, metrics.ch))
            .collect();
        glyphs.sort_by_key(|&(gid, _)| gid);

        // bfchar blocks hold at most 100 entries
        for block in glyphs.chunks(100) {
            cmap.push_str(&format!("{} beginbfchar\n", block.len()));
            for &(gid, ch) in block {
                let mut units = [0u16; 2];
                let hex: String = ch
                    .encode_utf16(&mut units)
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
        let mut stream = writer.stream(id, compressed.as_slice());
        stream.filter(Filter::FlateDecode);
        stream.finish();

        id
    }

    pub(crate) fn write(&self, refs: &mut ObjectReferences, id: Id<Font>, writer: &mut Pdf) {
        let font_index = id.index();
        let font_id = refs.gen(RefType::Font(font_index));
        let cid_font_id = self.write_cid(refs, font_index, writer);
        let to_unicode_id = self.write_to_unicode(refs, font_index, writer);

        let mut font = writer.type0_font(font_id);
        font.base_font(Name(format!("F{font_index}").as_bytes()));
        font.encoding_predefined(Name(b"Identity-H"));
        font.descendant_font(cid_font_id);
        font.to_unicode(to_unicode_id);
    }
}

#[derive(Debug, Clone, Copy)]
struct GlyphMetrics {
    ch: char,
    advance: u16,
    height: i16,
}

/// Widths come straight from the `hmtx` advances, scaled from font units to points.
/// Any character without a glyph makes the whole run unmeasurable: layout would rather
/// fail than justify around a zero-width hole.
impl FontMetrics for Font {
    fn width_of_text(&self, text: &str, size: Pt) -> Option<Pt> {
        let face = self.face();
        let scaling = size / face.units_per_em() as f64;
        text.chars()
            .map(|ch| {
                let gid = face.glyph_index(ch)?;
                face.glyph_hor_advance(gid)
                    .map(|advance| scaling * advance as f64)
            })
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LayoutError;
    use crate::metrics::measure;

    const MONO: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");
    const SINGLE_GLYPH: &[u8] = include_bytes!("../assets/single-glyph.ttf");

    fn mono() -> Font {
        Font::load(MONO.to_vec()).expect("can load font")
    }

    #[test]
    fn widths_scale_advances_to_the_font_size() {
        let font = mono();
        let em = font.face().units_per_em() as f64;
        let advance = font
            .face()
            .glyph_index('A')
            .and_then(|gid| font.face().glyph_hor_advance(gid))
            .expect("has an A") as f64;

        let width = font.width_of_text("ABC", Pt(20.0)).expect("measures");
        assert!((width.0 - 3.0 * advance * 20.0 / em).abs() < 1e-9);

        let doubled = font.width_of_text("ABC", Pt(40.0)).expect("measures");
        assert!((doubled.0 - 2.0 * width.0).abs() < 1e-9);
        assert_eq!(font.width_of_text("", Pt(20.0)), Some(Pt(0.0)));
    }

    #[test]
    fn unmapped_characters_cannot_be_measured() {
        let font = mono();
        assert_eq!(font.width_of_text("A中", Pt(14.0)), None);
        assert_eq!(
            measure(&font, "中文", Pt(14.0)),
            Err(LayoutError::MetricsUnavailable {
                text: "中文".into(),
                size: Pt(14.0)
            })
        );
    }

    #[test]
    fn drawing_falls_back_to_the_replacement_glyph() {
        let font = mono();
        let a = font.glyph_id('A').expect("has an A");
        assert_eq!(font.glyph_for_drawing('A').expect("has a glyph"), a);

        let replacement = font.glyph_id('\u{FFFD}').expect("has a replacement glyph");
        assert_eq!(font.replacement_glyph_id(), Some(replacement));
        assert_eq!(
            font.glyph_for_drawing('中').expect("falls back"),
            replacement
        );
    }

    #[test]
    fn drawing_without_any_replacement_glyph_fails() {
        let font = Font::load(SINGLE_GLYPH.to_vec()).expect("can load font");
        assert!(font.glyph_for_drawing('A').is_ok());
        assert_eq!(font.replacement_glyph_id(), None);
        assert!(matches!(
            font.glyph_for_drawing('b'),
            Err(PDFError::MissingGlyph { ch: 'b' })
        ));
    }

    #[test]
    fn garbage_is_not_a_font() {
        assert!(matches!(
            Font::load(b"not a font".to_vec()),
            Err(PDFError::FaceParsingError(_))
        ));
    }
}
