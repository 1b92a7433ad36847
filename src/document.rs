use crate::{
    certificate::CertificateLayout,
    colour::colours,
    font::Font,
    image::Image,
    info::Info,
    page::{CertificateFontIds, Page},
    refs::{ObjectReferences, RefType},
    PDFError,
};
use id_arena::{Arena, Id};
use pdf_writer::{Pdf, Ref};
use std::io::Write;

#[derive(Default)]
/// A document stores the fonts, images and pages of one or more certificates, then
/// renders them all out with a call to [Document::write]
pub struct Document {
    pub info: Option<Info>,
    pub pages: Arena<Page>,
    pub page_order: Vec<Id<Page>>,
    pub fonts: Arena<Font>,
    pub images: Arena<Image>,
}

impl Document {
    /// Sets information about the document. If not provided, no information block will be
    /// written to the PDF
    pub fn set_info(&mut self, info: Info) {
        self.info = Some(info);
    }

    /// Add a page to the end of the document
    pub fn add_page(&mut self, page: Page) -> Id<Page> {
        let id = self.pages.alloc(page);
        self.page_order.push(id);
        id
    }

    /// Add a font to the document. Fonts are shared by every page.
    pub fn add_font(&mut self, font: Font) -> Id<Font> {
        self.fonts.alloc(font)
    }

    /// Add an image to the document. Images are shared by every page, so a background used
    /// on many certificates is only embedded once.
    pub fn add_image(&mut self, image: Image) -> Id<Image> {
        self.images.alloc(image)
    }

    /// Append a page holding one laid out certificate, drawn in black over an optional
    /// full-page background
    pub fn add_certificate(
        &mut self,
        layout: &CertificateLayout,
        fonts: CertificateFontIds,
        background: Option<Id<Image>>,
    ) -> Id<Page> {
        let mut page = Page::new(layout.geometry);
        if let Some(background) = background {
            page.add_background(background);
        }
        page.add_certificate(layout, fonts, colours::BLACK);
        self.add_page(page)
    }

    /// Write the entire document to the writer. The whole PDF is built in memory first.
    ///
    /// References between objects are only resolved here, so fonts, images and pages can
    /// be added in any order beforehand.
    pub fn write<W: Write>(self, mut w: W) -> Result<(), PDFError> {
        let Document {
            info,
            pages,
            page_order,
            fonts,
            images,
        } = self;

        let mut refs = ObjectReferences::new();

        let catalog_id = refs.gen(RefType::Catalog);
        let page_tree_id = refs.gen(RefType::PageTree);

        let mut writer = Pdf::new();
        if let Some(info) = info {
            info.write(&mut refs, &mut writer);
        }

        let page_refs: Vec<Ref> = (0..page_order.len())
            .map(|i| refs.gen(RefType::Page(i)))
            .collect();

        writer
            .pages(page_tree_id)
            .count(page_refs.len() as i32)
            .kids(page_refs);

        for (id, font) in fonts.iter() {
            font.write(&mut refs, id, &mut writer);
        }

        for (id, image) in images.iter() {
            image.write(&mut refs, id.index(), &mut writer);
        }

        for (page_index, id) in page_order.iter().enumerate() {
            let page = pages.get(*id).ok_or(PDFError::PageMissing)?;
            page.write(
                &mut refs,
                page_index,
                page_tree_id,
                &fonts,
                &images,
                &mut writer,
            )?;
        }

        writer.catalog(catalog_id).pages(page_tree_id);

        log::debug!(
            "wrote {} pages, {} fonts, {} images",
            page_order.len(),
            fonts.len(),
            images.len()
        );
        w.write_all(writer.finish().as_slice()).map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagesize::CERTIFICATE;
    use chrono::DateTime;
    use crate::{layout_certificate, CertificateFonts, CertificateSettings, StyledToken};
    use image::{DynamicImage, Rgba, RgbaImage};

    const MONO: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

    fn contains(haystack: &[u8], needle: &str) -> bool {
        haystack
            .windows(needle.len())
            .any(|window| window == needle.as_bytes())
    }

    #[test]
    fn empty_page_writes_a_valid_header_and_trailer() {
        let mut doc = Document::default();
        doc.add_page(Page::new(CERTIFICATE));

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).expect("can write");

        assert!(out.starts_with(b"%PDF-"));
        assert!(contains(&out, "/MediaBox [0 0 842 595]"));
        assert!(contains(&out, "%%EOF"));
    }

    #[test]
    fn background_with_alpha_gets_a_soft_mask() {
        let mut doc = Document::default();
        let background = doc.add_image(Image::from_decoded(DynamicImage::ImageRgba8(
            RgbaImage::from_pixel(4, 3, Rgba([255, 255, 255, 128])),
        )));
        let mut page = Page::new(CERTIFICATE);
        page.add_background(background);
        doc.add_page(page);

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).expect("can write");

        assert!(contains(&out, "/SMask"));
        assert!(contains(&out, "/I0"));
    }

    #[test]
    fn info_block_carries_the_title() {
        let mut doc = Document::default();
        doc.set_info(
            Info::new()
                .title("Certificado")
                .created(DateTime::parse_from_rfc3339("2024-10-10T09:30:00-03:00").expect("valid")),
        );
        doc.add_page(Page::new(CERTIFICATE));

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).expect("can write");

        assert!(contains(&out, "(Certificado)"));
        assert!(contains(&out, "D:20241010093000-03"));
    }

    #[test]
    fn certificate_embeds_its_font() {
        let font = Font::load(MONO.to_vec()).expect("loads");
        let layout = layout_certificate(
            CertificateFonts {
                name: &font,
                regular: &font,
                bold: &font,
            },
            "Maria das Graças",
            &[StyledToken::regular("participou do evento")],
            &CertificateSettings::default(),
            CERTIFICATE,
        )
        .expect("lays out");

        let mut doc = Document::default();
        let id = doc.add_font(font);
        doc.add_certificate(
            &layout,
            CertificateFontIds {
                name: id,
                regular: id,
                bold: id,
            },
            None,
        );

        let mut out: Vec<u8> = Vec::new();
        doc.write(&mut out).expect("can write");

        assert!(contains(&out, "/Identity-H"));
        assert!(contains(&out, "/CIDFontType2"));
        assert!(contains(&out, "/FontFile2"));
        assert!(contains(&out, "/ToUnicode"));
        assert!(contains(&out, "/F0"));
    }
}
