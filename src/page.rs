use crate::certificate::CertificateLayout;
use crate::colour::Colour;
use crate::content::render_contents;
use crate::font::Font;
use crate::image::Image;
use crate::pagesize::PageGeometry;
use crate::rect::Rect;
use crate::refs::{ObjectReferences, RefType};
use crate::text::FontStyle;
use crate::units::Pt;
use crate::PDFError;
use id_arena::{Arena, Id};
use pdf_writer::{Finish, Name, Pdf, Ref};

/// The font and size a span of text is drawn with
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct SpanFont {
    pub id: Id<Font>,
    pub size: Pt,
}

/// A run of text drawn from a single baseline origin
#[derive(Clone, PartialEq, Debug)]
pub struct SpanLayout {
    pub text: String,
    pub font: SpanFont,
    pub colour: Colour,
    /// Left end of the baseline
    pub coords: (Pt, Pt),
}

/// An image stretched over a rectangle of the page
#[derive(Clone, PartialEq, Debug)]
pub struct ImageLayout {
    pub image_id: Id<Image>,
    pub position: Rect,
}

#[derive(Clone, PartialEq, Debug)]
pub enum PageContents {
    Text(Vec<SpanLayout>),
    Image(ImageLayout),
}

/// Which document font draws each part of a certificate
#[derive(Copy, Clone, PartialEq, Debug)]
pub struct CertificateFontIds {
    pub name: Id<Font>,
    pub regular: Id<Font>,
    pub bold: Id<Font>,
}

impl CertificateFontIds {
    pub fn for_style(&self, style: FontStyle) -> Id<Font> {
        match style {
            FontStyle::Regular => self.regular,
            FontStyle::Bold => self.bold,
        }
    }
}

/// A single page. Contents are drawn in the order they were added, so a background must
/// be added before the text that goes over it.
#[derive(Clone, Debug)]
pub struct Page {
    /// The size of the page
    pub media_box: Rect,
    pub contents: Vec<PageContents>,
}

impl Page {
    pub fn new(geometry: PageGeometry) -> Page {
        Page {
            media_box: Rect::from_size(geometry.width, geometry.height),
            contents: Vec::default(),
        }
    }

    pub fn geometry(&self) -> PageGeometry {
        PageGeometry::new(self.media_box.width(), self.media_box.height())
    }

    pub fn add_span(&mut self, span: SpanLayout) {
        self.contents.push(PageContents::Text(vec![span]));
    }

    pub fn add_image(&mut self, image: ImageLayout) {
        self.contents.push(PageContents::Image(image));
    }

    /// Stretch an image over the whole page
    pub fn add_background(&mut self, image_id: Id<Image>) {
        self.add_image(ImageLayout {
            image_id,
            position: self.media_box,
        });
    }

    /// Turn a laid out certificate into text spans: the name words on the name baseline
    /// in the name font, then every body word in the font matching its style.
    pub fn add_certificate(
        &mut self,
        layout: &CertificateLayout,
        fonts: CertificateFontIds,
        colour: Colour,
    ) {
        let name_font = SpanFont {
            id: fonts.name,
            size: layout.name.size,
        };
        let mut spans: Vec<SpanLayout> = layout
            .name
            .placements
            .iter()
            .map(|word| SpanLayout {
                text: word.text.clone(),
                font: name_font,
                colour,
                coords: (word.x, layout.name_y),
            })
            .collect();

        spans.extend(layout.body.iter().map(|word| SpanLayout {
            text: word.text.clone(),
            font: SpanFont {
                id: fonts.for_style(word.style),
                size: word.size,
            },
            colour,
            coords: (word.x, word.y),
        }));

        if !spans.is_empty() {
            self.contents.push(PageContents::Text(spans));
        }
    }

    pub(crate) fn write(
        &self,
        refs: &mut ObjectReferences,
        page_index: usize,
        parent: Ref,
        fonts: &Arena<Font>,
        images: &Arena<Image>,
        writer: &mut Pdf,
    ) -> Result<(), PDFError> {
        let rendered = render_contents(&self.contents, fonts)?;

        let id = refs
            .get(RefType::Page(page_index))
            .unwrap_or_else(|| refs.gen(RefType::Page(page_index)));
        let content_id = refs.gen(RefType::ContentForPage(page_index));

        let mut page = writer.page(id);
        page.media_box(self.media_box.into());
        page.parent(parent);

        let mut resources = page.resources();
        let mut resource_fonts = resources.fonts();
        for (font_id, _) in fonts.iter() {
            if let Some(font_ref) = refs.get(RefType::Font(font_id.index())) {
                resource_fonts.pair(Name(format!("F{}", font_id.index()).as_bytes()), font_ref);
            }
        }
        resource_fonts.finish();
        let mut resource_xobjects = resources.x_objects();
        for (image_id, _) in images.iter() {
            if let Some(image_ref) = refs.get(RefType::Image(image_id.index())) {
                resource_xobjects
                    .pair(Name(format!("I{}", image_id.index()).as_bytes()), image_ref);
            }
        }
        resource_xobjects.finish();
        resources.finish();

        page.contents(content_id);
        page.finish();

        writer.stream(content_id, rendered.as_slice());
        Ok(())
    }
}
