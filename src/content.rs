//! Page content stream rendering.

use crate::colour::Colour;
use crate::font::Font;
use crate::page::{PageContents, SpanFont, SpanLayout};
use crate::PDFError;
use id_arena::Arena;
use std::io::Write;

/// Render page contents to a PDF content stream, in the order they were added.
#[allow(clippy::write_with_newline)]
pub(crate) fn render_contents(
    contents: &[PageContents],
    fonts: &Arena<Font>,
) -> Result<Vec<u8>, PDFError> {
    let mut content: Vec<u8> = Vec::default();

    for page_content in contents.iter() {
        match page_content {
            PageContents::Text(spans) => {
                render_text_spans(&mut content, spans, fonts)?;
            }
            PageContents::Image(image) => {
                write!(&mut content, "q\n")?;
                write!(
                    &mut content,
                    "{} 0 0 {} {} {} cm\n",
                    image.position.width(),
                    image.position.height(),
                    image.position.x1,
                    image.position.y1
                )?;
                write!(&mut content, "/I{} Do\n", image.image_id.index())?;
                write!(&mut content, "Q\n")?;
            }
        }
    }

    Ok(content)
}

#[allow(clippy::write_with_newline)]
fn render_text_spans(
    content: &mut Vec<u8>,
    spans: &[SpanLayout],
    fonts: &Arena<Font>,
) -> Result<(), PDFError> {
    let Some(first) = spans.first() else {
        return Ok(());
    };

    write!(content, "q\n")?;

    let mut current_font: SpanFont = first.font;
    let mut current_colour: Colour = first.colour;
    write_colour(content, current_colour)?;

    write!(content, "BT\n")?;
    write!(
        content,
        "/F{} {} Tf\n",
        current_font.id.index(),
        current_font.size
    )?;

    for span in spans.iter() {
        if span.font != current_font {
            current_font = span.font;
            write!(
                content,
                "/F{} {} Tf\n",
                current_font.id.index(),
                current_font.size
            )?;
        }
        if span.colour != current_colour {
            current_colour = span.colour;
            write_colour(content, current_colour)?;
        }

        // absolute positioning: reset the text matrix for every word
        write!(content, "1 0 0 1 {} {} Tm\n", span.coords.0, span.coords.1)?;
        write!(content, "<")?;
        let font = &fonts[current_font.id];
        for ch in span.text.chars() {
            write!(content, "{:04x}", font.glyph_for_drawing(ch)?)?;
        }
        write!(content, "> Tj\n")?;
    }

    write!(content, "ET\n")?;
    write!(content, "Q\n")?;
    Ok(())
}

#[allow(clippy::write_with_newline)]
fn write_colour(content: &mut Vec<u8>, colour: Colour) -> Result<(), std::io::Error> {
    match colour {
        Colour::RGB { r, g, b } => write!(content, "{r} {g} {b} rg\n"),
        Colour::Grey { g } => write!(content, "{g} g\n"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::Image;
    use crate::page::ImageLayout;
    use crate::rect::Rect;
    use crate::units::Pt;
    use crate::{
        colours, layout_certificate, CertificateFontIds, CertificateFonts, CertificateSettings,
        Page, StyledToken,
    };
    use image::{DynamicImage, RgbImage};

    const MONO: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");
    const SINGLE_GLYPH: &[u8] = include_bytes!("../assets/single-glyph.ttf");

    #[test]
    fn background_is_scaled_over_its_rectangle() {
        let mut images: Arena<Image> = Arena::new();
        let image_id = images.alloc(Image::from_decoded(DynamicImage::ImageRgb8(
            RgbImage::new(2, 2),
        )));
        let contents = vec![PageContents::Image(ImageLayout {
            image_id,
            position: Rect::from_size(Pt(842.0), Pt(595.0)),
        })];

        let rendered = render_contents(&contents, &Arena::new()).expect("renders");
        assert_eq!(
            String::from_utf8(rendered).expect("ascii"),
            "q\n842 0 0 595 0 0 cm\n/I0 Do\nQ\n"
        );
    }

    #[test]
    fn certificate_words_are_positioned_one_by_one() {
        let mut fonts: Arena<Font> = Arena::new();
        let ids = CertificateFontIds {
            name: fonts.alloc(Font::load(MONO.to_vec()).expect("loads")),
            regular: fonts.alloc(Font::load(MONO.to_vec()).expect("loads")),
            bold: fonts.alloc(Font::load(MONO.to_vec()).expect("loads")),
        };
        let metrics = &fonts[ids.regular];
        let layout = layout_certificate(
            CertificateFonts {
                name: metrics,
                regular: metrics,
                bold: metrics,
            },
            "Ana Maria",
            &[StyledToken::regular("No dia"), StyledToken::bold("TEMA")],
            &CertificateSettings::default(),
            crate::pagesize::CERTIFICATE,
        )
        .expect("lays out");

        let mut page = Page::new(layout.geometry);
        page.add_certificate(&layout, ids, colours::BLACK);
        let rendered = String::from_utf8(
            render_contents(&page.contents, &fonts).expect("renders"),
        )
        .expect("ascii");

        assert_eq!(rendered.matches(" Tm\n").count(), 5);
        assert_eq!(rendered.matches(" Tj\n").count(), 5);
        assert_eq!(rendered.matches("BT\n").count(), 1);

        let font_switches: Vec<&str> = rendered
            .lines()
            .filter(|line| line.ends_with(" Tf"))
            .collect();
        assert_eq!(font_switches, vec!["/F0 40 Tf", "/F1 14 Tf", "/F2 14 Tf"]);

        let a = format!("{:04x}", fonts[ids.name].glyph_id('A').expect("has an A"));
        assert!(rendered.contains(&format!("<{a}")));
    }

    #[test]
    fn undrawable_character_fails_the_page() {
        let mut fonts: Arena<Font> = Arena::new();
        let id = fonts.alloc(Font::load(SINGLE_GLYPH.to_vec()).expect("loads"));
        let mut page = Page::new(crate::pagesize::CERTIFICATE);
        page.add_span(crate::page::SpanLayout {
            text: "Ab".into(),
            font: SpanFont { id, size: Pt(12.0) },
            colour: colours::BLACK,
            coords: (Pt(100.0), Pt(100.0)),
        });

        assert!(matches!(
            render_contents(&page.contents, &fonts),
            Err(PDFError::MissingGlyph { ch: 'b' })
        ));
    }
}
