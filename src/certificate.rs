//! Composing a whole certificate: the fitted name on its baseline and the justified body
//! below it, both centred on the page.

use crate::error::LayoutError;
use crate::layout::{
    ensure_positive, fit_name, justify, JustifyOptions, LayoutResult, NameFit, NameFitOptions,
};
use crate::metrics::FontMetrics;
use crate::pagesize::PageGeometry;
use crate::text::{clean_for_font, StyledToken};
use crate::units::Pt;

/// Where and how large the name and body are set. The defaults suit the 842 × 595
/// landscape certificate.
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateSettings {
    /// Baseline of the name
    pub name_y: Pt,
    /// Size the name is set at unless it has to shrink
    pub name_size: Pt,
    /// Widest the name may be before it is shrunk
    pub max_name_width: Pt,
    /// Baseline of the first body line
    pub body_y: Pt,
    pub body_size: Pt,
    /// Width of the justified body column
    pub body_width: Pt,
    /// Names are printed in capitals
    pub uppercase_name: bool,
    pub name_fit: NameFitOptions,
    pub justify: JustifyOptions,
}

impl Default for CertificateSettings {
    fn default() -> Self {
        CertificateSettings {
            name_y: Pt(300.0),
            name_size: Pt(40.0),
            max_name_width: Pt(750.0),
            body_y: Pt(240.0),
            body_size: Pt(14.0),
            body_width: Pt(600.0),
            uppercase_name: true,
            name_fit: NameFitOptions::default(),
            justify: JustifyOptions::default(),
        }
    }
}

/// The three faces a certificate is set in
#[derive(Debug)]
pub struct CertificateFonts<'a, M: ?Sized> {
    pub name: &'a M,
    pub regular: &'a M,
    pub bold: &'a M,
}

impl<M: ?Sized> Clone for CertificateFonts<'_, M> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: ?Sized> Copy for CertificateFonts<'_, M> {}

/// Everything needed to draw one certificate, with no drawing done yet
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateLayout {
    pub geometry: PageGeometry,
    pub name: NameFit,
    pub name_y: Pt,
    pub body: LayoutResult,
}

/// Join an optional rank or title to a name, e.g. `("Cap", "Ana Silva")` into
/// `"Cap Ana Silva"`
pub fn display_name(rank: Option<&str>, name: &str) -> String {
    match rank.map(str::trim).filter(|rank| !rank.is_empty()) {
        Some(rank) => format!("{rank} {}", name.trim()),
        None => name.trim().to_string(),
    }
}

/// Lay out a certificate: fit `name` with the name face and justify `body` with the
/// regular and bold faces. Body text is cleaned with [clean_for_font] first, the same way
/// the name is.
pub fn layout_certificate<M: FontMetrics + ?Sized>(
    fonts: CertificateFonts<'_, M>,
    name: &str,
    body: &[StyledToken],
    settings: &CertificateSettings,
    geometry: PageGeometry,
) -> Result<CertificateLayout, LayoutError> {
    ensure_positive("page_height", geometry.height)?;

    let name = if settings.uppercase_name {
        name.to_uppercase()
    } else {
        name.to_string()
    };
    let name = fit_name(
        &name,
        fonts.name,
        settings.name_size,
        settings.max_name_width,
        geometry.width,
        &settings.name_fit,
    )?;

    let body: Vec<StyledToken> = body
        .iter()
        .map(|token| StyledToken {
            text: clean_for_font(&token.text),
            bold: token.bold,
        })
        .collect();
    let body = justify(
        &body,
        fonts.regular,
        fonts.bold,
        settings.body_y,
        settings.body_size,
        settings.body_width,
        geometry.width,
        &settings.justify,
    )?;

    Ok(CertificateLayout {
        geometry,
        name,
        name_y: settings.name_y,
        body,
    })
}
