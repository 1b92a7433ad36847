use crate::units::Pt;
use thiserror::Error;

/// Errors raised by the layout functions. Layout never produces a partial result: a call
/// either returns a complete set of placements or one of these.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The metrics provider could not produce a usable advance width for a run of text
    /// (a glyph is missing, or the width came back NaN, infinite or negative)
    #[error("no usable advance width for {text:?} at size {size}")]
    MetricsUnavailable { text: String, size: Pt },

    /// A size, width or ratio was not a finite positive number
    #[error("invalid layout parameter `{name}`: {value}")]
    InvalidLayoutParameters { name: &'static str, value: f64 },
}

/// All errors that writing a PDF can generate
#[derive(Error, Debug)]
pub enum PDFError {
    #[error(transparent)]
    /// An I/O error occurred
    Io(#[from] std::io::Error),

    #[error(transparent)]
    /// [owned_ttf_parser] failed to parse the font
    FaceParsingError(#[from] owned_ttf_parser::FaceParsingError),

    #[error(transparent)]
    /// [image] failed to decode the image
    Image(#[from] image::ImageError),

    #[error(transparent)]
    /// Laying out the page contents failed
    Layout(#[from] LayoutError),

    #[error("page missing from the document")]
    PageMissing,

    #[error("font has no glyph for {ch:?} and no replacement glyph")]
    MissingGlyph { ch: char },
}
