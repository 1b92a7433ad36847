//! Typesetting for printable certificates: fit a name on one line, set a block of styled
//! prose as a justified paragraph, and write the result onto a background as a PDF.
//!
//! The layout functions in [layout] are pure and only need a [FontMetrics] provider;
//! [Document], [Page] and [Font] take their output the rest of the way to a PDF.

mod certificate;
pub use certificate::*;

mod colour;
pub use colour::*;

mod content;

mod document;
pub use document::*;

mod error;
pub use error::*;

mod font;
pub use font::*;

mod image;
pub use self::image::*;

mod info;
pub use info::*;

/// Name fitting and justified paragraph layout
pub mod layout;

mod metrics;
pub use metrics::*;

mod page;
pub use page::*;

/// Page geometry and common page sizes
pub mod pagesize;
pub use pagesize::PageGeometry;

mod rect;
pub use rect::*;

pub(crate) mod refs;

mod text;
pub use text::*;

mod units;
pub use units::*;

/// Re-export PDF-writer functionality
pub use pdf_writer;
