//! Page geometry for certificates.
//!
//! Sizes are given as (width, height) in points. The default [CERTIFICATE] page is the
//! 842 × 595 landscape sheet certificates are printed on; any other finite size works as
//! well, since layout only ever reads the width and height from a [PageGeometry].
//!
//! # Example
//!
//! ```
//! use cert_typeset::pagesize::{PageGeometry, PageOrientation, A4, CERTIFICATE};
//!
//! let page = PageGeometry::default();
//! assert_eq!(page, CERTIFICATE);
//!
//! // a portrait certificate
//! let portrait = A4.portrait();
//! assert!(portrait.width < portrait.height);
//! ```

use crate::units::*;

/// Width and height of a page, in points
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PageGeometry {
    pub width: Pt,
    pub height: Pt,
}

impl PageGeometry {
    pub const fn new(width: Pt, height: Pt) -> PageGeometry {
        PageGeometry { width, height }
    }
}

impl Default for PageGeometry {
    fn default() -> Self {
        CERTIFICATE
    }
}

impl From<(Pt, Pt)> for PageGeometry {
    fn from((width, height): (Pt, Pt)) -> Self {
        PageGeometry { width, height }
    }
}

/// The landscape certificate sheet, A4 rounded to whole points
pub const CERTIFICATE: PageGeometry = PageGeometry::new(Pt(842.0), Pt(595.0));

pub const LETTER: PageGeometry = PageGeometry::new(Pt(8.5 * 72.0), Pt(11.0 * 72.0));
pub const A4: PageGeometry = PageGeometry::new(Pt(210.0 * 72.0 / 25.4), Pt(297.0 * 72.0 / 25.4));
pub const A3: PageGeometry = PageGeometry::new(Pt(297.0 * 72.0 / 25.4), Pt(420.0 * 72.0 / 25.4));

/// Convert page sizes between portrait and landscape orientations.
pub trait PageOrientation {
    /// Returns the size in portrait orientation (width ≤ height).
    fn portrait(self) -> Self;
    /// Returns the size in landscape orientation (width ≥ height).
    fn landscape(self) -> Self;
}

impl PageOrientation for PageGeometry {
    fn portrait(self) -> Self {
        if self.width <= self.height {
            self
        } else {
            PageGeometry::new(self.height, self.width)
        }
    }

    fn landscape(self) -> Self {
        if self.width >= self.height {
            self
        } else {
            PageGeometry::new(self.height, self.width)
        }
    }
}
