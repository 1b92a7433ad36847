//! Certificate typesetting.
//!
//! Two pure layout functions turn text into placements without drawing anything:
//!
//! - [`fit_name`](crate::layout::fit_name) - centres a name on one line, shrinking it once
//!   if it is wider than allowed
//! - [`justify`](crate::layout::justify) - greedily wraps styled tokens into a centred
//!   column, stretching every line but the last to fill the column exactly
//!
//! Both take their font metrics as explicit [FontMetrics](crate::FontMetrics) providers and
//! hold no state between calls, so certificates can be laid out on as many threads as
//! needed.
//!
//! # Example
//!
//! ```
//! use cert_typeset::layout::{justify, JustifyOptions};
//! use cert_typeset::{FontMetrics, Pt, StyledToken};
//!
//! struct Mono;
//! impl FontMetrics for Mono {
//!     fn width_of_text(&self, text: &str, size: Pt) -> Option<Pt> {
//!         Some(size * (0.5 * text.chars().count() as f64))
//!     }
//! }
//!
//! let tokens = vec![
//!     StyledToken::regular("No dia 10/10/2024 tema"),
//!     StyledToken::bold("EXEMPLO EM NEGRITO"),
//! ];
//! let layout = justify(
//!     &tokens,
//!     &Mono,
//!     &Mono,
//!     Pt(240.0),
//!     Pt(14.0),
//!     Pt(120.0),
//!     Pt(842.0),
//!     &JustifyOptions::default(),
//! )
//! .expect("mono metrics measure everything");
//! assert_eq!(layout.lines().len(), 3);
//! ```

mod justify;
mod name;
mod result;

pub use justify::*;
pub use name::*;
pub use result::*;

use crate::error::LayoutError;
use crate::units::Pt;

/// Reject anything that is not a finite, strictly positive length
pub(crate) fn ensure_positive(name: &'static str, value: Pt) -> Result<(), LayoutError> {
    ensure_positive_ratio(name, value.0)
}

pub(crate) fn ensure_positive_ratio(name: &'static str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidLayoutParameters { name, value })
    }
}

pub(crate) fn ensure_finite(name: &'static str, value: Pt) -> Result<(), LayoutError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(LayoutError::InvalidLayoutParameters {
            name,
            value: value.0,
        })
    }
}
