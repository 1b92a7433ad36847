//! Advance-width measurement.
//!
//! Layout never reads fonts directly; it asks a [FontMetrics] provider how wide a run of
//! text is at a given size. [Font](crate::Font) implements the trait from its TrueType
//! tables, tests implement it with fixed per-character widths, and [CachedMetrics]
//! memoizes any provider for batches that measure the same words over and over.

use crate::error::LayoutError;
use crate::units::Pt;
use std::collections::HashMap;
use std::sync::RwLock;

/// Maps a run of text at a font size to its horizontal advance in points.
///
/// The font identity is the provider itself. Implementations must be deterministic: the
/// same `(text, size)` always yields the same width. `None` means the run cannot be
/// measured, typically because a glyph is missing from the font.
pub trait FontMetrics {
    fn width_of_text(&self, text: &str, size: Pt) -> Option<Pt>;
}

impl<M: FontMetrics + ?Sized> FontMetrics for &M {
    fn width_of_text(&self, text: &str, size: Pt) -> Option<Pt> {
        (**self).width_of_text(text, size)
    }
}

/// Measure `text`, turning a missing or unusable width into
/// [LayoutError::MetricsUnavailable]. A silent zero here would let lines overfill and
/// collapse their gaps, so it is never substituted.
pub fn measure<M: FontMetrics + ?Sized>(
    metrics: &M,
    text: &str,
    size: Pt,
) -> Result<Pt, LayoutError> {
    match metrics.width_of_text(text, size) {
        Some(width) if width.is_finite() && width.0 >= 0.0 => Ok(width),
        _ => Err(LayoutError::MetricsUnavailable {
            text: text.to_string(),
            size,
        }),
    }
}

/// Wraps a provider and remembers every width it has reported.
///
/// Lookups take a shared read lock, so any number of threads can lay out certificates
/// against the same cache at once; only a miss takes the write lock. A poisoned lock
/// degrades to uncached measurement rather than failing.
#[derive(Debug)]
pub struct CachedMetrics<M> {
    inner: M,
    widths: RwLock<HashMap<(String, u64), Option<Pt>>>,
}

impl<M: FontMetrics> CachedMetrics<M> {
    pub fn new(inner: M) -> CachedMetrics<M> {
        CachedMetrics {
            inner,
            widths: RwLock::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &M {
        &self.inner
    }

    /// Number of distinct `(text, size)` pairs measured so far
    pub fn len(&self) -> usize {
        self.widths.read().map(|w| w.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<M: FontMetrics> FontMetrics for CachedMetrics<M> {
    fn width_of_text(&self, text: &str, size: Pt) -> Option<Pt> {
        let key = (text.to_string(), size.0.to_bits());
        if let Some(width) = self
            .widths
            .read()
            .ok()
            .and_then(|widths| widths.get(&key).copied())
        {
            return width;
        }

        let width = self.inner.width_of_text(text, size);
        if let Ok(mut widths) = self.widths.write() {
            widths.insert(key, width);
        }
        width
    }
}
