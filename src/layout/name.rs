use super::{ensure_positive, ensure_positive_ratio, NameFit, WordPlacement};
use crate::error::LayoutError;
use crate::metrics::{measure, FontMetrics};
use crate::text::{clean_for_font, words};
use crate::units::Pt;

/// Tuning for [fit_name]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NameFitOptions {
    /// Gap drawn between the words of a name, as a fraction of the font size. The gap is
    /// placed manually rather than taken from the font's space glyph.
    pub gap_ratio: f64,
    /// Applied on top of the exact shrink ratio so that a shrunk name stops short of the
    /// maximum width instead of touching it
    pub safety_margin: f64,
}

impl Default for NameFitOptions {
    fn default() -> Self {
        NameFitOptions {
            gap_ratio: 0.25,
            safety_margin: 0.95,
        }
    }
}

impl NameFitOptions {
    /// Set the gap between words, as a fraction of the font size
    pub fn gap_ratio(mut self, gap_ratio: f64) -> Self {
        self.gap_ratio = gap_ratio;
        self
    }

    /// Set the factor applied to the shrink ratio of a name that is too wide
    pub fn safety_margin(mut self, safety_margin: f64) -> Self {
        self.safety_margin = safety_margin;
        self
    }
}

/// Measure the words of a name and the manual gaps between them at `size`
fn measure_name<M: FontMetrics + ?Sized>(
    words: &[&str],
    metrics: &M,
    size: Pt,
    gap_ratio: f64,
) -> Result<(Vec<Pt>, Pt, Pt), LayoutError> {
    let gap = size * gap_ratio;
    let widths = words
        .iter()
        .map(|word| measure(metrics, word, size))
        .collect::<Result<Vec<Pt>, LayoutError>>()?;
    let gaps = gap * (words.len().saturating_sub(1) as f64);
    let total = widths.iter().copied().sum::<Pt>() + gaps;
    Ok((widths, gap, total))
}

/// Fit a name onto a single line, centred on the page.
///
/// The name is cleaned with [clean_for_font] and split into words, which are separated by
/// a manual gap of `requested_size * gap_ratio`. If the whole block is wider than
/// `max_width`, the size is scaled down once by `max_width / total * safety_margin` and
/// everything is re-measured at the new size. There is no second pass: a single word
/// that is still too wide is placed anyway.
///
/// The block is centred horizontally on `page_width`; the returned placements only carry
/// x positions, so the caller chooses the baseline. An empty name yields no placements at
/// the requested size.
pub fn fit_name<M: FontMetrics + ?Sized>(
    name: &str,
    metrics: &M,
    requested_size: Pt,
    max_width: Pt,
    page_width: Pt,
    options: &NameFitOptions,
) -> Result<NameFit, LayoutError> {
    ensure_positive("requested_size", requested_size)?;
    ensure_positive("max_width", max_width)?;
    ensure_positive("page_width", page_width)?;
    if !(options.gap_ratio.is_finite() && options.gap_ratio >= 0.0) {
        return Err(LayoutError::InvalidLayoutParameters {
            name: "gap_ratio",
            value: options.gap_ratio,
        });
    }
    ensure_positive_ratio("safety_margin", options.safety_margin)?;

    let cleaned = clean_for_font(name);
    let words: Vec<&str> = words(&cleaned).collect();
    if words.is_empty() {
        return Ok(NameFit {
            size: requested_size,
            total_width: Pt(0.0),
            placements: Vec::new(),
        });
    }

    let mut size = requested_size;
    let (mut widths, mut gap, mut total) =
        measure_name(&words, metrics, size, options.gap_ratio)?;

    if total > max_width {
        let ratio = (max_width / total) * options.safety_margin;
        size = requested_size * ratio;
        log::debug!(
            "name {cleaned:?} is {total} wide (max {max_width}), shrinking {requested_size} -> {size}"
        );
        (widths, gap, total) = measure_name(&words, metrics, size, options.gap_ratio)?;
    }

    let mut x = (page_width - total) / 2.0;
    let placements = words
        .iter()
        .zip(widths)
        .map(|(word, width)| {
            let placement = WordPlacement {
                text: word.to_string(),
                x,
                width,
            };
            x += width + gap;
            placement
        })
        .collect();

    Ok(NameFit {
        size,
        total_width: total,
        placements,
    })
}
