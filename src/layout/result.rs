use crate::text::FontStyle;
use crate::units::Pt;

/// Where a single word must be drawn. `(x, y)` is the left end of the word's baseline.
#[derive(Clone, PartialEq, Debug)]
pub struct Placement {
    pub text: String,
    pub x: Pt,
    pub y: Pt,
    pub style: FontStyle,
    pub size: Pt,
    /// Advance width of the word at `size`
    pub width: Pt,
}

impl Placement {
    /// The x coordinate where the word's advance ends
    pub fn right(&self) -> Pt {
        self.x + self.width
    }
}

/// The complete, ordered set of placements for a laid out paragraph, in reading order.
#[derive(Clone, PartialEq, Debug, Default)]
pub struct LayoutResult {
    pub placements: Vec<Placement>,
}

impl LayoutResult {
    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.placements.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Placement> {
        self.placements.iter()
    }

    /// Group placements by baseline, top line first
    pub fn lines(&self) -> Vec<&[Placement]> {
        self.placements
            .chunk_by(|a, b| a.y == b.y)
            .collect()
    }
}

impl IntoIterator for LayoutResult {
    type Item = Placement;
    type IntoIter = std::vec::IntoIter<Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.into_iter()
    }
}

impl<'a> IntoIterator for &'a LayoutResult {
    type Item = &'a Placement;
    type IntoIter = std::slice::Iter<'a, Placement>;

    fn into_iter(self) -> Self::IntoIter {
        self.placements.iter()
    }
}

/// Horizontal position of one word of a fitted name
#[derive(Clone, PartialEq, Debug)]
pub struct WordPlacement {
    pub text: String,
    pub x: Pt,
    pub width: Pt,
}

impl WordPlacement {
    /// Where the word ends
    pub fn right(&self) -> Pt {
        self.x + self.width
    }
}

/// A name fitted onto a single line: the size it must be drawn at and where each word
/// starts. The caller picks the shared baseline.
#[derive(Clone, PartialEq, Debug)]
pub struct NameFit {
    pub size: Pt,
    /// Width of the words plus the manual gaps between them, at `size`
    pub total_width: Pt,
    pub placements: Vec<WordPlacement>,
}

impl NameFit {
    /// Where the name block starts, or [None] for an empty name
    pub fn start_x(&self) -> Option<Pt> {
        self.placements.first().map(|p| p.x)
    }

    pub fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }
}

/// An atomic, measured unit of body text. Words are never split across lines.
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Word<'a> {
    pub text: &'a str,
    pub style: FontStyle,
    pub width: Pt,
}

/// One line produced by the greedy line breaker
#[derive(Clone, PartialEq, Debug, Default)]
pub struct Line<'a> {
    pub words: Vec<Word<'a>>,
    /// Sum of the word widths, not counting any gaps
    pub natural_width: Pt,
    /// The final line of the paragraph is never stretched
    pub is_last: bool,
}

impl<'a> Line<'a> {
    pub fn gaps(&self) -> usize {
        self.words.len().saturating_sub(1)
    }

    /// Whether the line is stretched to fill the column
    pub fn is_justified(&self) -> bool {
        !self.is_last && self.gaps() > 0
    }
}
