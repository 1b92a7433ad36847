use super::{ensure_finite, ensure_positive, ensure_positive_ratio, LayoutResult, Line, Placement, Word};
use crate::error::LayoutError;
use crate::metrics::{measure, FontMetrics};
use crate::text::{FontStyle, StyledToken};
use crate::units::Pt;

/// Tuning for [justify]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct JustifyOptions {
    /// Distance between consecutive baselines, as a multiple of the font size
    pub line_height_ratio: f64,
}

impl Default for JustifyOptions {
    fn default() -> Self {
        JustifyOptions {
            line_height_ratio: 1.5,
        }
    }
}

impl JustifyOptions {
    /// Set the distance between baselines, as a multiple of the font size
    pub fn line_height_ratio(mut self, line_height_ratio: f64) -> Self {
        self.line_height_ratio = line_height_ratio;
        self
    }
}

/// Split every token into words, tag them with the token's style and measure them at
/// `size` with the matching provider.
pub fn measure_words<'a, R, B>(
    tokens: &'a [StyledToken],
    regular: &R,
    bold: &B,
    size: Pt,
) -> Result<Vec<Word<'a>>, LayoutError>
where
    R: FontMetrics + ?Sized,
    B: FontMetrics + ?Sized,
{
    let mut words = Vec::new();
    for token in tokens {
        let style = token.style();
        for text in token.words() {
            let width = match style {
                FontStyle::Regular => measure(regular, text, size)?,
                FontStyle::Bold => measure(bold, text, size)?,
            };
            words.push(Word { text, style, width });
        }
    }
    Ok(words)
}

/// Greedily break measured words into lines.
///
/// `space_width` is the nominal width of a space and only serves to estimate how many
/// words fit; the gaps actually drawn are decided later. A word joins the current line
/// while `natural_width + word + words_on_line * space_width` stays strictly below
/// `max_width`. The test also applies to an empty line, so a word at least `max_width`
/// wide at the very start closes an empty line before taking one of its own; that empty
/// line draws nothing but still counts towards the baselines. The final line is flagged
/// as last.
pub fn break_lines<'a>(words: &[Word<'a>], space_width: Pt, max_width: Pt) -> Vec<Line<'a>> {
    let mut lines: Vec<Line<'a>> = Vec::new();
    let mut line = Line::default();

    for &word in words {
        let projected =
            line.natural_width + word.width + space_width * (line.words.len() as f64);
        if projected < max_width {
            line.natural_width += word.width;
            line.words.push(word);
        } else {
            log::trace!(
                "closing line of {} words, {} of {max_width}",
                line.words.len(),
                line.natural_width
            );
            let next = Line {
                words: vec![word],
                natural_width: word.width,
                is_last: false,
            };
            lines.push(std::mem::replace(&mut line, next));
        }

        if word.width >= max_width {
            log::warn!(
                "word {:?} is {} wide and overflows the {max_width} column",
                word.text,
                word.width
            );
        }
    }

    if !line.words.is_empty() {
        line.is_last = true;
        lines.push(line);
    }

    lines
}

/// Lay out styled tokens as a justified paragraph.
///
/// Words are measured at `size` (bold tokens with `bold`, everything else with `regular`)
/// and broken into lines with [break_lines], using the width of a regular space as the
/// fill estimate. The column is `max_width` wide and centred on `page_width`: every line
/// starts at the same left edge, whatever its own width.
///
/// Every line except the last with at least two words is stretched so that its first
/// word starts on the left edge and its last word ends exactly on the right edge. The
/// last line, and any line holding a single word, is set with ordinary spaces. The first
/// baseline is `start_y`; each following one sits `size * line_height_ratio` lower.
///
/// A word wider than the column is set on a line of its own at its natural width and
/// overflows the column. When such a word opens the paragraph it is preceded by an empty
/// line, so it sits on the second baseline. Empty input yields an empty result.
#[allow(clippy::too_many_arguments)]
pub fn justify<R, B>(
    tokens: &[StyledToken],
    regular: &R,
    bold: &B,
    start_y: Pt,
    size: Pt,
    max_width: Pt,
    page_width: Pt,
    options: &JustifyOptions,
) -> Result<LayoutResult, LayoutError>
where
    R: FontMetrics + ?Sized,
    B: FontMetrics + ?Sized,
{
    ensure_finite("start_y", start_y)?;
    ensure_positive("size", size)?;
    ensure_positive("max_width", max_width)?;
    ensure_positive("page_width", page_width)?;
    ensure_positive_ratio("line_height_ratio", options.line_height_ratio)?;

    let words = measure_words(tokens, regular, bold, size)?;
    if words.is_empty() {
        return Ok(LayoutResult::default());
    }

    let space_width = measure(regular, " ", size)?;
    let lines = break_lines(&words, space_width, max_width);
    log::debug!(
        "justified {} words into {} lines at {size}",
        words.len(),
        lines.len()
    );

    let line_height = size * options.line_height_ratio;
    let block_x = (page_width - max_width) / 2.0;

    let mut placements = Vec::with_capacity(words.len());
    for (index, line) in lines.iter().enumerate() {
        let y = start_y - line_height * (index as f64);
        let gap = if line.is_justified() {
            (max_width - line.natural_width) / (line.gaps() as f64)
        } else {
            space_width
        };

        let mut x = block_x;
        for word in line.words.iter() {
            placements.push(Placement {
                text: word.text.to_string(),
                x,
                y,
                style: word.style,
                size,
                width: word.width,
            });
            x += word.width + gap;
        }
    }

    Ok(LayoutResult { placements })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::testing::GridMetrics;

    fn run(tokens: &[StyledToken], max: f64) -> LayoutResult {
        let regular = GridMetrics::new(0.5);
        let bold = GridMetrics::new(0.6);
        justify(
            tokens,
            &regular,
            &bold,
            Pt(240.0),
            Pt(10.0),
            Pt(max),
            Pt(842.0),
            &JustifyOptions::default(),
        )
        .expect("layout succeeds")
    }

    #[test]
    fn greedy_fill_uses_strict_comparison() {
        // words of 20pt, space 5pt: 20 + 20 + 5 = 45 is not < 45, so the second word wraps
        let words = [
            Word {
                text: "aaaa",
                style: FontStyle::Regular,
                width: Pt(20.0),
            },
            Word {
                text: "bbbb",
                style: FontStyle::Regular,
                width: Pt(20.0),
            },
        ];
        let lines = break_lines(&words, Pt(5.0), Pt(45.0));
        assert_eq!(lines.len(), 2);
        assert!(!lines[0].is_last);
        assert!(lines[1].is_last);

        let lines = break_lines(&words, Pt(5.0), Pt(45.5));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].natural_width, Pt(40.0));
    }

    #[test]
    fn full_lines_span_the_column_exactly() {
        let tokens = vec![StyledToken::regular(
            "um dois tres quatro cinco seis sete oito nove dez onze doze treze",
        )];
        let layout = run(&tokens, 120.0);
        let lines = layout.lines();
        assert!(lines.len() > 2);

        let left = Pt((842.0 - 120.0) / 2.0);
        for line in &lines[..lines.len() - 1] {
            assert_eq!(line[0].x, left);
            if line.len() > 1 {
                let right = line[line.len() - 1].right();
                assert!((right.0 - (left.0 + 120.0)).abs() < 120.0 * 1e-6);
            }
        }
    }

    #[test]
    fn last_line_is_set_with_natural_spaces() {
        let tokens = vec![StyledToken::regular("aaaa bbbb cccc dddd ee")];
        // 20pt words, 5pt space: "aaaa bbbb cccc" = 70 < 80, "dddd" would make 95
        let layout = run(&tokens, 80.0);
        let lines = layout.lines();
        assert_eq!(lines.len(), 2);

        let last = lines[1];
        assert_eq!(last.len(), 2);
        let gap = last[1].x - last[0].right();
        assert!((gap.0 - 5.0).abs() < 1e-9);
        assert!(last[1].right().0 - last[0].x.0 <= 80.0);
    }

    #[test]
    fn baselines_step_down_by_line_height() {
        let tokens = vec![StyledToken::regular("aaaa bbbb cccc dddd eeee ffff gggg")];
        let layout = run(&tokens, 50.0);
        for (index, line) in layout.lines().iter().enumerate() {
            assert_eq!(line[0].y, Pt(240.0 - 15.0 * index as f64));
        }
    }

    #[test]
    fn styles_follow_their_tokens() {
        let tokens = vec![
            StyledToken::regular("tema"),
            StyledToken::bold("EXEMPLO EM"),
        ];
        let layout = run(&tokens, 600.0);
        let styles: Vec<(&str, FontStyle, Pt)> = layout
            .iter()
            .map(|p| (p.text.as_str(), p.style, p.width))
            .collect();
        assert_eq!(
            styles,
            vec![
                ("tema", FontStyle::Regular, Pt(20.0)),
                ("EXEMPLO", FontStyle::Bold, Pt(42.0)),
                ("EM", FontStyle::Bold, Pt(12.0)),
            ]
        );
    }

    #[test]
    fn overwide_word_gets_its_own_line() {
        let tokens = vec![StyledToken::regular("a supercalifragilistic b")];
        let layout = run(&tokens, 60.0);
        let lines = layout.lines();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1].len(), 1);
        assert_eq!(lines[1][0].text, "supercalifragilistic");
        assert_eq!(lines[1][0].width, Pt(100.0));
        // a single-word line is never stretched and keeps its natural width
        assert_eq!(lines[1][0].x, Pt(391.0));
    }

    #[test]
    fn overwide_first_word_drops_to_the_second_baseline() {
        let tokens = vec![StyledToken::regular("supercalifragilistic a b")];
        let layout = run(&tokens, 60.0);
        let lines = layout.lines();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0][0].text, "supercalifragilistic");
        assert_eq!(lines[0][0].y, Pt(240.0 - 10.0 * 1.5));
        assert_eq!(lines[1][0].text, "a");
        assert_eq!(lines[1][0].y, Pt(240.0 - 2.0 * 10.0 * 1.5));
    }

    #[test]
    fn empty_line_before_an_overwide_opening_word() {
        let words = [
            Word {
                text: "wide",
                style: FontStyle::Regular,
                width: Pt(50.0),
            },
            Word {
                text: "a",
                style: FontStyle::Regular,
                width: Pt(5.0),
            },
        ];
        let lines = break_lines(&words, Pt(5.0), Pt(50.0));
        assert_eq!(lines.len(), 3);
        assert!(lines[0].words.is_empty());
        assert!(!lines[0].is_justified());
        assert_eq!(lines[1].words.len(), 1);
        assert_eq!(lines[2].words[0].text, "a");
        assert!(lines[2].is_last);
    }

    #[test]
    fn empty_input_is_empty_output() {
        assert!(run(&[], 600.0).is_empty());
        assert!(run(&[StyledToken::bold("   ")], 600.0).is_empty());
    }

    #[test]
    fn missing_space_glyph_is_reported() {
        let regular = GridMetrics::new(0.5).without(' ');
        let err = justify(
            &[StyledToken::regular("a b")],
            &regular,
            &regular,
            Pt(240.0),
            Pt(10.0),
            Pt(600.0),
            Pt(842.0),
            &JustifyOptions::default(),
        )
        .unwrap_err();
        assert_eq!(
            err,
            LayoutError::MetricsUnavailable {
                text: " ".into(),
                size: Pt(10.0)
            }
        );
    }

    #[test]
    fn bold_words_are_measured_with_the_bold_provider() {
        let regular = GridMetrics::new(0.5);
        let bold = GridMetrics::new(0.6).without('X');
        let err = justify(
            &[StyledToken::regular("X"), StyledToken::bold("X")],
            &regular,
            &bold,
            Pt(240.0),
            Pt(10.0),
            Pt(600.0),
            Pt(842.0),
            &JustifyOptions::default(),
        );
        assert!(matches!(err, Err(LayoutError::MetricsUnavailable { .. })));
    }

    #[test]
    fn invalid_parameters_are_rejected() {
        let metrics = GridMetrics::new(0.5);
        let tokens = [StyledToken::regular("a b")];
        let cases = [
            (240.0, 0.0, 600.0, 1.5),
            (240.0, 10.0, -600.0, 1.5),
            (f64::NAN, 10.0, 600.0, 1.5),
            (240.0, 10.0, 600.0, 0.0),
        ];
        for (y, size, max, ratio) in cases {
            let err = justify(
                &tokens,
                &metrics,
                &metrics,
                Pt(y),
                Pt(size),
                Pt(max),
                Pt(842.0),
                &JustifyOptions::default().line_height_ratio(ratio),
            );
            assert!(matches!(
                err,
                Err(LayoutError::InvalidLayoutParameters { .. })
            ));
        }
    }
}
