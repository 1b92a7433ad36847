/// The weight a run of body text is set in. Each style is measured and drawn with its
/// own font.
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Regular,
    Bold,
}

/// A span of caller-provided text in a single style. A token may hold several words;
/// layout splits it on whitespace and only the style survives past that point.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StyledToken {
    pub text: String,
    pub bold: bool,
}

impl StyledToken {
    pub fn regular<S: Into<String>>(text: S) -> StyledToken {
        StyledToken {
            text: text.into(),
            bold: false,
        }
    }

    pub fn bold<S: Into<String>>(text: S) -> StyledToken {
        StyledToken {
            text: text.into(),
            bold: true,
        }
    }

    pub fn style(&self) -> FontStyle {
        if self.bold {
            FontStyle::Bold
        } else {
            FontStyle::Regular
        }
    }

    /// The non-empty words of this token, in order
    pub fn words(&self) -> impl Iterator<Item = &str> {
        words(&self.text)
    }
}

/// Replace characters that certificate fonts commonly lack with their closest renderable
/// equivalent, then trim the result:
///
/// * `º` (masculine ordinal indicator) becomes `°` (degree sign)
/// * a non-breaking space becomes a regular space
pub fn clean_for_font(text: &str) -> String {
    text.chars()
        .map(|ch| match ch {
            '\u{00BA}' => '\u{00B0}',
            '\u{00A0}' => ' ',
            ch => ch,
        })
        .collect::<String>()
        .trim()
        .to_string()
}

/// Split text into its non-empty, whitespace-separated words
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
}
