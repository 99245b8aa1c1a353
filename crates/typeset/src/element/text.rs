use quire_font::{Metrics, SizedFont};
use unicode_bidi::{bidi_class, BidiClass};

use super::Element;

/// A sequence of characters in one font, with its metrics cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Text {
    font: SizedFont,
    text: String,
    metrics: Metrics,
}

impl Text {
    pub fn new(text: impl Into<String>, font: SizedFont) -> Text {
        let text = text.into();
        let metrics = font.string_metrics(&text);
        Text {
            font,
            text,
            metrics,
        }
    }

    pub fn from_char(ch: char, font: SizedFont) -> Text {
        let metrics = font.character_metrics(ch);
        Text {
            font,
            text: ch.to_string(),
            metrics,
        }
    }

    /// Construct with precomputed metrics.
    pub fn with_metrics(text: impl Into<String>, font: SizedFont, metrics: Metrics) -> Text {
        Text {
            font,
            text: text.into(),
            metrics,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &SizedFont {
        &self.font
    }

    pub fn metrics(&self) -> Metrics {
        self.metrics
    }

    /// Whether this text can be appended to the other.
    pub fn is_compatible_with(&self, other: &Text) -> bool {
        self.font.is_same(&other.font)
    }

    /// Whether any character is right-to-left.
    pub fn contains_right_to_left(&self) -> bool {
        self.text
            .chars()
            .any(|ch| CharDirection::of(ch) == CharDirection::RightToLeft)
    }

    /// The direction of the text, which must be consistent throughout.
    ///
    /// # Panics
    ///
    /// Panics if the text mixes directions; the bidi pass splits texts to
    /// single characters first, so this indicates an internal error.
    pub fn character_direction(&self) -> CharDirection {
        let mut direction: Option<CharDirection> = None;
        for ch in self.text.chars() {
            let ch_direction = CharDirection::of(ch);
            match direction {
                None => direction = Some(ch_direction),
                Some(existing) => {
                    if existing != ch_direction {
                        panic!("inconsistent direction in text {:?}", self.text);
                    }
                }
            }
        }
        direction.unwrap_or(CharDirection::Neutral)
    }

    /// Push one single-character Text element per character.
    pub fn break_up_into(&self, list: &mut Vec<Element>) {
        for ch in self.text.chars() {
            list.push(Text::from_char(ch, self.font.clone()).into());
        }
    }

    /// A new Text holding this text followed by the other's.
    ///
    /// # Panics
    ///
    /// Panics if the two are not compatible.
    pub fn appended_with(&self, other: &Text) -> Text {
        if !self.is_compatible_with(other) {
            panic!("incompatible text, cannot append");
        }
        Text::new(format!("{}{}", self.text, other.text), self.font.clone())
    }
}

/// Character direction according to the Unicode bidirectional classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharDirection {
    LeftToRight,
    Neutral,
    RightToLeft,
}

impl CharDirection {
    pub fn of(ch: char) -> CharDirection {
        match bidi_class(ch) {
            BidiClass::L | BidiClass::LRE | BidiClass::LRO => CharDirection::LeftToRight,
            BidiClass::R | BidiClass::AL | BidiClass::RLE | BidiClass::RLO => {
                CharDirection::RightToLeft
            }
            _ => CharDirection::Neutral,
        }
    }
}
