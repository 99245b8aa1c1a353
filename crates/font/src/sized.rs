use std::fmt;
use std::sync::Arc;

use quire_types::Sp;

use crate::{ContentSink, FontRef, Metrics, RenderError};

/// A font together with the point size it is used at. This is what the
/// typesetting algorithms carry around: all of its metric queries are already
/// scaled.
#[derive(Clone)]
pub struct SizedFont {
    font: FontRef,
    size: f64,
}

impl SizedFont {
    pub fn new(font: FontRef, size: f64) -> SizedFont {
        SizedFont { font, size }
    }

    pub fn font(&self) -> &FontRef {
        &self.font
    }

    /// The point size.
    pub fn size(&self) -> f64 {
        self.size
    }

    pub fn has_character(&self, ch: char) -> bool {
        self.font.has_character(ch)
    }

    pub fn space_width(&self) -> Sp {
        self.font.space_width(self.size)
    }

    pub fn character_metrics(&self, ch: char) -> Metrics {
        self.font.character_metrics(ch, self.size)
    }

    pub fn string_metrics(&self, text: &str) -> Metrics {
        self.font.string_metrics(text, self.size)
    }

    pub fn kerning(&self, left: char, right: char) -> Sp {
        self.font.kerning(left, right, self.size)
    }

    pub fn transform_ligatures(&self, text: &str) -> String {
        self.font.transform_ligatures(text)
    }

    pub fn draw(
        &self,
        text: &str,
        x: Sp,
        y: Sp,
        sink: &mut dyn ContentSink,
    ) -> Result<(), RenderError> {
        self.font.draw(text, self.size, x, y, sink)
    }

    /// Whether two sized fonts refer to the same underlying font at the same
    /// size, so that their text runs can be merged.
    pub fn is_same(&self, other: &SizedFont) -> bool {
        Arc::ptr_eq(&self.font, &other.font) && (self.size - other.size).abs() < 0.001
    }
}

impl PartialEq for SizedFont {
    fn eq(&self, other: &SizedFont) -> bool {
        self.is_same(other)
    }
}

impl fmt::Debug for SizedFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SizedFont({}pt)", self.size)
    }
}
