use quire_types::Sp;

use crate::{ContentSink, Font, FontRef, Metrics, RenderError};

/// A font with a fallback. All operations forward to the primary font except
/// for codepoints it doesn't cover, which go to the fallback. Useful for
/// scripts like Hebrew that the preferred book face may not carry.
pub struct FailoverFont {
    primary: FontRef,
    fallback: FontRef,
}

impl FailoverFont {
    pub fn new(primary: FontRef, fallback: FontRef) -> FailoverFont {
        FailoverFont { primary, fallback }
    }
}

impl Font for FailoverFont {
    fn has_character(&self, ch: char) -> bool {
        self.primary.has_character(ch) || self.fallback.has_character(ch)
    }

    fn space_width(&self, size: f64) -> Sp {
        // Always the primary font's space.
        self.primary.space_width(size)
    }

    fn character_metrics(&self, ch: char, size: f64) -> Metrics {
        if self.primary.has_character(ch) {
            self.primary.character_metrics(ch, size)
        } else {
            self.fallback.character_metrics(ch, size)
        }
    }

    fn kerning(&self, left: char, right: char, size: f64) -> Sp {
        // A kern pair only makes sense within one font.
        if self.primary.has_character(left) && self.primary.has_character(right) {
            self.primary.kerning(left, right, size)
        } else if self.fallback.has_character(left) && self.fallback.has_character(right) {
            self.fallback.kerning(left, right, size)
        } else {
            0
        }
    }

    fn transform_ligatures(&self, text: &str) -> String {
        self.primary.transform_ligatures(text)
    }

    fn draw(
        &self,
        text: &str,
        size: f64,
        x: Sp,
        y: Sp,
        sink: &mut dyn ContentSink,
    ) -> Result<(), RenderError> {
        // Draw one codepoint at a time, dispatching to whichever font covers it.
        let mut x = x;
        for ch in text.chars() {
            let font = if self.primary.has_character(ch) {
                &self.primary
            } else if self.fallback.has_character(ch) {
                &self.fallback
            } else {
                return Err(RenderError::UnsupportedCodepoint(ch, ch as u32));
            };
            font.draw(ch.encode_utf8(&mut [0; 4]), size, x, y, sink)?;
            x += font.character_metrics(ch, size).width;
        }
        Ok(())
    }
}
