#![cfg(test)]

//! Deterministic fixed-metrics fonts for exercising the assemblers without
//! font files.

use std::collections::HashMap;
use std::sync::Arc;

use quire_font::{
    transform_standard_ligatures, ContentSink, Font, Metrics, RenderError, SizedFont,
    NO_CHARACTER,
};
use quire_types::{Sp, SpaceUnit};

/// Route the engine's warnings through the test harness.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every character is one point-size wide (so 10pt type gives 10pt glyphs),
/// spaces half that. Kern pairs and ligature support are configurable.
pub struct FakeFont {
    kern_pairs: HashMap<(char, char), Sp>,
    ligatures: bool,
}

impl FakeFont {
    pub fn new() -> FakeFont {
        FakeFont {
            kern_pairs: HashMap::new(),
            ligatures: false,
        }
    }

    pub fn with_ligatures() -> FakeFont {
        FakeFont {
            kern_pairs: HashMap::new(),
            ligatures: true,
        }
    }

    pub fn kern(mut self, left: char, right: char, amount: Sp) -> FakeFont {
        self.kern_pairs.insert((left, right), amount);
        self
    }

    pub fn sized(self, size: f64) -> SizedFont {
        SizedFont::new(Arc::new(self), size)
    }
}

impl Font for FakeFont {
    fn has_character(&self, _ch: char) -> bool {
        true
    }

    fn space_width(&self, size: f64) -> Sp {
        SpaceUnit::Pt.to_sp(size) / 2
    }

    fn character_metrics(&self, _ch: char, size: f64) -> Metrics {
        let em = SpaceUnit::Pt.to_sp(size);
        Metrics {
            width: em,
            height: em * 7 / 10,
            depth: em * 3 / 10,
        }
    }

    fn kerning(&self, left: char, right: char, _size: f64) -> Sp {
        if left == NO_CHARACTER || right == NO_CHARACTER {
            return 0;
        }
        self.kern_pairs.get(&(left, right)).copied().unwrap_or(0)
    }

    fn transform_ligatures(&self, text: &str) -> String {
        if self.ligatures {
            transform_standard_ligatures(text, |_| true)
        } else {
            text.to_string()
        }
    }

    fn draw(
        &self,
        text: &str,
        size: f64,
        x: Sp,
        y: Sp,
        sink: &mut dyn ContentSink,
    ) -> Result<(), RenderError> {
        sink.set_font("fake", size);
        sink.draw_glyphs(x, y, text);
        Ok(())
    }
}

/// Flatten the text content of a line, in order, ignoring non-text elements.
pub fn line_text(elements: &[crate::Element]) -> String {
    let mut out = String::new();
    for element in elements {
        match element {
            crate::Element::Text(text) => out.push_str(text.text()),
            crate::Element::HBox(hbox) => out.push_str(&line_text(hbox.elements())),
            _ => {}
        }
    }
    out
}
