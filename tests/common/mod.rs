//! Shared fixtures for the integration tests: a deterministic fixed-metrics
//! font and a recording content sink, so no font files are needed.

use std::collections::HashMap;
use std::sync::Arc;

use quire::font::{
    transform_standard_ligatures, ContentSink, Font, Metrics, RenderError, SizedFont,
    NO_CHARACTER,
};
use quire::{Sp, SpaceUnit};

/// Route the engine's warnings through the test harness.
#[allow(dead_code)]
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Every character is one point-size wide, spaces half that.
pub struct TestFont {
    kern_pairs: HashMap<(char, char), Sp>,
    ligatures: bool,
}

#[allow(dead_code)]
impl TestFont {
    pub fn new() -> TestFont {
        TestFont {
            kern_pairs: HashMap::new(),
            ligatures: false,
        }
    }

    pub fn with_ligatures() -> TestFont {
        TestFont {
            kern_pairs: HashMap::new(),
            ligatures: true,
        }
    }

    pub fn kern(mut self, left: char, right: char, amount: Sp) -> TestFont {
        self.kern_pairs.insert((left, right), amount);
        self
    }

    pub fn sized(self, size: f64) -> SizedFont {
        SizedFont::new(Arc::new(self), size)
    }
}

impl Font for TestFont {
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
        sink.set_font("test", size);
        sink.draw_glyphs(x, y, text);
        Ok(())
    }
}

/// Records everything drawn into it.
#[derive(Default)]
pub struct RecordingSink {
    pub ops: Vec<DrawOp>,
}

#[derive(Debug, Clone, PartialEq)]
#[allow(dead_code)]
pub enum DrawOp {
    SetFont { name: String, size: f64 },
    Glyphs { x: Sp, y: Sp, text: String },
    Rule { x: Sp, y: Sp, width: Sp, height: Sp },
}

impl ContentSink for RecordingSink {
    fn set_font(&mut self, font_name: &str, size: f64) {
        self.ops.push(DrawOp::SetFont {
            name: font_name.to_string(),
            size,
        });
    }

    fn draw_glyphs(&mut self, x: Sp, y: Sp, text: &str) {
        self.ops.push(DrawOp::Glyphs {
            x,
            y,
            text: text.to_string(),
        });
    }

    fn draw_rule(&mut self, x: Sp, y: Sp, width: Sp, height: Sp) {
        self.ops.push(DrawOp::Rule {
            x,
            y,
            width,
            height,
        });
    }
}

/// The text drawn to a sink, concatenated in order.
#[allow(dead_code)]
pub fn drawn_text(sink: &RecordingSink) -> String {
    sink.ops
        .iter()
        .filter_map(|op| match op {
            DrawOp::Glyphs { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect()
}
