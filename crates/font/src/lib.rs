//! The font contract of the quire typesetter.
//!
//! The typesetting algorithms never touch font files; they talk to the
//! [`Font`] trait, which supplies character coverage, metrics, pairwise
//! kerning, ligature substitution and drawing onto a [`ContentSink`].
//! [`SizedFont`] binds a font to a point size, [`FailoverFont`] composes a
//! primary font with a fallback for uncovered codepoints, and [`FontManager`]
//! caches loaded fonts per typeface/variant behind a loader callback.

mod error;
mod failover;
mod ligatures;
mod manager;
mod pack;
mod sink;
mod sized;
mod ttf;

pub use error::{FontError, RenderError};
pub use failover::FailoverFont;
pub use ligatures::transform_standard_ligatures;
pub use manager::{FontLoader, FontManager, FontVariant, Typeface, TypefaceVariant};
pub use pack::FontPack;
pub use sink::ContentSink;
pub use sized::SizedFont;
pub use ttf::TtfFont;

use quire_types::Sp;
use std::sync::Arc;

/// Character used as "no previous character" in kerning queries.
pub const NO_CHARACTER: char = '\0';

/// Width, height above the baseline, and depth below it, in scaled points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Metrics {
    pub width: Sp,
    pub height: Sp,
    pub depth: Sp,
}

/// A typeface at no particular size. Sizes are supplied per call; bind a size
/// with [`SizedFont`].
pub trait Font: Send + Sync {
    /// Whether the font can render the codepoint.
    fn has_character(&self, ch: char) -> bool;

    /// The width of the space character at the given point size.
    fn space_width(&self, size: f64) -> Sp;

    /// Metrics of a single codepoint at the given point size. A codepoint the
    /// font does not cover measures zero.
    fn character_metrics(&self, ch: char, size: f64) -> Metrics;

    /// Kerning adjustment between the pair, at the given point size. Returns
    /// zero when there is no kern, and always when either side is
    /// [`NO_CHARACTER`].
    fn kerning(&self, left: char, right: char, size: f64) -> Sp;

    /// Apply the font's ligature table to the string. The default is no
    /// ligatures.
    fn transform_ligatures(&self, text: &str) -> String {
        text.to_string()
    }

    /// Draw the string with its left end at (x, y) on the baseline.
    fn draw(
        &self,
        text: &str,
        size: f64,
        x: Sp,
        y: Sp,
        sink: &mut dyn ContentSink,
    ) -> Result<(), RenderError>;

    /// Metrics of a whole string: ligatures substituted, character metrics
    /// summed. Kerning is not included; the typesetter inserts kerns as
    /// explicit elements.
    fn string_metrics(&self, text: &str, size: f64) -> Metrics {
        let mut metrics = Metrics::default();
        for ch in self.transform_ligatures(text).chars() {
            let m = self.character_metrics(ch, size);
            metrics.width += m.width;
            metrics.height = metrics.height.max(m.height);
            metrics.depth = metrics.depth.max(m.depth);
        }
        metrics
    }
}

/// Shared handle to a font.
pub type FontRef = Arc<dyn Font>;
