use quire_types::Sp;

/// The primitive drawing operations a back-end must provide. The PDF writer
/// is one implementation; tests use recording sinks.
///
/// Coordinates are in scaled points with the y axis pointing up, PDF style.
/// Text is positioned by its left end on the baseline.
pub trait ContentSink {
    /// Select the font for subsequent glyphs.
    fn set_font(&mut self, font_name: &str, size: f64);

    /// Draw a glyph run at the baseline position.
    fn draw_glyphs(&mut self, x: Sp, y: Sp, text: &str);

    /// Fill a rectangle; used for rules.
    fn draw_rule(&mut self, x: Sp, y: Sp, width: Sp, height: Sp);
}
