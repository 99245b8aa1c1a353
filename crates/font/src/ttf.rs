use std::path::Path;
use std::sync::Arc;

use quire_types::Sp;
use ttf_parser::{Face, GlyphId};

use crate::{
    transform_standard_ligatures, ContentSink, Font, FontError, Metrics, RenderError,
    NO_CHARACTER,
};

const SP_PER_PT: f64 = 65_536.0;

/// A font backed by a TrueType/OpenType file, supplying real advances,
/// bounding boxes and `kern`-table pair kerning.
///
/// The face is re-parsed from the shared bytes on each use; parsing only
/// reads the table directory, so this is cheap and avoids a self-referential
/// struct.
pub struct TtfFont {
    name: String,
    data: Arc<Vec<u8>>,
    units_per_em: f64,
}

impl TtfFont {
    pub fn from_data(name: impl Into<String>, data: Vec<u8>) -> Result<TtfFont, FontError> {
        let name = name.into();
        let face = Face::parse(&data, 0)
            .map_err(|e| FontError::InvalidData(format!("{name}: {e}")))?;
        let units_per_em = face.units_per_em() as f64;
        Ok(TtfFont {
            name,
            data: Arc::new(data),
            units_per_em,
        })
    }

    pub fn from_path(path: &Path) -> Result<TtfFont, FontError> {
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let data = std::fs::read(path).map_err(|e| FontError::LoadFailed {
            name: path.display().to_string(),
            message: e.to_string(),
        })?;
        TtfFont::from_data(name, data)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// A lightweight view over the font data. Parsing was validated in
    /// `from_data`, so this cannot fail.
    fn face(&self) -> Face<'_> {
        Face::parse(&self.data, 0).expect("font data was validated at construction")
    }

    fn units_to_sp(&self, units: f64, size: f64) -> Sp {
        (units * size * SP_PER_PT / self.units_per_em).round() as Sp
    }

    fn glyph(&self, face: &Face<'_>, ch: char) -> Option<GlyphId> {
        face.glyph_index(ch)
    }
}

impl Font for TtfFont {
    fn has_character(&self, ch: char) -> bool {
        self.face().glyph_index(ch).is_some()
    }

    fn space_width(&self, size: f64) -> Sp {
        self.character_metrics(' ', size).width
    }

    fn character_metrics(&self, ch: char, size: f64) -> Metrics {
        let face = self.face();
        let Some(glyph) = self.glyph(&face, ch) else {
            return Metrics::default();
        };

        let width = face
            .glyph_hor_advance(glyph)
            .map(|advance| self.units_to_sp(advance as f64, size))
            .unwrap_or(0);

        let (height, depth) = match face.glyph_bounding_box(glyph) {
            Some(bbox) => (
                self.units_to_sp(bbox.y_max.max(0) as f64, size),
                self.units_to_sp((-bbox.y_min).max(0) as f64, size),
            ),
            // Blank glyphs such as the space have no outline.
            None => (0, 0),
        };

        Metrics {
            width,
            height,
            depth,
        }
    }

    fn kerning(&self, left: char, right: char, size: f64) -> Sp {
        if left == NO_CHARACTER || right == NO_CHARACTER {
            return 0;
        }

        let face = self.face();
        let (Some(left), Some(right)) = (self.glyph(&face, left), self.glyph(&face, right))
        else {
            return 0;
        };

        let Some(kern) = face.tables().kern else {
            return 0;
        };
        for subtable in kern.subtables {
            if !subtable.horizontal || subtable.variable {
                continue;
            }
            if let Some(value) = subtable.glyphs_kerning(left, right) {
                return self.units_to_sp(value as f64, size);
            }
        }
        0
    }

    fn transform_ligatures(&self, text: &str) -> String {
        transform_standard_ligatures(text, |ch| self.has_character(ch))
    }

    fn draw(
        &self,
        text: &str,
        size: f64,
        x: Sp,
        y: Sp,
        sink: &mut dyn ContentSink,
    ) -> Result<(), RenderError> {
        sink.set_font(&self.name, size);
        sink.draw_glyphs(x, y, text);
        Ok(())
    }
}
