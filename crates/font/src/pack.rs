use crate::{FontManager, FontError, FontVariant, SizedFont, Typeface};

/// The set of sized fonts a paragraph style needs: one per style slot, all at
/// the same size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontPack {
    regular: SizedFont,
    bold: SizedFont,
    italic: SizedFont,
    bold_italic: SizedFont,
    small_caps: SizedFont,
    code: SizedFont,
}

impl FontPack {
    /// Build a pack through the manager: the body typeface in each variant,
    /// plus a separate typeface for code.
    pub fn create(
        manager: &FontManager,
        typeface: &Typeface,
        code_typeface: &Typeface,
        size: f64,
    ) -> Result<FontPack, FontError> {
        Ok(FontPack {
            regular: manager.get_sized(typeface, FontVariant::Regular, size)?,
            bold: manager.get_sized(typeface, FontVariant::Bold, size)?,
            italic: manager.get_sized(typeface, FontVariant::Italic, size)?,
            bold_italic: manager.get_sized(typeface, FontVariant::BoldItalic, size)?,
            small_caps: manager.get_sized(typeface, FontVariant::SmallCaps, size)?,
            code: manager.get_sized(code_typeface, FontVariant::Regular, size)?,
        })
    }

    /// Assemble a pack from individual sized fonts.
    pub fn new(
        regular: SizedFont,
        bold: SizedFont,
        italic: SizedFont,
        bold_italic: SizedFont,
        small_caps: SizedFont,
        code: SizedFont,
    ) -> FontPack {
        FontPack {
            regular,
            bold,
            italic,
            bold_italic,
            small_caps,
            code,
        }
    }

    /// A pack using one font for every slot; handy for tests and plain
    /// documents.
    pub fn uniform(font: SizedFont) -> FontPack {
        FontPack {
            regular: font.clone(),
            bold: font.clone(),
            italic: font.clone(),
            bold_italic: font.clone(),
            small_caps: font.clone(),
            code: font,
        }
    }

    pub fn regular(&self) -> &SizedFont {
        &self.regular
    }

    pub fn bold(&self) -> &SizedFont {
        &self.bold
    }

    pub fn italic(&self) -> &SizedFont {
        &self.italic
    }

    pub fn bold_italic(&self) -> &SizedFont {
        &self.bold_italic
    }

    pub fn small_caps(&self) -> &SizedFont {
        &self.small_caps
    }

    pub fn code(&self) -> &SizedFont {
        &self.code
    }
}
