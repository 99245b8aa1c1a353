use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("no font for typeface \"{typeface}\" variant {variant:?}")]
    NotFound {
        typeface: String,
        variant: crate::FontVariant,
    },
    #[error("failed to load font {name}: {message}")]
    LoadFailed { name: String, message: String },
    #[error("invalid font data: {0}")]
    InvalidData(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("neither primary nor fallback font can draw '{0}' (U+{1:04X})")]
    UnsupportedCodepoint(char, u32),
}
