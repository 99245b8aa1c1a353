use std::path::PathBuf;

use crate::{Block, FontVariantFlags};

/// A piece of a block.
#[derive(Debug, Clone, PartialEq)]
pub enum Span {
    Text(TextSpan),
    Image(ImageSpan),
    Footnote(FootnoteSpan),
    Label(LabelSpan),
    Index(IndexSpan),
    PageRef(PageRefSpan),
}

/// A run of text displayed in one style.
#[derive(Debug, Clone, PartialEq)]
pub struct TextSpan {
    pub text: String,
    pub flags: FontVariantFlags,
}

impl TextSpan {
    pub fn new(text: impl Into<String>, flags: FontVariantFlags) -> TextSpan {
        TextSpan {
            text: text.into(),
            flags,
        }
    }
}

/// A whole-page image, with an optional caption block.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSpan {
    pub path: PathBuf,
    pub caption: Option<Block>,
}

/// A footnote; the block is typeset at the bottom of the page the anchor
/// falls on.
#[derive(Debug, Clone, PartialEq)]
pub struct FootnoteSpan {
    pub block: Block,
}

/// Marks a named position the text can refer back to.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelSpan {
    pub name: String,
}

/// An index entry path, most general first ("typography", "kerning").
#[derive(Debug, Clone, PartialEq)]
pub struct IndexSpan {
    pub entries: Vec<String>,
}

/// A reference to a label, replaced by that label's page number.
#[derive(Debug, Clone, PartialEq)]
pub struct PageRefSpan {
    pub name: String,
    pub flags: FontVariantFlags,
}
