//! The block/span model the typesetter consumes.
//!
//! A source parser (Markdown or otherwise) produces a sequence of [`Block`]s,
//! each a list of [`Span`]s. This crate defines that contract plus the
//! locale-sensitive punctuation post-processor applied to a block's text
//! before horizontal assembly.

mod block;
mod postprocess;
mod span;

pub use block::{Block, BlockBuilder, BlockType};
pub use span::{
    FootnoteSpan, ImageSpan, IndexSpan, LabelSpan, PageRefSpan, Span, TextSpan,
};

use serde::{Deserialize, Serialize};

/// Which style slots a run of text should be displayed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct FontVariantFlags {
    pub bold: bool,
    pub italic: bool,
    pub small_caps: bool,
    pub code: bool,
}

impl FontVariantFlags {
    /// No styling at all.
    pub const PLAIN: FontVariantFlags = FontVariantFlags {
        bold: false,
        italic: false,
        small_caps: false,
        code: false,
    };

    pub fn bold(mut self, bold: bool) -> FontVariantFlags {
        self.bold = bold;
        self
    }

    pub fn italic(mut self, italic: bool) -> FontVariantFlags {
        self.italic = italic;
        self
    }

    pub fn small_caps(mut self, small_caps: bool) -> FontVariantFlags {
        self.small_caps = small_caps;
        self
    }

    pub fn code(mut self, code: bool) -> FontVariantFlags {
        self.code = code;
        self
    }
}
