//! Book-grade typesetting: TeX-style optimal line and page breaking with
//! hyphenation, ligatures, kerning, bidirectional text, footnote and section
//! tracking.
//!
//! This crate re-exports the member crates of the workspace:
//!
//! - [`types`]: scaled points, distance parsing, roman numerals
//! - [`font`]: the font contract, failover composition and caching
//! - [`hyphen`]: Liang pattern hyphenation
//! - [`text`]: the block/span model and locale punctuation post-processing
//! - [`typeset`]: the element model, breaker and assemblers

pub use quire_font as font;
pub use quire_hyphen as hyphen;
pub use quire_text as text;
pub use quire_types as types;
pub use quire_typeset as typeset;

pub use quire_font::{
    ContentSink, FailoverFont, Font, FontManager, FontPack, FontVariant, Metrics, SizedFont,
    Typeface,
};
pub use quire_hyphen::HyphenDictionary;
pub use quire_text::{Block, BlockBuilder, BlockType, FontVariantFlags, Span, TextSpan};
pub use quire_types::{parse_distance, Distance, Sp, SpaceUnit};
pub use quire_typeset::{
    Bookmark, Bookmarks, BreakerConfig, Element, HorizontalList, Page, SectionKind, Sections,
    VerticalList,
};
