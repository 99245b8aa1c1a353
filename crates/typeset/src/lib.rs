//! The quire typesetting engine.
//!
//! Semantic text runs go into a [`HorizontalList`], which assembles words,
//! hyphenation points, ligatures and kerns into an element stream; the shared
//! optimal-fit [breaker](breaker) turns that stream into justified lines. The
//! lines go into a [`VerticalList`], which maintains baseline spacing and
//! column layout; the same breaker turns it into [`Page`]s. [`Bookmarks`] and
//! [`Sections`] are derived from the pages afterwards.

pub mod breaker;
pub mod element;

mod bookmarks;
mod horizontal;
mod sections;
mod vertical;

pub use bookmarks::Bookmarks;
pub use breaker::{BreakOutcome, BreakableList, BreakerConfig, Breakpoint, Chunk};
pub use element::{
    Bookmark, CharDirection, ColumnLayout, Columns, Discretionary, Element, Flexibility, Glue,
    HBox, Image, Kern, Page, Penalty, Rule, SectionBookmark, SectionKind, Text, VBox,
};
pub use horizontal::HorizontalList;
pub use sections::Sections;
pub use vertical::VerticalList;

#[cfg(test)]
mod test_utils;
