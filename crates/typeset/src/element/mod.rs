//! Everything that can appear in a horizontal or vertical list.
//!
//! The element model is a tagged enum: boxes (text, hbox, vbox, rule), glue,
//! kerns, penalties, discretionary breaks, column groups, whole-page images
//! and zero-size bookmarks. A [`Page`] is the root output box produced by the
//! vertical breaker.
//!
//! Elements are append-only during assembly. The breakers read them, select
//! break points, and materialize new boxes without mutating the originals;
//! only the ligature and bidi passes split `Text` elements, and those produce
//! new `Text`s.

mod bookmark;
mod boxes;
mod columns;
mod discretionary;
mod glue;
mod page;
mod text;

pub use bookmark::{Bookmark, SectionBookmark, SectionKind};
pub use boxes::{HBox, Rule, VBox};
pub use columns::{ColumnLayout, Columns};
pub use discretionary::Discretionary;
pub use glue::{Flexibility, Glue};
pub use page::Page;
pub use text::{CharDirection, Text};

use quire_font::ContentSink;
use quire_types::Sp;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq)]
pub enum Element {
    Text(Text),
    HBox(HBox),
    VBox(VBox),
    Glue(Glue),
    Kern(Kern),
    Penalty(Penalty),
    Discretionary(Discretionary),
    Rule(Rule),
    Columns(Columns),
    Image(Image),
    Bookmark(Bookmark),
}

/// A rigid offset between elements. Kerns inserted by the kerning pass are
/// implicit; implicit kerns are discarded after a chosen break point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kern {
    amount: Sp,
    explicit: bool,
}

impl Kern {
    pub fn new(amount: Sp, explicit: bool) -> Kern {
        Kern { amount, explicit }
    }

    /// A kern inserted by the kerning pass.
    pub fn implicit(amount: Sp) -> Kern {
        Kern::new(amount, false)
    }

    pub fn amount(&self) -> Sp {
        self.amount
    }

    pub fn is_explicit(&self) -> bool {
        self.explicit
    }
}

/// A break-point cost. Costs at or beyond [`Penalty::INFINITY`] forbid a
/// break; at or beyond the negative infinity they force one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Penalty {
    cost: i64,
    even_pages_only: bool,
}

impl Penalty {
    /// Sentinel beyond which a penalty means "never break here" (and its
    /// negation "always break here").
    pub const INFINITY: i64 = 10_000;

    pub fn new(cost: i64) -> Penalty {
        Penalty {
            cost,
            even_pages_only: false,
        }
    }

    /// A penalty that only exists at the bottom of even pages; used to force
    /// content onto odd pages.
    pub fn even_pages_only(cost: i64) -> Penalty {
        Penalty {
            cost,
            even_pages_only: true,
        }
    }

    pub fn cost(&self) -> i64 {
        self.cost
    }

    pub fn is_even_pages_only(&self) -> bool {
        self.even_pages_only
    }

    pub fn is_forced(&self) -> bool {
        self.cost <= -Penalty::INFINITY
    }
}

/// A whole-page image. It rides along in the lists with no size of its own;
/// the page breaker pulls each one out onto its own physical page and bumps
/// the page counter accordingly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    pub path: PathBuf,
    pub natural_width: Sp,
    pub natural_height: Sp,
}

impl Element {
    /// Horizontal extent.
    pub fn width(&self) -> Sp {
        match self {
            Element::Text(text) => text.metrics().width,
            Element::HBox(hbox) => hbox.width(),
            Element::VBox(vbox) => vbox.width(),
            Element::Glue(glue) => {
                if glue.is_horizontal() {
                    glue.size()
                } else {
                    0
                }
            }
            Element::Kern(kern) => kern.amount(),
            Element::Penalty(_) => 0,
            Element::Discretionary(discretionary) => discretionary.no_break().width(),
            Element::Rule(rule) => rule.width(),
            Element::Columns(columns) => columns.width(),
            Element::Image(_) => 0,
            Element::Bookmark(_) => 0,
        }
    }

    /// Extent above the baseline.
    pub fn height(&self) -> Sp {
        match self {
            Element::Text(text) => text.metrics().height,
            Element::HBox(hbox) => hbox.height(),
            Element::VBox(vbox) => vbox.height(),
            Element::Discretionary(discretionary) => discretionary.no_break().height(),
            Element::Rule(rule) => rule.height(),
            Element::Columns(columns) => columns.height(),
            _ => 0,
        }
    }

    /// Extent below the baseline.
    pub fn depth(&self) -> Sp {
        match self {
            Element::Text(text) => text.metrics().depth,
            Element::HBox(hbox) => hbox.depth(),
            Element::VBox(vbox) => vbox.depth(),
            Element::Discretionary(discretionary) => discretionary.no_break().depth(),
            Element::Rule(rule) => rule.depth(),
            Element::Columns(columns) => columns.depth(),
            _ => 0,
        }
    }

    /// Extent along the vertical axis, for page breaking.
    pub fn vertical_size(&self) -> Sp {
        match self {
            Element::Glue(glue) => {
                if glue.is_horizontal() {
                    0
                } else {
                    glue.size()
                }
            }
            Element::Kern(kern) => kern.amount(),
            Element::Penalty(_) | Element::Image(_) | Element::Bookmark(_) => 0,
            _ => self.height() + self.depth(),
        }
    }

    /// Whether the element is dropped when it immediately follows a chosen
    /// break point.
    pub fn is_discardable(&self) -> bool {
        match self {
            Element::Glue(_) | Element::Penalty(_) => true,
            Element::Kern(kern) => !kern.is_explicit(),
            _ => false,
        }
    }

    /// Lay the element out with its reference point at (x, y) on the
    /// baseline, returning the width to advance by. The y axis points up.
    pub fn lay_out_horizontally(
        &self,
        x: Sp,
        y: Sp,
        sink: &mut dyn ContentSink,
    ) -> Result<Sp, quire_font::RenderError> {
        match self {
            Element::Text(text) => {
                text.font().draw(text.text(), x, y, sink)?;
                Ok(text.metrics().width)
            }
            Element::HBox(hbox) => hbox.lay_out_horizontally(x, y, sink),
            Element::VBox(vbox) => {
                vbox.lay_out_contents(x, y + vbox.height(), sink)?;
                Ok(vbox.width())
            }
            Element::Rule(rule) => {
                sink.draw_rule(x, y - rule.depth(), rule.width(), rule.height() + rule.depth());
                Ok(rule.width())
            }
            Element::Discretionary(_) => {
                // Discretionaries are replaced by one of their branches when
                // a line is materialized.
                panic!("discretionary elements cannot be laid out directly");
            }
            other => Ok(other.width()),
        }
    }

    /// Lay the element out below y, returning the vertical distance consumed.
    /// The y axis points up, so the next element goes at `y - advance`.
    pub fn lay_out_vertically(
        &self,
        x: Sp,
        y: Sp,
        sink: &mut dyn ContentSink,
    ) -> Result<Sp, quire_font::RenderError> {
        match self {
            Element::Text(_) => {
                // Text must always be inside an HBox.
                panic!("text elements cannot be laid out vertically");
            }
            Element::HBox(hbox) => hbox.lay_out_vertically(x, y, sink),
            Element::VBox(vbox) => {
                vbox.lay_out_contents(x, y, sink)?;
                Ok(vbox.height() + vbox.depth())
            }
            Element::Rule(rule) => {
                sink.draw_rule(x, y - rule.height() - rule.depth(), rule.width(), rule.height() + rule.depth());
                Ok(rule.height() + rule.depth())
            }
            Element::Columns(columns) => columns.lay_out_vertically(x, y, sink),
            other => Ok(other.vertical_size()),
        }
    }

    /// Visit this element and, recursively, the children of any box.
    pub fn visit(&self, visitor: &mut dyn FnMut(&Element)) {
        visitor(self);
        match self {
            Element::HBox(hbox) => {
                for child in hbox.elements() {
                    child.visit(visitor);
                }
            }
            Element::VBox(vbox) => {
                for child in vbox.elements() {
                    child.visit(visitor);
                }
            }
            Element::Columns(columns) => {
                for column in columns.columns() {
                    for child in column.elements() {
                        child.visit(visitor);
                    }
                }
            }
            _ => {}
        }
    }
}

impl From<Text> for Element {
    fn from(text: Text) -> Element {
        Element::Text(text)
    }
}

impl From<HBox> for Element {
    fn from(hbox: HBox) -> Element {
        Element::HBox(hbox)
    }
}

impl From<VBox> for Element {
    fn from(vbox: VBox) -> Element {
        Element::VBox(vbox)
    }
}

impl From<Glue> for Element {
    fn from(glue: Glue) -> Element {
        Element::Glue(glue)
    }
}

impl From<Kern> for Element {
    fn from(kern: Kern) -> Element {
        Element::Kern(kern)
    }
}

impl From<Penalty> for Element {
    fn from(penalty: Penalty) -> Element {
        Element::Penalty(penalty)
    }
}

impl From<Discretionary> for Element {
    fn from(discretionary: Discretionary) -> Element {
        Element::Discretionary(discretionary)
    }
}

impl From<Rule> for Element {
    fn from(rule: Rule) -> Element {
        Element::Rule(rule)
    }
}

impl From<Columns> for Element {
    fn from(columns: Columns) -> Element {
        Element::Columns(columns)
    }
}

impl From<Image> for Element {
    fn from(image: Image) -> Element {
        Element::Image(image)
    }
}

impl From<Bookmark> for Element {
    fn from(bookmark: Bookmark) -> Element {
        Element::Bookmark(bookmark)
    }
}
