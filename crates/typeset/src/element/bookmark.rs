use serde::{Deserialize, Serialize};
use std::fmt;

use super::VBox;

/// A zero-size marker that rides along in the element lists. Bookmarks are
/// never discarded by the breakers; after pagination they are collected from
/// the pages they landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum Bookmark {
    /// The start of a part, chapter or other section.
    Section(SectionBookmark),
    /// A named position, the target of page references.
    Label(String),
    /// An index entry path, most general first.
    Index(Vec<String>),
    /// A footnote, already typeset against the text measure; the page
    /// assembler places it at the bottom of the page the marker lands on.
    Footnote(VBox),
}

impl Bookmark {
    pub fn section(kind: SectionKind, name: impl Into<String>) -> Bookmark {
        Bookmark::Section(SectionBookmark {
            kind,
            name: name.into(),
        })
    }

    pub fn label(name: impl Into<String>) -> Bookmark {
        Bookmark::Label(name.into())
    }
}

/// The kinds of section a book is made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SectionKind {
    Part,
    Chapter,
    MinorSection,
    HalfTitlePage,
    TitlePage,
    CopyrightPage,
    TableOfContents,
    Index,
}

impl SectionKind {
    /// Whether sections of this kind get a table-of-contents entry.
    pub fn included_in_table_of_contents(self) -> bool {
        match self {
            SectionKind::Part
            | SectionKind::Chapter
            | SectionKind::MinorSection
            | SectionKind::Index => true,
            SectionKind::HalfTitlePage
            | SectionKind::TitlePage
            | SectionKind::CopyrightPage
            | SectionKind::TableOfContents => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SectionKind::Part => "Part",
            SectionKind::Chapter => "Chapter",
            SectionKind::MinorSection => "Minor Section",
            SectionKind::HalfTitlePage => "Half Title Page",
            SectionKind::TitlePage => "Title Page",
            SectionKind::CopyrightPage => "Copyright Page",
            SectionKind::TableOfContents => "Table of Contents",
            SectionKind::Index => "Index",
        }
    }
}

impl fmt::Display for SectionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A bookmark marking where a section starts.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionBookmark {
    pub kind: SectionKind,
    pub name: String,
}

impl fmt::Display for SectionBookmark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.kind, self.name)
    }
}
