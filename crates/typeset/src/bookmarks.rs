//! Collects bookmarks from finished pages.

use std::collections::{BTreeMap, HashMap};
use std::io::{self, Write};

use crate::element::{Bookmark, Element, Page};

/// The bookmarks of a document and the physical pages they landed on.
#[derive(Debug, Clone, Default)]
pub struct Bookmarks {
    by_page: BTreeMap<usize, Vec<Bookmark>>,
    label_to_page: HashMap<String, usize>,
}

impl Bookmarks {
    pub fn empty() -> Bookmarks {
        Bookmarks::default()
    }

    /// Walk every page's elements, including those nested in line boxes, and
    /// record each bookmark against the page it fell on.
    pub fn from_pages(pages: &[Page]) -> Bookmarks {
        let mut bookmarks = Bookmarks::empty();
        for page in pages {
            page.visit(&mut |element| {
                if let Element::Bookmark(bookmark) = element {
                    bookmarks.add(page.physical_page_number(), bookmark.clone());
                }
            });
        }
        bookmarks
    }

    fn add(&mut self, physical_page_number: usize, bookmark: Bookmark) {
        if let Bookmark::Label(name) = &bookmark {
            self.label_to_page.insert(name.clone(), physical_page_number);
        }
        self.by_page.entry(physical_page_number).or_default().push(bookmark);
    }

    /// All bookmarks in page order.
    pub fn entries(&self) -> impl Iterator<Item = (usize, &Bookmark)> {
        self.by_page
            .iter()
            .flat_map(|(&page, bookmarks)| bookmarks.iter().map(move |bookmark| (page, bookmark)))
    }

    /// The physical page a label landed on.
    pub fn page_for_label(&self, name: &str) -> Option<usize> {
        self.label_to_page.get(name).copied()
    }

    /// Dump all bookmarks, ordered by page number.
    pub fn dump(&self, out: &mut dyn Write) -> io::Result<()> {
        writeln!(out, "Bookmarks:")?;
        for (page, bookmark) in self.entries() {
            writeln!(out, "{page:4}: {bookmark:?}")?;
        }
        Ok(())
    }
}
