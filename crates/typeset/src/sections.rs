//! Keeps track of where the parts, chapters and other sections of the book
//! fall, and derives the printed page labels and running heads.

use std::collections::{BTreeMap, HashMap};

use quire_types::to_roman;

use crate::bookmarks::Bookmarks;
use crate::element::{Bookmark, SectionBookmark, SectionKind};

/// The section structure of a paginated document.
#[derive(Debug, Clone)]
pub struct Sections {
    /// Physical page number to the section starting there.
    page_to_section: BTreeMap<usize, SectionBookmark>,
    section_to_page: HashMap<SectionKind, usize>,
    /// Where roman-numeral numbering starts. Always 1.
    first_front_matter_page: usize,
    /// Where arabic numbering starts: the first part, or first chapter.
    first_body_matter_page: usize,
}

impl Default for Sections {
    fn default() -> Sections {
        Sections {
            page_to_section: BTreeMap::new(),
            section_to_page: HashMap::new(),
            first_front_matter_page: 1,
            first_body_matter_page: 1,
        }
    }
}

impl Sections {
    pub fn new() -> Sections {
        Sections::default()
    }

    /// Work out from the bookmarks where the body starts and which section
    /// any given page belongs to.
    pub fn configure_from_bookmarks(&mut self, bookmarks: &Bookmarks) {
        self.page_to_section.clear();
        self.section_to_page.clear();
        self.first_front_matter_page = 1;

        let mut first_part_page: Option<usize> = None;
        let mut first_chapter_page: Option<usize> = None;

        for (physical_page_number, bookmark) in bookmarks.entries() {
            let Bookmark::Section(section) = bookmark else {
                continue;
            };

            // The body is taken to start at the first part. A book with only
            // chapters starts its body at the first chapter.
            if section.kind == SectionKind::Part {
                first_part_page = Some(
                    first_part_page.map_or(physical_page_number, |page| page.min(physical_page_number)),
                );
            }
            if section.kind == SectionKind::Chapter {
                first_chapter_page = Some(
                    first_chapter_page
                        .map_or(physical_page_number, |page| page.min(physical_page_number)),
                );
            }

            if let Some(existing) = self.page_to_section.get(&physical_page_number) {
                // We can't show the logical page here; the body start isn't
                // known yet.
                log::warn!(
                    "duplicate sections for physical page {physical_page_number} ({existing} and {section})"
                );
            } else {
                self.page_to_section
                    .insert(physical_page_number, section.clone());
                self.section_to_page.insert(section.kind, physical_page_number);
            }
        }

        self.first_body_matter_page = match first_part_page.or(first_chapter_page) {
            Some(page) => page,
            None => {
                log::warn!("never found the book's body");
                1
            }
        };
    }

    /// The section starting on the page, if any.
    pub fn section_bookmark_for_page(&self, physical_page_number: usize) -> Option<&SectionBookmark> {
        self.page_to_section.get(&physical_page_number)
    }

    /// The sections in page order.
    pub fn sections(&self) -> impl Iterator<Item = (usize, &SectionBookmark)> {
        self.page_to_section
            .iter()
            .map(|(&page, section)| (page, section))
    }

    /// Whether the book has any parts.
    pub fn has_parts(&self) -> bool {
        self.page_to_section
            .values()
            .any(|section| section.kind == SectionKind::Part)
    }

    /// The physical page where arabic numbering starts.
    pub fn first_body_matter_page(&self) -> usize {
        self.first_body_matter_page
    }

    /// Whether a running head should be drawn on the page: not on pages that
    /// start a section, and not before the table of contents.
    pub fn should_draw_headline(&self, physical_page_number: usize) -> bool {
        if self.page_to_section.contains_key(&physical_page_number) {
            return false;
        }

        if let Some(&toc_page) = self.section_to_page.get(&SectionKind::TableOfContents) {
            if physical_page_number < toc_page {
                return false;
            }
        }

        true
    }

    /// The printed label for the page: lowercase roman in the front matter,
    /// arabic in the body, both numbered from 1 within their stretch.
    pub fn page_number_label(&self, physical_page_number: usize) -> String {
        if physical_page_number >= self.first_body_matter_page {
            (physical_page_number - self.first_body_matter_page + 1).to_string()
        } else {
            to_roman((physical_page_number - self.first_front_matter_page + 1) as u32)
        }
    }

    /// The running head for the page: the book title on verso (even) pages,
    /// the nearest preceding section name on recto (odd) pages.
    pub fn headline_label(&self, physical_page_number: usize, title: &str) -> String {
        if physical_page_number % 2 == 1 {
            if let Some((_, section)) = self
                .page_to_section
                .range(..=physical_page_number)
                .next_back()
            {
                return section.name.clone();
            }
        }

        title.to_string()
    }
}
