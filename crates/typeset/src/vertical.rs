//! The vertical assembler.
//!
//! Accumulates lines and vertical material until the document is finished,
//! maintaining a constant baseline-to-baseline distance and the column
//! layout in effect, then formats the list into pages.

use std::collections::BTreeMap;

use quire_types::{Sp, SpaceUnit};

use crate::breaker::{
    break_list, BreakOutcome, BreakableList, BreakerConfig, Breakpoint, Chunk,
};
use crate::element::{ColumnLayout, Columns, Element, Glue, Page, Penalty};

/// Accumulates elements in a vertical list until the document is finished,
/// then formats them into pages.
pub struct VerticalList {
    elements: Vec<Element>,
    /// Depth of the last box added.
    previous_depth: Sp,
    /// Whether we've seen a box yet.
    saw_hbox: bool,
    /// Height of the first box, for callers that baseline-align the result.
    first_hbox_height: Sp,
    /// Desired distance between consecutive baselines.
    baseline_skip: Sp,
    /// The column layout in effect from each element index forward.
    column_changes: BTreeMap<usize, ColumnLayout>,
}

impl Default for VerticalList {
    fn default() -> VerticalList {
        VerticalList::new()
    }
}

impl VerticalList {
    pub fn new() -> VerticalList {
        let mut list = VerticalList {
            elements: Vec::new(),
            previous_depth: 0,
            saw_hbox: false,
            first_hbox_height: 0,
            // Default for an 11pt font.
            baseline_skip: SpaceUnit::Pt.to_sp(11.0 * 1.2),
            column_changes: BTreeMap::new(),
        };
        list.change_column_layout(ColumnLayout::single());
        list
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Append an element. A glue is inserted before each box after the first
    /// so that baselines stay `baseline_skip` apart.
    pub fn add_element(&mut self, element: Element) {
        debug_assert!(
            !matches!(element, Element::Text(_) | Element::Discretionary(_)),
            "text and discretionaries cannot appear in a vertical list"
        );

        if let Element::HBox(hbox) = &element {
            if self.saw_hbox {
                let skip = (self.baseline_skip - self.previous_depth - hbox.height()).max(0);
                self.elements.push(Element::Glue(Glue::fixed(skip, false)));
            } else {
                self.first_hbox_height = hbox.height();
            }

            self.previous_depth = hbox.depth();
            self.saw_hbox = true;
        }

        self.elements.push(element);
    }

    /// The distance between baselines.
    pub fn baseline_skip(&self) -> Sp {
        self.baseline_skip
    }

    /// Set the distance between baselines, normally scaled by the font size
    /// (for example 120% of it). Change it between paragraphs when the font
    /// size changes. Returns the previous value.
    pub fn set_baseline_skip(&mut self, baseline_skip: Sp) -> Sp {
        std::mem::replace(&mut self.baseline_skip, baseline_skip)
    }

    /// The height of the first box added.
    pub fn first_hbox_height(&self) -> Sp {
        self.first_hbox_height
    }

    /// The depth of the most recent box added.
    pub fn last_hbox_depth(&self) -> Sp {
        self.previous_depth
    }

    /// Use a new column layout for everything added from now on.
    pub fn change_column_layout(&mut self, column_layout: ColumnLayout) {
        self.column_changes.insert(self.elements.len(), column_layout);
    }

    fn column_layout_for_element(&self, element_index: usize) -> ColumnLayout {
        *self
            .column_changes
            .range(..=element_index)
            .next_back()
            .map(|(_, layout)| layout)
            .expect("every element must be covered by a column layout")
    }

    /// Eject the current page if anything is on it.
    pub fn new_page(&mut self) {
        if !self.elements.is_empty() {
            self.eject_page();
        }
    }

    /// Like [`VerticalList::new_page`], but guarantees the following content
    /// starts on an odd page.
    ///
    /// Two infinite glues separated by a neutral penalty, then a forced
    /// penalty that only exists at the bottom of even pages. The breaker
    /// either takes the neutral break (when the page is odd) or the forced
    /// one, inserting a blank page when that is what it takes to come out
    /// odd. This relies on no other infinite vertical glue being on the
    /// page.
    pub fn odd_page(&mut self) {
        if !self.elements.is_empty() {
            self.add_element(Element::Glue(Glue::infinite(false)));
            self.add_element(Element::Penalty(Penalty::new(0)));
            self.add_element(Element::Glue(Glue::infinite(false)));
            self.add_element(Element::Penalty(Penalty::even_pages_only(
                -Penalty::INFINITY,
            )));
        }
    }

    /// Fill the rest of the page with glue and force a page break.
    pub fn eject_page(&mut self) {
        self.add_element(Element::Glue(Glue::infinite(false)));
        self.add_element(Element::Penalty(Penalty::new(-Penalty::INFINITY)));
    }

    /// Break the list into pages against the page height.
    pub fn break_pages(&self, page_height: Sp, config: &BreakerConfig) -> BreakOutcome<Page> {
        self.break_pages_from(page_height, config, 1)
    }

    /// Like [`VerticalList::break_pages`], numbering physical pages from
    /// `first_page_number`.
    pub fn break_pages_from(
        &self,
        page_height: Sp,
        config: &BreakerConfig,
        first_page_number: usize,
    ) -> BreakOutcome<Page> {
        break_list(self, page_height, config, first_page_number)
    }

    /// Break the list into pages and return them.
    pub fn format(&self, page_height: Sp, config: &BreakerConfig) -> Vec<Page> {
        self.break_pages(page_height, config).boxes
    }
}

impl BreakableList for VerticalList {
    type Output = Page;

    fn elements(&self) -> &[Element] {
        &self.elements
    }

    fn element_size(&self, element: &Element) -> Sp {
        element.vertical_size()
    }

    fn make_output_box(&self, elements: Vec<Element>, counter: usize, shift: Sp) -> Page {
        Page::new(elements, counter, shift)
    }

    /// The elements of one page, begin inclusive and end exclusive, with
    /// stretches sharing a multi-column layout grouped into Columns
    /// elements.
    fn element_sublist(&self, begin: &Breakpoint, end: &Breakpoint) -> Vec<Element> {
        let begin_index = begin.start_index();
        let end_index = end.index().min(self.elements.len());

        let mut elements = Vec::with_capacity(end_index.saturating_sub(begin_index));

        let mut i = begin_index;
        while i < end_index {
            let column_layout = self.column_layout_for_element(i);

            if column_layout.count() > 1 {
                // Group the run of elements sharing this layout.
                let first_index = i;
                let mut last_index = first_index;
                while last_index < end_index - 1
                    && column_layout == self.column_layout_for_element(last_index + 1)
                {
                    last_index += 1;
                }
                i = last_index;

                elements.push(Element::Columns(Columns::create(
                    self.elements[first_index..=last_index].to_vec(),
                    column_layout,
                )));
            } else {
                elements.push(self.elements[i].clone());
            }

            i += 1;
        }

        elements
    }

    fn chunk_extra_increment(&self, chunk: &Chunk) -> usize {
        // Each whole-page image takes up one page number.
        chunk.images().len()
    }
}
