use quire_font::{ContentSink, RenderError};
use quire_types::Sp;

use super::Element;

/// One physical page of output: the root box the vertical breaker produces.
#[derive(Debug, Clone, PartialEq)]
pub struct Page {
    elements: Vec<Element>,
    physical_page_number: usize,
    /// Downward displacement applied to the whole page's content.
    shift: Sp,
}

impl Page {
    pub fn new(elements: Vec<Element>, physical_page_number: usize, shift: Sp) -> Page {
        Page {
            elements,
            physical_page_number,
            shift,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// The 1-based count of output pages. The printed label may differ; see
    /// `Sections::page_number_label`.
    pub fn physical_page_number(&self) -> usize {
        self.physical_page_number
    }

    pub fn shift(&self) -> Sp {
        self.shift
    }

    /// Visit every element on the page, including those nested in boxes.
    pub fn visit(&self, visitor: &mut dyn FnMut(&Element)) {
        for element in &self.elements {
            element.visit(visitor);
        }
    }

    /// Draw the page contents with the text area's top-left corner at (x, y).
    pub fn lay_out(&self, x: Sp, y: Sp, sink: &mut dyn ContentSink) -> Result<(), RenderError> {
        let mut y = y - self.shift;
        for element in &self.elements {
            y -= element.lay_out_vertically(x, y, sink)?;
        }
        Ok(())
    }
}
