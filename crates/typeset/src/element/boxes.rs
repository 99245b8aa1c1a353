use quire_font::{ContentSink, RenderError, SizedFont};
use quire_types::Sp;

use super::{Element, Text};

/// A box arranging its children horizontally: a line, or a fragment of one
/// inside a discretionary.
#[derive(Debug, Clone, PartialEq)]
pub struct HBox {
    elements: Vec<Element>,
    width: Sp,
    height: Sp,
    depth: Sp,
    /// Downward displacement of the whole box from the surrounding baseline.
    shift: Sp,
}

impl HBox {
    pub fn new(elements: Vec<Element>) -> HBox {
        HBox::with_shift(elements, 0)
    }

    pub fn with_shift(elements: Vec<Element>, shift: Sp) -> HBox {
        let mut width = 0;
        let mut height: Sp = 0;
        let mut depth: Sp = 0;
        for element in &elements {
            width += element.width();
            height = height.max(element.height());
            depth = depth.max(element.depth());
        }
        HBox {
            elements,
            width,
            height,
            depth,
            shift,
        }
    }

    /// A box holding the single string, or nothing for an empty string. Used
    /// for the three branches of a discretionary.
    pub fn make_only_string(text: &str, font: &SizedFont) -> HBox {
        if text.is_empty() {
            HBox::new(Vec::new())
        } else {
            HBox::new(vec![Text::new(text, font.clone()).into()])
        }
    }

    /// The string of a box created by [`HBox::make_only_string`].
    ///
    /// # Panics
    ///
    /// Panics if the box holds anything other than a single Text element or
    /// nothing.
    pub fn only_string(&self) -> &str {
        match self.elements.as_slice() {
            [] => "",
            [Element::Text(text)] => text.text(),
            _ => panic!("hbox does not hold exactly one string"),
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn width(&self) -> Sp {
        self.width
    }

    pub fn height(&self) -> Sp {
        self.height
    }

    pub fn depth(&self) -> Sp {
        self.depth
    }

    pub fn shift(&self) -> Sp {
        self.shift
    }

    /// Draw the children left to right from (x, y), honoring the shift.
    pub fn lay_out_horizontally(
        &self,
        x: Sp,
        y: Sp,
        sink: &mut dyn ContentSink,
    ) -> Result<Sp, RenderError> {
        let baseline = y - self.shift;
        let mut x = x;
        for element in &self.elements {
            x += element.lay_out_horizontally(x, baseline, sink)?;
        }
        Ok(self.width)
    }

    /// Draw the box as a line in a vertical flow: the baseline sits `height`
    /// below y, and the box consumes `height + depth`.
    pub fn lay_out_vertically(
        &self,
        x: Sp,
        y: Sp,
        sink: &mut dyn ContentSink,
    ) -> Result<Sp, RenderError> {
        self.lay_out_horizontally(x, y - self.height, sink)?;
        Ok(self.height + self.depth)
    }
}

/// A box arranging its children vertically.
#[derive(Debug, Clone, PartialEq)]
pub struct VBox {
    elements: Vec<Element>,
    width: Sp,
    height: Sp,
    depth: Sp,
}

impl VBox {
    pub fn new(elements: Vec<Element>) -> VBox {
        let mut width: Sp = 0;
        let mut total: Sp = 0;
        for element in &elements {
            width = width.max(element.width());
            total += element.vertical_size();
        }
        // The box's own baseline coincides with the last child's.
        let depth = elements.last().map_or(0, Element::depth);
        VBox {
            elements,
            width,
            height: total - depth,
            depth,
        }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    pub fn width(&self) -> Sp {
        self.width
    }

    pub fn height(&self) -> Sp {
        self.height
    }

    pub fn depth(&self) -> Sp {
        self.depth
    }

    /// Draw the children top to bottom, starting at y.
    pub fn lay_out_contents(
        &self,
        x: Sp,
        y: Sp,
        sink: &mut dyn ContentSink,
    ) -> Result<(), RenderError> {
        let mut y = y;
        for element in &self.elements {
            y -= element.lay_out_vertically(x, y, sink)?;
        }
        Ok(())
    }
}

/// A solid rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rule {
    width: Sp,
    height: Sp,
    depth: Sp,
}

impl Rule {
    pub fn new(width: Sp, height: Sp, depth: Sp) -> Rule {
        Rule {
            width,
            height,
            depth,
        }
    }

    pub fn width(&self) -> Sp {
        self.width
    }

    pub fn height(&self) -> Sp {
        self.height
    }

    pub fn depth(&self) -> Sp {
        self.depth
    }
}
