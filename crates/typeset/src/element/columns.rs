use quire_font::{ContentSink, RenderError};
use quire_types::Sp;
use serde::{Deserialize, Serialize};

use super::{Element, VBox};

/// Describes how a stretch of the vertical list is divided into columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ColumnLayout {
    count: usize,
    /// Space between adjacent columns, in scaled points.
    margin: Sp,
}

impl ColumnLayout {
    /// The default single-column layout.
    pub fn single() -> ColumnLayout {
        ColumnLayout {
            count: 1,
            margin: 0,
        }
    }

    pub fn new(count: usize, margin: Sp) -> ColumnLayout {
        assert!(count >= 1, "a column layout needs at least one column");
        ColumnLayout { count, margin }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn margin(&self) -> Sp {
        self.margin
    }

    /// The width of each column when the group spans `total_width`.
    pub fn column_width(&self, total_width: Sp) -> Sp {
        (total_width - self.margin * (self.count as Sp - 1)) / self.count as Sp
    }
}

/// A group of vertical elements typeset into parallel columns. The children
/// were assembled against the narrower per-column measure; the group itself
/// spans the full text width.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
    layout: ColumnLayout,
    columns: Vec<VBox>,
    width: Sp,
    height: Sp,
    depth: Sp,
}

impl Columns {
    /// Distribute the elements into the layout's columns, keeping column
    /// heights as even as a greedy in-order fill allows.
    pub fn create(elements: Vec<Element>, layout: ColumnLayout) -> Columns {
        let total: Sp = elements.iter().map(Element::vertical_size).sum();
        let target = total / layout.count() as Sp;

        let mut columns: Vec<Vec<Element>> = Vec::with_capacity(layout.count());
        let mut current: Vec<Element> = Vec::new();
        let mut current_size: Sp = 0;
        for element in elements {
            let size = element.vertical_size();
            if columns.len() + 1 < layout.count()
                && !current.is_empty()
                && current_size + size > target
            {
                columns.push(std::mem::take(&mut current));
                current_size = 0;
            }
            current_size += size;
            current.push(element);
        }
        columns.push(current);

        let columns: Vec<VBox> = columns.into_iter().map(VBox::new).collect();
        let column_width = columns.iter().map(VBox::width).max().unwrap_or(0);
        let width = column_width * layout.count() as Sp
            + layout.margin() * (layout.count() as Sp - 1);
        let height = columns.iter().map(VBox::height).max().unwrap_or(0);
        let depth = columns.iter().map(VBox::depth).max().unwrap_or(0);

        Columns {
            layout,
            columns,
            width,
            height,
            depth,
        }
    }

    pub fn layout(&self) -> ColumnLayout {
        self.layout
    }

    pub fn columns(&self) -> &[VBox] {
        &self.columns
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

    /// Draw the columns side by side, all starting at y.
    pub fn lay_out_vertically(
        &self,
        x: Sp,
        y: Sp,
        sink: &mut dyn ContentSink,
    ) -> Result<Sp, RenderError> {
        let column_width = (self.width - self.layout.margin() * (self.layout.count() as Sp - 1))
            / self.layout.count() as Sp;
        let mut column_x = x;
        for column in &self.columns {
            column.lay_out_contents(column_x, y, sink)?;
            column_x += column_width + self.layout.margin();
        }
        Ok(self.height + self.depth)
    }
}
