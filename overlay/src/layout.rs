//! Row grid the panel lays its timer rows into
//!
//! Single column. Row definitions only ever grow while the panel is open;
//! children are recorded in the order they were added.

#[derive(Debug, Default)]
pub struct LayoutGrid {
    row_count: usize,
    /// Timer ids of the rows placed in the grid, in insertion order
    children: Vec<i64>,
}

impl LayoutGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an empty row definition
    pub fn add_row(&mut self) {
        self.row_count += 1;
    }

    pub fn row_count(&self) -> usize {
        self.row_count
    }

    /// Index of the last row definition (0 for an empty grid)
    pub fn last_row(&self) -> usize {
        self.row_count.saturating_sub(1)
    }

    /// Register a child and return its initial row (the child index)
    pub fn add_child(&mut self, id: i64) -> usize {
        self.children.push(id);
        self.children.len() - 1
    }

    pub fn children(&self) -> &[i64] {
        &self.children
    }

    pub fn clear(&mut self) {
        self.row_count = 0;
        self.children.clear();
    }
}
