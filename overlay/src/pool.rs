//! Keyed pool of timer rows
//!
//! Rows are created the first time a timer id shows up and then live until
//! the panel closes. There is no per-row removal: a row whose timer goes away
//! is collapsed and parked, and picked back up if the id returns.

use hashbrown::HashMap;

use crate::layout::LayoutGrid;
use crate::widgets::SpellTimerRow;

#[derive(Debug, Default)]
pub struct RowPool {
    rows: HashMap<i64, SpellTimerRow>,
}

impl RowPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Existing row for `id`, or a new collapsed row appended to `grid`
    pub fn get_or_create(&mut self, id: i64, grid: &mut LayoutGrid) -> &mut SpellTimerRow {
        self.rows.entry(id).or_insert_with(|| {
            grid.add_row();
            let slot = grid.add_child(id);
            tracing::debug!(id, slot, "Created timer row");
            SpellTimerRow::new(id, slot)
        })
    }

    pub fn get(&self, id: i64) -> Option<&SpellTimerRow> {
        self.rows.get(&id)
    }

    pub fn get_mut(&mut self, id: i64) -> Option<&mut SpellTimerRow> {
        self.rows.get_mut(&id)
    }

    pub fn contains(&self, id: i64) -> bool {
        self.rows.contains_key(&id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (i64, &SpellTimerRow)> {
        self.rows.iter().map(|(id, row)| (*id, row))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (i64, &mut SpellTimerRow)> {
        self.rows.iter_mut().map(|(id, row)| (*id, row))
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Drop every row (panel teardown only)
    pub fn clear(&mut self) {
        self.rows.clear();
    }
}
