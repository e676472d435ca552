//! Insertion-ordered set of cell snapshots keyed by grid position

use crate::cell::{CellSnapshot, GridPos};
use std::collections::HashMap;

/// Deduplicated by position; iteration follows first-insertion order.
/// Re-inserting a position refreshes its stored state in place.
#[derive(Debug, Clone, Default)]
pub struct CellSet {
    index: HashMap<GridPos, usize>,
    cells: Vec<CellSnapshot>,
}

impl CellSet {
    /// Insert or refresh. Returns true if the position was not present.
    pub fn insert(&mut self, cell: CellSnapshot) -> bool {
        match self.index.get(&cell.pos) {
            Some(&i) => {
                self.cells[i] = cell;
                false
            }
            None => {
                self.index.insert(cell.pos, self.cells.len());
                self.cells.push(cell);
                true
            }
        }
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.index.contains_key(&pos)
    }

    /// Take every cell in order and leave the set empty
    pub fn drain(&mut self) -> Vec<CellSnapshot> {
        self.index.clear();
        std::mem::take(&mut self.cells)
    }

    pub fn clear(&mut self) {
        self.index.clear();
        self.cells.clear();
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CellSnapshot> {
        self.cells.iter()
    }
}
