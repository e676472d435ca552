use crate::cell::{CellSnapshot, GridPos};
use crate::cell_set::CellSet;

/// Cells queued for a base-colour redraw since the last flush
#[derive(Debug, Clone, Default)]
pub struct DirtyCellTracker {
    queue: CellSet,
}

impl DirtyCellTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a cell. Queuing an already-queued position only refreshes its
    /// state, so it is still drawn exactly once.
    pub fn add(&mut self, cell: CellSnapshot) {
        self.queue.insert(cell);
    }

    /// Every queued cell once, in insertion order; the queue is left empty
    pub fn drain(&mut self) -> Vec<CellSnapshot> {
        self.queue.drain()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        self.queue.contains(pos)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cell::{Cell, CellState, Drawable};

    #[test]
    fn add_is_idempotent() {
        let mut dirty = DirtyCellTracker::new();
        let cell = Cell::new(2, 3, CellState::Food);
        dirty.add(cell.snapshot());
        dirty.add(cell.snapshot());
        dirty.add(cell.snapshot());
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty.drain(), vec![cell.snapshot()]);
    }

    #[test]
    fn drain_preserves_insertion_order() {
        let mut dirty = DirtyCellTracker::new();
        let cells = [
            Cell::new(5, 5, CellState::Wall),
            Cell::new(0, 0, CellState::Eye),
            Cell::new(3, 1, CellState::Mouth),
        ];
        for c in &cells {
            dirty.add(c.snapshot());
        }
        let drained: Vec<_> = dirty.drain().into_iter().map(|c| c.pos).collect();
        assert_eq!(drained, cells.iter().map(|c| c.pos).collect::<Vec<_>>());
    }

    #[test]
    fn drain_when_empty_is_empty() {
        let mut dirty = DirtyCellTracker::new();
        assert!(dirty.drain().is_empty());
        dirty.add(Cell::new(0, 0, CellState::Food).snapshot());
        dirty.drain();
        assert!(dirty.is_empty());
        assert!(dirty.drain().is_empty());
    }

    #[test]
    fn latest_state_wins() {
        let mut dirty = DirtyCellTracker::new();
        dirty.add(Cell::new(1, 1, CellState::Food).snapshot());
        dirty.add(Cell::new(1, 1, CellState::Empty).snapshot());
        assert!(dirty.contains(GridPos::new(1, 1)));
        let drained = dirty.drain();
        assert_eq!(drained.len(), 1);
        assert_eq!(drained[0].state, CellState::Empty);
    }
}
