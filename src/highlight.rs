//! Highlight bookkeeping
//!
//! Per cell: `Normal -> Requested` on request, `Requested -> Highlighted` when
//! the request is painted by `flush`, `Highlighted -> Normal` on `clear`.
//! A highlighted cell that gets a base redraw is re-requested, so its highlight
//! comes back on the next highlight pass instead of being silently erased.
//! A redraw of a cell that is only requested updates the request, so the
//! overlay and the later restore use the cell's latest state.

use crate::cell::{CellSnapshot, GridPos};
use crate::cell_set::CellSet;
use crate::error::RenderError;
use tracing::warn;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HighlightState {
    Normal,
    Requested,
    Highlighted,
}

#[derive(Debug, Clone, Default)]
pub struct HighlightStateMachine {
    requested: CellSet,
    highlighted: CellSet,
}

impl HighlightStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn request(&mut self, cell: CellSnapshot) {
        self.requested.insert(cell);
    }

    /// Called for every base redraw. A highlighted cell picks up the new state
    /// and is queued for re-application. A pending request picks up the new
    /// state too, so the overlay and the later restore both use it.
    /// Returns true if either set was touched.
    pub fn note_redraw(&mut self, cell: CellSnapshot) -> bool {
        if self.highlighted.contains(cell.pos) {
            self.highlighted.insert(cell);
            self.requested.insert(cell);
            true
        } else if self.requested.contains(cell.pos) {
            self.requested.insert(cell);
            true
        } else {
            false
        }
    }

    /// Paint every requested cell with `paint`. Painted cells become
    /// highlighted; rejected ones are dropped. The request set ends empty.
    /// Returns the number of cells painted.
    pub fn flush<F>(&mut self, mut paint: F) -> usize
    where
        F: FnMut(&CellSnapshot) -> Result<(), RenderError>,
    {
        let mut painted = 0;
        for cell in self.requested.drain() {
            match paint(&cell) {
                Ok(()) => {
                    self.highlighted.insert(cell);
                    painted += 1;
                }
                Err(e) => warn!(pos = %cell.pos, error = %e, "highlight rejected"),
            }
        }
        painted
    }

    /// Restore every highlighted cell through `paint_base` and forget them.
    /// With `clear_pending`, outstanding requests are dropped too.
    /// Returns the number of cells restored.
    pub fn clear<F>(&mut self, clear_pending: bool, mut paint_base: F) -> usize
    where
        F: FnMut(&CellSnapshot) -> Result<(), RenderError>,
    {
        let mut restored = 0;
        for cell in self.highlighted.drain() {
            match paint_base(&cell) {
                Ok(()) => restored += 1,
                Err(e) => warn!(pos = %cell.pos, error = %e, "highlight restore rejected"),
            }
        }
        if clear_pending {
            self.requested.clear();
        }
        restored
    }

    /// The highlight pixels were wiped without going through `clear`:
    /// every highlighted cell goes back to requested.
    pub fn demote_all(&mut self) {
        for cell in self.highlighted.drain() {
            self.requested.insert(cell);
        }
    }

    pub fn state_of(&self, pos: GridPos) -> HighlightState {
        if self.highlighted.contains(pos) {
            HighlightState::Highlighted
        } else if self.requested.contains(pos) {
            HighlightState::Requested
        } else {
            HighlightState::Normal
        }
    }

    pub fn is_highlighted(&self, pos: GridPos) -> bool {
        self.highlighted.contains(pos)
    }

    pub fn is_requested(&self, pos: GridPos) -> bool {
        self.requested.contains(pos)
    }

    pub fn highlighted(&self) -> impl Iterator<Item = &CellSnapshot> {
        self.highlighted.iter()
    }

    pub fn requested(&self) -> impl Iterator<Item = &CellSnapshot> {
        self.requested.iter()
    }

    pub fn highlighted_len(&self) -> usize {
        self.highlighted.len()
    }

    pub fn requested_len(&self) -> usize {
        self.requested.len()
    }
}
