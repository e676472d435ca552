//! Renderer: one per surface
//!
//! Call order within a simulation tick:
//! 1. `add_to_render` / `highlight_cell` / `highlight_organism` while stepping
//! 2. `render_cells` (base colours, one present)
//! 3. `render_highlights` (overlay, one present)
//!
//! Running step 3 before step 2 would let a stale base redraw cover a fresh
//! highlight.

use crate::cell::{CellSnapshot, Drawable, GridPos, Organism};
use crate::color::{ColorResolver, Rgb};
use crate::compositor::PixelCompositor;
use crate::config::RendererConfig;
use crate::dirty::DirtyCellTracker;
use crate::display::Surface;
use crate::error::RenderError;
use crate::highlight::{HighlightState, HighlightStateMachine};
use tracing::{debug, info, warn};

pub struct Renderer<S: Surface> {
    compositor: PixelCompositor<S>,
    colors: ColorResolver,
    dirty: DirtyCellTracker,
    highlights: HighlightStateMachine,
    background: Rgb,
}

impl<S: Surface> Renderer<S> {
    /// Take ownership of a ready surface.
    /// An unready (zero-sized) surface or an invalid config is fatal here.
    pub fn new(surface: S, config: &RendererConfig) -> Result<Self, RenderError> {
        let colors = config.resolver()?;
        let compositor = PixelCompositor::new(surface, config.cell_size, config.background)?;
        let (width, height) = compositor.buffer().size();
        let (cols, rows) = compositor.grid_size();
        info!(
            width,
            height,
            cell_size = config.cell_size,
            cols,
            rows,
            "renderer ready"
        );
        Ok(Self {
            compositor,
            colors,
            dirty: DirtyCellTracker::new(),
            highlights: HighlightStateMachine::new(),
            background: config.background,
        })
    }

    // ========================================================================
    // Full-surface operations
    // ========================================================================

    /// Reset the back buffer to the background colour and paint the whole
    /// surface with it. Cells that were highlighted are re-requested so the
    /// next `render_highlights` puts them back after the caller repaints.
    pub fn clear(&mut self) -> Result<(), RenderError> {
        let (width, height) = self.compositor.surface().size();
        self.compositor.reset_buffer(width, height, self.background);
        self.highlights.demote_all();
        self.compositor.fill_surface(self.background)?;
        info!(width, height, "surface cleared");
        Ok(())
    }

    /// Resize the surface and the back buffer, then clear.
    /// The caller repaints with `render_full_grid`.
    pub fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::SurfaceUnavailable(format!(
                "cannot resize to {}x{}",
                width, height
            )));
        }
        self.compositor.surface_mut().resize(width, height)?;
        self.clear()
    }

    /// Paint every cell of a 2-D collection and present once.
    /// Bypasses the dirty queue.
    pub fn render_full_grid<G, R, D>(&mut self, grid: G) -> Result<usize, RenderError>
    where
        G: IntoIterator<Item = R>,
        R: IntoIterator<Item = D>,
        D: Drawable,
    {
        let mut painted = 0;
        for column in grid {
            for cell in column {
                if self.paint_base(&cell.snapshot()) {
                    painted += 1;
                }
            }
        }
        self.compositor.flush()?;
        debug!(painted, "full grid rendered");
        Ok(painted)
    }

    // ========================================================================
    // Base pass
    // ========================================================================

    /// Queue a changed cell for the next `render_cells`.
    /// A highlighted cell is also re-queued for highlight, and a pending
    /// highlight request picks up the new state.
    pub fn add_to_render<D: Drawable>(&mut self, cell: D) {
        let cell = cell.snapshot();
        self.highlights.note_redraw(cell);
        self.dirty.add(cell);
    }

    /// Paint every queued cell's base colour and present once.
    /// Returns the number of cells painted.
    pub fn render_cells(&mut self) -> Result<usize, RenderError> {
        let queued = self.dirty.drain();
        let mut painted = 0;
        for cell in &queued {
            if self.paint_base(cell) {
                painted += 1;
            }
        }
        self.compositor.flush()?;
        debug!(queued = queued.len(), painted, "cells rendered");
        Ok(painted)
    }

    /// Paint one cell's base colour into the back buffer right away.
    /// Becomes visible with the next present.
    pub fn render_cell<D: Drawable>(&mut self, cell: D) -> Result<(), RenderError> {
        let cell = cell.snapshot();
        self.compositor.paint_cell(cell.pos, self.colors.resolve(cell.state))?;
        self.highlights.note_redraw(cell);
        Ok(())
    }

    /// Paint every real cell of an organism and present once
    pub fn render_organism<O: Organism>(&mut self, org: &O) -> Result<usize, RenderError> {
        let mut painted = 0;
        for part in org.anatomy() {
            match org.real_cell(part) {
                Some(cell) => {
                    if self.paint_base(&cell.snapshot()) {
                        painted += 1;
                    }
                }
                None => debug!("organism part has no world cell, skipped"),
            }
        }
        self.compositor.flush()?;
        Ok(painted)
    }

    // ========================================================================
    // Highlight pass
    // ========================================================================

    pub fn highlight_cell<D: Drawable>(&mut self, cell: D) {
        self.highlights.request(cell.snapshot());
    }

    /// Request a highlight for every real cell of an organism
    pub fn highlight_organism<O: Organism>(&mut self, org: &O) {
        let mut skipped = 0usize;
        for part in org.anatomy() {
            match org.real_cell(part) {
                Some(cell) => self.highlights.request(cell.snapshot()),
                None => skipped += 1,
            }
        }
        if skipped > 0 {
            debug!(skipped, "organism parts without a world cell not highlighted");
        }
    }

    /// Paint every requested highlight and record it as highlighted.
    /// Presents once if anything was painted.
    pub fn render_highlights(&mut self) -> Result<usize, RenderError> {
        let colors = &self.colors;
        let compositor = &mut self.compositor;
        let painted = self.highlights.flush(|cell| {
            compositor.paint_cell(cell.pos, colors.highlight(cell.state))
        });
        if painted > 0 {
            self.compositor.flush()?;
        }
        debug!(
            painted,
            highlighted = self.highlights.highlighted_len(),
            "highlights rendered"
        );
        Ok(painted)
    }

    /// Restore the base colour of every highlighted cell, looked up fresh
    /// from the palette. `clear_pending` also drops requests not yet rendered.
    /// Presents once if anything was restored.
    pub fn clear_all_highlights(&mut self, clear_pending: bool) -> Result<usize, RenderError> {
        let colors = &self.colors;
        let compositor = &mut self.compositor;
        let restored = self.highlights.clear(clear_pending, |cell| {
            compositor.paint_cell(cell.pos, colors.resolve(cell.state))
        });
        if restored > 0 {
            self.compositor.flush()?;
        }
        debug!(restored, clear_pending, "highlights cleared");
        Ok(restored)
    }

    // ========================================================================
    // Introspection
    // ========================================================================

    pub fn is_highlighted(&self, pos: GridPos) -> bool {
        self.highlights.is_highlighted(pos)
    }

    pub fn highlight_state(&self, pos: GridPos) -> HighlightState {
        self.highlights.state_of(pos)
    }

    pub fn highlighted_cells(&self) -> impl Iterator<Item = &CellSnapshot> {
        self.highlights.highlighted()
    }

    pub fn requested_highlights(&self) -> impl Iterator<Item = &CellSnapshot> {
        self.highlights.requested()
    }

    /// Cells waiting for the next `render_cells`
    pub fn pending_len(&self) -> usize {
        self.dirty.len()
    }

    pub fn is_pending(&self, pos: GridPos) -> bool {
        self.dirty.contains(pos)
    }

    /// Whole cells that fit on the surface (columns, rows)
    pub fn grid_size(&self) -> (u32, u32) {
        self.compositor.grid_size()
    }

    pub fn colors(&self) -> &ColorResolver {
        &self.colors
    }

    pub fn background(&self) -> Rgb {
        self.background
    }

    pub fn compositor(&self) -> &PixelCompositor<S> {
        &self.compositor
    }

    pub fn surface(&self) -> &S {
        self.compositor.surface()
    }

    pub fn surface_mut(&mut self) -> &mut S {
        self.compositor.surface_mut()
    }

    // ========================================================================
    // Internals
    // ========================================================================

    /// Paint a base colour; out-of-bounds cells are logged and skipped
    fn paint_base(&mut self, cell: &CellSnapshot) -> bool {
        match self.compositor.paint_cell(cell.pos, self.colors.resolve(cell.state)) {
            Ok(()) => {
                self.highlights.note_redraw(*cell);
                true
            }
            Err(e) => {
                warn!(pos = %cell.pos, error = %e, "cell skipped");
                false
            }
        }
    }
}
