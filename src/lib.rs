//! Incremental cell-grid renderer
//!
//! A simulation reports which cells changed; the [`Renderer`] repaints only
//! those cells into an RGBA back buffer and presents the buffer to a
//! [`Surface`] in one step. A highlight overlay can be requested, rendered and
//! cleared on top of the base colours without losing track of which cells
//! currently show it.
//!
//! ```
//! use cellgrid::{Cell, CellState, MemorySurface, Renderer, RendererConfig, Surface};
//!
//! let mut renderer = Renderer::new(MemorySurface::new(4, 4), &RendererConfig::default())?;
//! let cell = Cell::new(1, 1, CellState::Producer);
//!
//! renderer.add_to_render(cell);
//! renderer.highlight_cell(cell);
//! renderer.render_cells()?;
//! renderer.render_highlights()?;
//! assert!(renderer.is_highlighted(cell.pos));
//!
//! renderer.clear_all_highlights(false)?;
//! assert_eq!(renderer.surface().read_pixel(1, 1), Some([20, 223, 89, 255]));
//! # Ok::<(), cellgrid::RenderError>(())
//! ```

pub mod cell;
mod cell_set;
pub mod color;
pub mod compositor;
pub mod config;
pub mod dirty;
pub mod display;
pub mod error;
pub mod highlight;
pub mod renderer;

pub use cell::{Cell, CellSnapshot, CellState, Drawable, GridPos, Organism};
pub use color::{ColorResolver, HighlightStyle, Palette, Rgb, FALLBACK};
pub use compositor::PixelCompositor;
pub use config::RendererConfig;
pub use dirty::DirtyCellTracker;
pub use display::{MemorySurface, PixelBuffer, Surface};
pub use error::RenderError;
pub use highlight::{HighlightState, HighlightStateMachine};
pub use renderer::Renderer;
