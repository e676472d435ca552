//! Back buffer + surface
//!
//! All painting goes into the back buffer; `flush` hands the whole buffer to
//! the surface in a single `present`, so a half-painted frame is never shown.

use crate::cell::GridPos;
use crate::color::Rgb;
use crate::display::{PixelBuffer, Surface};
use crate::error::RenderError;

pub struct PixelCompositor<S: Surface> {
    surface: S,
    buffer: PixelBuffer,
    cell_size: u32,
    paints: u64,
    flushes: u64,
}

impl<S: Surface> PixelCompositor<S> {
    /// Wrap a ready surface. The buffer starts filled with `background`.
    pub fn new(surface: S, cell_size: u32, background: Rgb) -> Result<Self, RenderError> {
        let (width, height) = surface.size();
        if width == 0 || height == 0 {
            return Err(RenderError::SurfaceUnavailable(format!(
                "surface has no area ({}x{})",
                width, height
            )));
        }
        if cell_size == 0 {
            return Err(RenderError::Config("cell_size must be at least 1".into()));
        }
        Ok(Self {
            surface,
            buffer: PixelBuffer::filled(width, height, background),
            cell_size,
            paints: 0,
            flushes: 0,
        })
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn buffer(&self) -> &PixelBuffer {
        &self.buffer
    }

    pub fn cell_size(&self) -> u32 {
        self.cell_size
    }

    /// Number of whole cells that fit on each axis
    pub fn grid_size(&self) -> (u32, u32) {
        (
            self.buffer.width() / self.cell_size,
            self.buffer.height() / self.cell_size,
        )
    }

    /// Successful `paint_cell` calls since construction
    pub fn paint_count(&self) -> u64 {
        self.paints
    }

    /// Successful `flush` calls since construction
    pub fn flush_count(&self) -> u64 {
        self.flushes
    }

    /// Write one RGBA pixel into the back buffer.
    /// Out-of-bounds coordinates are rejected and nothing is written.
    pub fn set_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) -> Result<(), RenderError> {
        if !self.buffer.in_bounds(x, y) {
            return Err(self.out_of_bounds(x, y));
        }
        let [r, g, b, a] = rgba;
        self.buffer.set_pixel_rgba(x, y, r, g, b, a);
        Ok(())
    }

    /// Paint a cell's square with an opaque colour.
    /// The whole square must fit in the buffer, otherwise nothing is written.
    pub fn paint_cell(&mut self, pos: GridPos, color: Rgb) -> Result<(), RenderError> {
        let size = self.cell_size;
        let x0 = pos.x.checked_mul(size);
        let y0 = pos.y.checked_mul(size);
        let (x0, y0) = match (x0, y0) {
            (Some(x0), Some(y0))
                if x0.checked_add(size).is_some_and(|x1| x1 <= self.buffer.width())
                    && y0.checked_add(size).is_some_and(|y1| y1 <= self.buffer.height()) =>
            {
                (x0, y0)
            }
            _ => return Err(self.out_of_bounds(pos.x, pos.y)),
        };

        if size == 1 {
            self.set_pixel(x0, y0, color.rgba())?;
        } else {
            self.buffer.fill_rect(x0, y0, size, size, color);
        }
        self.paints += 1;
        Ok(())
    }

    /// Present the whole back buffer to the surface in one step
    pub fn flush(&mut self) -> Result<(), RenderError> {
        let surface_size = self.surface.size();
        if surface_size != self.buffer.size() {
            return Err(RenderError::SizeMismatch {
                buffer: self.buffer.size(),
                surface: surface_size,
            });
        }
        self.surface.present(&self.buffer)?;
        self.flushes += 1;
        Ok(())
    }

    /// Reallocate the back buffer and fill it with `background`.
    /// Prior contents are gone; the caller must repaint.
    pub fn reset_buffer(&mut self, width: u32, height: u32, background: Rgb) {
        self.buffer.reset(width, height, background);
    }

    /// Paint the whole visible surface with a solid colour
    pub fn fill_surface(&mut self, color: Rgb) -> Result<(), RenderError> {
        let (width, height) = self.surface.size();
        self.surface.fill_rect(0, 0, width, height, color)
    }

    fn out_of_bounds(&self, x: u32, y: u32) -> RenderError {
        RenderError::OutOfBounds {
            x,
            y,
            width: self.buffer.width(),
            height: self.buffer.height(),
        }
    }
}
