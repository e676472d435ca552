mod pixel_buffer;
#[cfg(feature = "sdl")]
mod sdl;

pub use pixel_buffer::PixelBuffer;
#[cfg(feature = "sdl")]
pub use sdl::{SdlSurface, SdlWindow};

use crate::color::Rgb;
use crate::error::RenderError;

pub const DEFAULT_WIDTH: u32 = 640;
pub const DEFAULT_HEIGHT: u32 = 480;

/// A drawing surface the compositor presents into
///
/// `present` must replace the visible image with the whole buffer in one step;
/// partial frames are never visible.
pub trait Surface {
    /// Current (width, height) in pixels. (0, 0) means not ready.
    fn size(&self) -> (u32, u32);

    /// Replace the visible image with `buffer`
    fn present(&mut self, buffer: &PixelBuffer) -> Result<(), RenderError>;

    /// Paint a solid opaque rectangle directly onto the visible image
    fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb)
        -> Result<(), RenderError>;

    /// Read back a visible pixel as RGBA, if the backend supports it
    fn read_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]>;

    /// Change the surface dimensions. Surfaces with a fixed size reject this.
    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if self.size() == (width, height) {
            Ok(())
        } else {
            Err(RenderError::Surface(format!(
                "surface cannot be resized to {}x{}",
                width, height
            )))
        }
    }
}

/// Headless surface that keeps the last visible frame in memory
#[derive(Debug, Clone)]
pub struct MemorySurface {
    frame: PixelBuffer,
    presents: u64,
}

impl MemorySurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            frame: PixelBuffer::with_size(width, height),
            presents: 0,
        }
    }

    /// The visible frame
    pub fn frame(&self) -> &PixelBuffer {
        &self.frame
    }

    /// Number of successful `present` calls
    pub fn present_count(&self) -> u64 {
        self.presents
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

impl Surface for MemorySurface {
    fn size(&self) -> (u32, u32) {
        self.frame.size()
    }

    fn present(&mut self, buffer: &PixelBuffer) -> Result<(), RenderError> {
        if !self.frame.copy_from(buffer) {
            return Err(RenderError::SizeMismatch {
                buffer: buffer.size(),
                surface: self.frame.size(),
            });
        }
        self.presents += 1;
        Ok(())
    }

    fn fill_rect(
        &mut self,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        color: Rgb,
    ) -> Result<(), RenderError> {
        self.frame.fill_rect(x, y, w, h, color);
        Ok(())
    }

    fn read_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.frame.get_pixel_rgba(x, y)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        if self.frame.size() != (width, height) {
            self.frame = PixelBuffer::with_size(width, height);
        }
        Ok(())
    }
}

impl<S: Surface + ?Sized> Surface for Box<S> {
    fn size(&self) -> (u32, u32) {
        (**self).size()
    }

    fn present(&mut self, buffer: &PixelBuffer) -> Result<(), RenderError> {
        (**self).present(buffer)
    }

    fn fill_rect(
        &mut self,
        x: u32,
        y: u32,
        w: u32,
        h: u32,
        color: Rgb,
    ) -> Result<(), RenderError> {
        (**self).fill_rect(x, y, w, h, color)
    }

    fn read_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        (**self).read_pixel(x, y)
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), RenderError> {
        (**self).resize(width, height)
    }
}
