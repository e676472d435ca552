//! SDL2 window surface
//!
//! Streaming texture in ABGR8888, which on little-endian hosts is laid out in
//! memory as R, G, B, A bytes, matching [`PixelBuffer`] with no conversion.

use super::{PixelBuffer, Surface};
use crate::color::Rgb;
use crate::error::RenderError;

use sdl2::event::Event;
use sdl2::pixels::{Color, PixelFormatEnum};
use sdl2::rect::Rect;
use sdl2::render::{Canvas, Texture, TextureCreator};
use sdl2::video::{Window, WindowContext};
use sdl2::EventPump;

fn surface_err(e: impl ToString) -> RenderError {
    RenderError::Surface(e.to_string())
}

/// Window, canvas and event pump
pub struct SdlWindow {
    canvas: Canvas<Window>,
    event_pump: EventPump,
}

impl SdlWindow {
    /// Create a window with the given resolution.
    /// Fails when no video subsystem is available.
    pub fn open(
        title: &str,
        width: u32,
        height: u32,
        vsync: bool,
    ) -> Result<(Self, TextureCreator<WindowContext>), RenderError> {
        let sdl_context = sdl2::init().map_err(RenderError::SurfaceUnavailable)?;
        let video_subsystem = sdl_context
            .video()
            .map_err(RenderError::SurfaceUnavailable)?;

        let window = video_subsystem
            .window(title, width, height)
            .position_centered()
            .build()
            .map_err(|e| RenderError::SurfaceUnavailable(e.to_string()))?;

        let mut canvas_builder = window.into_canvas().accelerated();
        if vsync {
            canvas_builder = canvas_builder.present_vsync();
        }
        let canvas = canvas_builder
            .build()
            .map_err(|e| RenderError::SurfaceUnavailable(e.to_string()))?;

        let texture_creator = canvas.texture_creator();
        let event_pump = sdl_context
            .event_pump()
            .map_err(RenderError::SurfaceUnavailable)?;

        Ok((Self { canvas, event_pump }, texture_creator))
    }
}

/// Window surface presenting through a streaming texture
pub struct SdlSurface<'a> {
    window: SdlWindow,
    texture: Texture<'a>,
    width: u32,
    height: u32,
}

impl<'a> SdlSurface<'a> {
    pub fn new(
        window: SdlWindow,
        texture_creator: &'a TextureCreator<WindowContext>,
    ) -> Result<Self, RenderError> {
        let (width, height) = window.canvas.output_size().map_err(surface_err)?;
        let texture = texture_creator
            .create_texture_streaming(PixelFormatEnum::ABGR8888, width, height)
            .map_err(|e| RenderError::SurfaceUnavailable(e.to_string()))?;
        Ok(Self {
            window,
            texture,
            width,
            height,
        })
    }

    /// Drain pending events; returns true when the user asked to quit
    pub fn quit_requested(&mut self) -> bool {
        self.window
            .event_pump
            .poll_iter()
            .any(|event| matches!(event, Event::Quit { .. }))
    }
}

impl Surface for SdlSurface<'_> {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn present(&mut self, buffer: &PixelBuffer) -> Result<(), RenderError> {
        if buffer.size() != (self.width, self.height) {
            return Err(RenderError::SizeMismatch {
                buffer: buffer.size(),
                surface: (self.width, self.height),
            });
        }
        self.texture
            .update(None, buffer.as_bytes(), buffer.stride())
            .map_err(surface_err)?;

        self.window
            .canvas
            .copy(&self.texture, None, None)
            .map_err(surface_err)?;
        self.window.canvas.present();
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
        let canvas = &mut self.window.canvas;
        canvas.set_draw_color(Color::RGB(color.r, color.g, color.b));
        canvas
            .fill_rect(Rect::new(x as i32, y as i32, w, h))
            .map_err(surface_err)?;
        canvas.present();
        Ok(())
    }

    fn read_pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let rect = Rect::new(x as i32, y as i32, 1, 1);
        let bytes = self
            .window
            .canvas
            .read_pixels(rect, PixelFormatEnum::ABGR8888)
            .ok()?;
        bytes.get(..4).map(|b| [b[0], b[1], b[2], b[3]])
    }
}
