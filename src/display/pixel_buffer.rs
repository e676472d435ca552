use crate::color::Rgb;

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA pixel buffer for software rendering
///
/// 4 bytes per pixel in R, G, B, A order, row-major, stride = width * 4.
/// This is the back buffer the compositor paints into before presenting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a buffer of transparent black pixels
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; (width as usize) * (height as usize) * 4],
            width,
            height,
        }
    }

    /// Create a buffer filled with an opaque colour
    pub fn filled(width: u32, height: u32, color: Rgb) -> Self {
        let mut buffer = Self::with_size(width, height);
        buffer.clear(color);
        buffer
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Bytes per row
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * 4
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Byte offset for pixel at (x, y): (x + y * width) * 4
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        (x as usize + y as usize * self.width as usize) * 4
    }

    /// Clear to a solid opaque colour
    pub fn clear(&mut self, color: Rgb) {
        let rgba = color.rgba();
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&rgba);
        }
    }

    /// Reallocate for new dimensions and fill with `color`.
    /// All previous contents are discarded.
    pub fn reset(&mut self, width: u32, height: u32, color: Rgb) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels
            .resize((width as usize) * (height as usize) * 4, 0);
        self.clear(color);
    }

    /// Set a single pixel (bounds checked, out-of-range writes are dropped)
    #[inline]
    pub fn set_pixel_rgba(&mut self, x: u32, y: u32, r: u8, g: u8, b: u8, a: u8) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x, y);
            self.pixels[idx..idx + 4].copy_from_slice(&[r, g, b, a]);
        }
    }

    /// Set an opaque pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Rgb) {
        self.set_pixel_rgba(x, y, color.r, color.g, color.b, 255);
    }

    /// Read all 4 channels of a pixel, or None if out of bounds
    #[inline]
    pub fn get_pixel_rgba(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x, y);
            let mut out = [0; 4];
            out.copy_from_slice(&self.pixels[idx..idx + 4]);
            Some(out)
        } else {
            None
        }
    }

    /// Fill a rectangle, clipped to the buffer
    pub fn fill_rect(&mut self, x: u32, y: u32, w: u32, h: u32, color: Rgb) {
        let x_end = x.saturating_add(w).min(self.width);
        let y_end = y.saturating_add(h).min(self.height);
        if x >= x_end || y >= y_end {
            return;
        }

        let rgba = color.rgba();
        for row in y..y_end {
            // Compute starting index once per row, then step by 4
            let start = self.pixel_index(x, row);
            let end = self.pixel_index(x_end, row);
            for px in self.pixels[start..end].chunks_exact_mut(4) {
                px.copy_from_slice(&rgba);
            }
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }

    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Replace contents with another buffer of the same size.
    /// Returns false (and copies nothing) when sizes differ.
    pub fn copy_from(&mut self, src: &PixelBuffer) -> bool {
        if src.size() != self.size() {
            return false;
        }
        self.pixels.copy_from_slice(&src.pixels);
        true
    }
}
