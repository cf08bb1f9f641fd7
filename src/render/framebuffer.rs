//! CPU framebuffer of packed colors plus the rectangle rasterizer.
use crate::error::{RenderError, Result};
use crate::render::color::PackedColor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    color_buffer: Vec<PackedColor>,
    width: usize,
    height: usize,
    background_color: PackedColor,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize, background: PackedColor) -> Self {
        Self {
            color_buffer: vec![background; width * height],
            width,
            height,
            background_color: background,
        }
    }

    /// Wraps existing pixels; the length has to be exactly `width * height`.
    /// `background` is what `clear` fills with.
    pub fn from_pixels(
        width: usize,
        height: usize,
        pixels: Vec<PackedColor>,
        background: PackedColor,
    ) -> Result<Self> {
        if Some(pixels.len()) != width.checked_mul(height) {
            return Err(RenderError::BufferSizeMismatch {
                width,
                height,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            color_buffer: pixels,
            width,
            height,
            background_color: background,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[PackedColor] {
        &self.color_buffer
    }

    #[inline]
    pub fn background_color(&self) -> PackedColor {
        self.background_color
    }

    #[inline]
    pub fn set_background_color(&mut self, c: PackedColor) {
        self.background_color = c;
    }

    #[inline]
    pub fn clear(&mut self) {
        self.color_buffer.fill(self.background_color);
    }

    /// Writes one pixel; coordinates outside the buffer are dropped.
    #[inline]
    pub fn set_pixel(&mut self, x: isize, y: isize, color: PackedColor) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            self.color_buffer[y as usize * self.width + x as usize] = color;
        }
    }

    #[inline]
    pub fn get_pixel(&self, x: usize, y: usize) -> Option<PackedColor> {
        if x < self.width && y < self.height {
            return Some(self.color_buffer[y * self.width + x]);
        }
        None
    }

    /// Fills `[x, x + w) × [y, y + h)` clipped to the buffer.
    ///
    /// The rectangle is intersected with the buffer before any index is
    /// formed, so negative origins and oversized extents never alias back
    /// into valid pixels.
    pub fn fill_rect(&mut self, x: isize, y: isize, w: usize, h: usize, color: PackedColor) {
        let Some((x0, x1)) = clip_span(x, w, self.width) else { return };
        let Some((y0, y1)) = clip_span(y, h, self.height) else { return };
        for row in y0..y1 {
            let start = row * self.width;
            self.color_buffer[start + x0..start + x1].fill(color);
        }
    }

    /// Copies `src` (row-major,
    /// `src_w` wide) to `(x, y)` with clipping.
    pub fn blit(&mut self, x: isize, y: isize, src_w: usize, src: &[PackedColor]) {
        if src_w == 0 {
            return;
        }
        for (j, row) in src.chunks(src_w).enumerate() {
            for (i, &c) in row.iter().enumerate() {
                self.set_pixel(x.saturating_add_unsigned(i), y.saturating_add_unsigned(j), c);
            }
        }
    }
}

/// Intersects `[start, start + len)` with `[0, limit)`.
fn clip_span(start: isize, len: usize, limit: usize) -> Option<(usize, usize)> {
    let end = start.saturating_add_unsigned(len);
    let lo = start.max(0);
    let hi = end.min(limit.min(isize::MAX as usize) as isize);
    if lo >= hi {
        return None;
    }
    Some((lo as usize, hi as usize))
}
