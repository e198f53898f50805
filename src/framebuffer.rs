//! Page-packed monochrome framebuffer.
//!
//! Layout matches the controller's display RAM: byte `page * WIDTH + x`
//! holds column `x` of rows `page * 8 ..= page * 8 + 7`, bit 0 at the top.
//! A whole page can therefore be streamed to the panel without conversion.

use core::convert::Infallible;

use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};

use crate::panel::{FRAME_BYTES, HEIGHT, PAGES, WIDTH};

/// In-memory copy of one full frame (1 bit per pixel).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Framebuffer {
    buffer: [u8; FRAME_BYTES],
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Framebuffer {
    /// A blank frame (all pixels off).
    pub const fn new() -> Self {
        Self {
            buffer: [0; FRAME_BYTES],
        }
    }

    /// Byte index and bit mask for an in-range pixel.
    #[inline]
    fn locate(x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x >= WIDTH as i32 || y >= HEIGHT as i32 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        Some(((y / 8) * WIDTH + x, 1 << (y % 8)))
    }

    /// Light or clear one pixel.
    ///
    /// Coordinates outside the panel are ignored, so text and shapes may
    /// run off any edge.
    pub fn set_pixel(&mut self, x: i32, y: i32, on: bool) {
        if let Some((index, bit)) = Self::locate(x, y) {
            if on {
                self.buffer[index] |= bit;
            } else {
                self.buffer[index] &= !bit;
            }
        }
    }

    /// Read one pixel back. Outside the panel every pixel is off.
    pub fn pixel(&self, x: i32, y: i32) -> bool {
        Self::locate(x, y).is_some_and(|(index, bit)| self.buffer[index] & bit != 0)
    }

    /// Turn every pixel off.
    pub fn clear(&mut self) {
        self.buffer.fill(0);
    }

    /// The `WIDTH` bytes of page `page`.
    ///
    /// # Panics
    /// If `page >= PAGES`.
    pub fn page(&self, page: usize) -> &[u8] {
        assert!(page < PAGES);
        &self.buffer[page * WIDTH..(page + 1) * WIDTH]
    }

    /// The raw frame in controller RAM order.
    pub fn as_bytes(&self) -> &[u8; FRAME_BYTES] {
        &self.buffer
    }

    /// Number of lit pixels in the frame.
    pub fn lit_pixels(&self) -> u32 {
        self.buffer.iter().map(|b| b.count_ones()).sum()
    }
}

// ── embedded-graphics integration ────────────────────────────────────────

impl OriginDimensions for Framebuffer {
    fn size(&self) -> Size {
        Size::new(WIDTH as u32, HEIGHT as u32)
    }
}

impl DrawTarget for Framebuffer {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.set_pixel(point.x, point.y, color.is_on());
        }
        Ok(())
    }
}

// ── Tests ────────────────────────────────────────────────────────────────
