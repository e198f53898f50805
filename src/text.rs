//! Fixed-width text rendering on the [`Framebuffer`].
//!
//! Glyphs are 8×8 cells from [`crate::font`]. Every cell pixel is written,
//! so a glyph also clears the background behind it. Clipping at the panel
//! edges is done pixel by pixel by the framebuffer.

use crate::font::{glyph, GLYPH_SIZE};
use crate::framebuffer::Framebuffer;
use crate::panel::WIDTH;

/// Horizontal advance per glyph.
const ADVANCE: i32 = GLYPH_SIZE as i32;

impl Framebuffer {
    /// Draw the glyph for `code` with its top-left corner at `(x, y)`.
    pub fn draw_glyph(&mut self, x: i32, y: i32, code: u8) {
        for (row, &bits) in glyph(code).iter().enumerate() {
            for col in 0..GLYPH_SIZE {
                // LSB is the leftmost pixel.
                let on = (bits >> col) & 0x01 != 0;
                self.set_pixel(x.saturating_add(col as i32), y.saturating_add(row as i32), on);
            }
        }
    }

    /// Draw `text` left to right starting at `(x, y)`.
    ///
    /// Stops before any glyph that would start past `WIDTH - 8` rather than
    /// drawing a partial glyph. Returns the number of glyphs drawn.
    pub fn draw_string(&mut self, x: i32, y: i32, text: &str) -> usize {
        self.draw_bytes(x, y, text.as_bytes())
    }

    /// Byte-string form of [`draw_string`](Self::draw_string); each byte
    /// selects one glyph.
    pub fn draw_bytes(&mut self, x: i32, y: i32, text: &[u8]) -> usize {
        let mut cursor_x = x;
        let mut drawn = 0;
        for &code in text {
            if cursor_x > WIDTH as i32 - ADVANCE {
                break;
            }
            self.draw_glyph(cursor_x, y, code);
            cursor_x += ADVANCE;
            drawn += 1;
        }
        drawn
    }

    /// Draw `text` horizontally centred on row `y`.
    ///
    /// Text wider than the panel starts at x = 0 and is truncated.
    pub fn draw_string_centered(&mut self, y: i32, text: &str) -> usize {
        self.draw_bytes_centered(y, text.as_bytes())
    }

    /// Byte-string form of [`draw_string_centered`](Self::draw_string_centered).
    pub fn draw_bytes_centered(&mut self, y: i32, text: &[u8]) -> usize {
        self.draw_bytes(centered_x(text.len()), y, text)
    }
}

/// Left edge that centres `len` glyphs, clamped to 0.
pub fn centered_x(len: usize) -> i32 {
    let text_width = i32::try_from(len).unwrap_or(i32::MAX).saturating_mul(ADVANCE);
    ((WIDTH as i32 - text_width) / 2).max(0)
}

// ── Tests ────────────────────────────────────────────────────────────────
