//! Built-in 8×8 bitmap font.
//!
//! One glyph per byte value. Each glyph is eight row bytes, top row first;
//! within a row the least significant bit is the leftmost pixel. Codes
//! 0x00–0x7F carry the public-domain "basic" set, codes 0x80–0xFF are blank.

use font8x8::legacy::BASIC_LEGACY;

/// Glyph width and height in pixels.
pub const GLYPH_SIZE: usize = 8;

/// Byte-indexed glyph table.
pub static FONT: [[u8; GLYPH_SIZE]; 256] = {
    let mut font = [[0u8; GLYPH_SIZE]; 256];

    let mut code = 0;
    while code < BASIC_LEGACY.len() {
        font[code] = BASIC_LEGACY[code];
        code += 1;
    }

    font
};

/// Bit pattern for `code`.
#[inline]
pub fn glyph(code: u8) -> &'static [u8; GLYPH_SIZE] {
    &FONT[code as usize]
}
