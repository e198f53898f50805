//! Serial line accumulator.
//!
//! Collects bytes from a serial stream until `\n` or `\r`, then hands the
//! completed line to the caller. Lines hold at most [`LINE_CAPACITY`]
//! characters (what fits across the panel plus one); anything past that
//! before the terminator is silently dropped.

use heapless::Vec;

/// Maximum characters kept per line.
pub const LINE_CAPACITY: usize = 10;

/// A completed line.
pub type Line = Vec<u8, LINE_CAPACITY>;

/// Accumulate-then-flush-on-terminator line buffer.
#[derive(Debug, Default)]
pub struct LineBuffer {
    buffer: Line,
}

impl LineBuffer {
    /// An empty buffer.
    pub const fn new() -> Self {
        Self { buffer: Vec::new() }
    }

    /// Feed one byte.
    ///
    /// Returns the accumulated line when `byte` is a terminator and the
    /// line is non-empty; the buffer is reset in that case. A terminator
    /// on an empty buffer yields nothing, so `"\r\n"` ends a single line.
    pub fn push(&mut self, byte: u8) -> Option<Line> {
        if byte == b'\n' || byte == b'\r' {
            if self.buffer.is_empty() {
                return None;
            }
            return Some(core::mem::take(&mut self.buffer));
        }

        // Overflow is dropped; the line keeps its first LINE_CAPACITY bytes.
        let _ = self.buffer.push(byte);
        None
    }

    /// Bytes accumulated so far.
    pub fn pending(&self) -> &[u8] {
        &self.buffer
    }

    /// Discard any partial line.
    pub fn reset(&mut self) {
        self.buffer.clear();
    }
}
