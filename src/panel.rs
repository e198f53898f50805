//! SSD1306 panel controller for the 0.42" 72×40 module.
//!
//! The controller has 128 columns of display RAM, of which only the
//! 72 columns starting at [`X_OFFSET`] are wired to the glass. Rows are
//! grouped into pages of eight; a data byte fills one column of one page.
//!
//! [`Panel`] runs the power-on register sequence and exposes the raw
//! command and data primitives used by the flush protocol.

use embedded_hal_async::i2c::I2c;

use crate::bus::I2cTransport;
use crate::config::OledConfig;
use crate::error::{BusError, InitError};

// ── Geometry ─────────────────────────────────────────────────────────────

/// Visible width in pixels.
pub const WIDTH: usize = 72;

/// Visible height in pixels.
pub const HEIGHT: usize = 40;

/// First controller RAM column that is visible on the glass.
pub const X_OFFSET: usize = 28;

/// Number of 8-row pages covering [`HEIGHT`].
pub const PAGES: usize = (HEIGHT + 7) / 8;

/// Bytes in one full frame.
pub const FRAME_BYTES: usize = WIDTH * PAGES;

/// SSD1306 command opcodes.
pub mod cmd {
    pub const DISPLAY_OFF: u8 = 0xAE;
    pub const DISPLAY_ON: u8 = 0xAF;
    pub const SET_CLOCK_DIV: u8 = 0xD5;
    pub const SET_MUX_RATIO: u8 = 0xA8;
    pub const SET_DISPLAY_OFFSET: u8 = 0xD3;
    pub const SET_IREF: u8 = 0xAD;
    pub const SET_CHARGE_PUMP: u8 = 0x8D;
    pub const SET_START_LINE: u8 = 0x40;
    pub const SET_NORMAL: u8 = 0xA6;
    pub const SET_INVERSE: u8 = 0xA7;
    pub const RESUME_FROM_RAM: u8 = 0xA4;
    pub const SET_MEMORY_MODE: u8 = 0x20;
    pub const SET_SEG_REMAP: u8 = 0xA1;
    pub const SET_COM_SCAN_DEC: u8 = 0xC8;
    pub const SET_COM_PINS: u8 = 0xDA;
    pub const SET_CONTRAST: u8 = 0x81;
    pub const SET_PRECHARGE: u8 = 0xD9;
    pub const SET_VCOM_DETECT: u8 = 0xDB;
    pub const DEACTIVATE_SCROLL: u8 = 0x2E;
    pub const SET_LOW_COLUMN: u8 = 0x00;
    pub const SET_HIGH_COLUMN: u8 = 0x10;
    pub const SET_PAGE_ADDR: u8 = 0xB0;
}

/// Power-on register writes, in the order the panel requires.
///
/// Each entry is sent as its own command transaction. Neither the order nor
/// the values may change: the 72×40 glass only lights correctly with this
/// exact sequence.
pub const INIT_SEQUENCE: &[&[u8]] = &[
    &[cmd::DISPLAY_OFF],
    &[cmd::SET_CLOCK_DIV, 0x80],
    &[cmd::SET_MUX_RATIO, 0x27], // 1/40 duty
    &[cmd::SET_DISPLAY_OFFSET, 0x00],
    &[cmd::SET_IREF, 0x30], // internal IREF, 0.42" variant
    &[cmd::SET_CHARGE_PUMP, 0x14],
    &[cmd::SET_START_LINE],
    &[cmd::SET_NORMAL],
    &[cmd::RESUME_FROM_RAM],
    &[cmd::SET_MEMORY_MODE, 0x00], // horizontal addressing
    &[cmd::SET_SEG_REMAP],
    &[cmd::SET_COM_SCAN_DEC],
    &[cmd::SET_COM_PINS, 0x12],
    &[cmd::SET_CONTRAST, 0xAF],
    &[cmd::SET_PRECHARGE, 0x22],
    &[cmd::SET_VCOM_DETECT, 0x20],
    &[cmd::DEACTIVATE_SCROLL],
    &[cmd::DISPLAY_ON],
];

/// Column/page addressing commands that precede each page of a flush.
///
/// Low column nibble, high column nibble, then the page address, all
/// pointing at the first visible column.
pub const fn column_page_address(page: u8) -> [u8; 3] {
    [
        cmd::SET_LOW_COLUMN | (X_OFFSET as u8 & 0x0F),
        cmd::SET_HIGH_COLUMN | ((X_OFFSET as u8 >> 4) & 0x0F),
        cmd::SET_PAGE_ADDR | (page & 0x0F),
    ]
}

/// SSD1306 controller behind an [`I2cTransport`].
pub struct Panel<I2C> {
    transport: I2cTransport<I2C>,
    /// Set after the full [`INIT_SEQUENCE`] was acknowledged.
    initialized: bool,
}

impl<I2C> Panel<I2C>
where
    I2C: I2c,
{
    /// Construct an uninitialised panel. No I2C traffic is generated.
    pub fn new(i2c: I2C, config: OledConfig) -> Self {
        Self {
            transport: I2cTransport::new(i2c, config),
            initialized: false,
        }
    }

    /// Run the power-on sequence.
    ///
    /// Stops at the first register write that fails. There is no retry;
    /// calling `init()` again restarts the whole sequence.
    ///
    /// # Errors
    /// [`InitError`] naming the failed step and its opcode.
    pub async fn init(&mut self) -> Result<(), InitError<I2C::Error>> {
        self.initialized = false;

        for (step, bytes) in INIT_SEQUENCE.iter().enumerate() {
            if let Err(source) = self.transport.write_command(bytes).await {
                return Err(InitError {
                    step,
                    command: bytes[0],
                    source,
                });
            }
        }

        self.initialized = true;
        Ok(())
    }

    /// `true` once [`init()`](Self::init) has completed.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Send command bytes in one command-framed transaction.
    pub async fn send_command(&mut self, bytes: &[u8]) -> Result<(), BusError<I2C::Error>> {
        self.transport.write_command(bytes).await
    }

    /// Send display RAM bytes in one data-framed transaction.
    pub async fn send_data(&mut self, bytes: &[u8]) -> Result<(), BusError<I2C::Error>> {
        self.transport.write_data(bytes).await
    }

    /// Set display contrast (0-255).
    pub async fn set_contrast(&mut self, contrast: u8) -> Result<(), BusError<I2C::Error>> {
        self.send_command(&[cmd::SET_CONTRAST, contrast]).await
    }

    /// Turn the panel on or off. Display RAM is retained while off.
    pub async fn set_display_on(&mut self, on: bool) -> Result<(), BusError<I2C::Error>> {
        if on {
            self.send_command(&[cmd::DISPLAY_ON]).await
        } else {
            self.send_command(&[cmd::DISPLAY_OFF]).await
        }
    }

    /// Invert display colors
    pub async fn set_inverted(&mut self, inverted: bool) -> Result<(), BusError<I2C::Error>> {
        if inverted {
            self.send_command(&[cmd::SET_INVERSE]).await
        } else {
            self.send_command(&[cmd::SET_NORMAL]).await
        }
    }

    /// Access the underlying transport, e.g. for a diagnostic scan.
    pub fn transport_mut(&mut self) -> &mut I2cTransport<I2C> {
        &mut self.transport
    }

    /// Release the I2C peripheral.
    pub fn release(self) -> I2C {
        self.transport.release()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn geometry_describes_one_frame() {
        assert_eq!(PAGES, 5);
        assert_eq!(FRAME_BYTES, 360);
        assert!(PAGES * 8 >= HEIGHT);
        assert!(X_OFFSET + WIDTH <= 128);
    }

    #[test]
    fn addressing_points_at_first_visible_column() {
        assert_eq!(column_page_address(0), [0x0C, 0x11, 0xB0]);
        assert_eq!(column_page_address(4), [0x0C, 0x11, 0xB4]);
    }

    #[test]
    fn init_sequence_is_the_literal_register_list() {
        let mut flat = [0u8; 64];
        let mut len = 0;
        for step in INIT_SEQUENCE {
            flat[len..len + step.len()].copy_from_slice(step);
            len += step.len();
        }
        assert_eq!(
            &flat[..len],
            &[
                0xAE, 0xD5, 0x80, 0xA8, 0x27, 0xD3, 0x00, 0xAD, 0x30, 0x8D, 0x14, 0x40, 0xA6,
                0xA4, 0x20, 0x00, 0xA1, 0xC8, 0xDA, 0x12, 0x81, 0xAF, 0xD9, 0x22, 0xDB, 0x20,
                0x2E, 0xAF,
            ]
        );
        assert_eq!(INIT_SEQUENCE.len(), 18);
    }
}
