//! Core OLED driver: panel lifecycle plus the framebuffer flush protocol.
//!
//! [`OledDriver`] manages the 72×40 display lifecycle: construction without
//! I2C traffic, explicit async initialisation, drawing into an in-memory
//! frame, and page-by-page flush.

use embedded_hal_async::i2c::I2c;

use crate::bus::SCAN_SLOTS;
use crate::config::OledConfig;
use crate::error::OledError;
use crate::framebuffer::Framebuffer;
use crate::panel::{column_page_address, Panel, PAGES};

/// Async driver for the 0.42" SSD1306 72×40 OLED over I2C.
///
/// # Lifecycle
///
/// 1. [`OledDriver::new()`] — constructs the driver without any I2C traffic.
/// 2. [`OledDriver::init()`] — sends the SSD1306 initialisation sequence.
/// 3. Draw into the frame buffer via the `draw_*` helpers or
///    [`OledDriver::framebuffer_mut()`].
/// 4. [`OledDriver::flush()`] — transfers the frame buffer to hardware.
///
/// # Example
///
/// ```no_run
/// use mini_oled_display_rs::{OledConfig, OledDriver};
///
/// # async fn example(i2c: impl embedded_hal_async::i2c::I2c) {
/// let mut oled = OledDriver::new(i2c, OledConfig::default());
/// oled.init().await.unwrap();
/// oled.clear_buffer();
/// oled.draw_string_centered(16, "Hi");
/// oled.flush().await.unwrap();
/// # }
/// ```
pub struct OledDriver<I2C> {
    panel: Panel<I2C>,
    /// Single frame, reused for every render.
    framebuffer: Framebuffer,
    scan_before_init: bool,
}

impl<I2C> OledDriver<I2C>
where
    I2C: I2c,
{
    /// Construct an uninitialised driver.
    ///
    /// No I2C traffic is generated. You **must** call [`init()`](Self::init)
    /// before [`flush()`](Self::flush).
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access).
    /// * `config` — address, timeouts and scan behaviour.
    pub fn new(i2c: I2C, config: OledConfig) -> Self {
        Self {
            panel: Panel::new(i2c, config),
            framebuffer: Framebuffer::new(),
            scan_before_init: config.scan_before_init,
        }
    }

    /// Initialise the SSD1306 hardware.
    ///
    /// Optionally scans the bus first (diagnostics only, the result never
    /// affects initialisation), then sends the power-on sequence. A failure
    /// is fatal for rendering: [`flush()`](Self::flush) stays disabled until
    /// a later `init()` succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::Init`] naming the step that was not acknowledged.
    pub async fn init(&mut self) -> Result<(), OledError<I2C::Error>> {
        if self.scan_before_init {
            self.scan().await;
        }

        self.panel.init().await?;

        #[cfg(feature = "defmt")]
        defmt::debug!("SSD1306 init sequence acknowledged");

        Ok(())
    }

    /// Probe the whole bus and return the responding addresses.
    pub async fn scan(&mut self) -> heapless::Vec<u8, SCAN_SLOTS> {
        self.panel.transport_mut().scan().await
    }

    /// Clear the in-memory frame buffer.
    ///
    /// Does **not** send any I2C traffic — the display is unchanged until
    /// [`flush()`](Self::flush) is called.
    pub fn clear_buffer(&mut self) {
        self.framebuffer.clear();
    }

    /// Transfer the frame buffer to the display.
    ///
    /// Each page is sent as one addressing command transaction followed by
    /// one data transaction of `WIDTH` bytes, pages in ascending order.
    /// The first failure aborts the remaining pages; pages already sent stay
    /// on the panel. The next flush resends the full frame.
    ///
    /// # Errors
    ///
    /// Returns [`OledError::NotInitialized`] if [`init()`](Self::init) has
    /// not succeeded, or [`OledError::Bus`] on a bus-level failure.
    pub async fn flush(&mut self) -> Result<(), OledError<I2C::Error>> {
        if !self.panel.is_initialized() {
            return Err(OledError::NotInitialized);
        }

        for page in 0..PAGES {
            self.panel
                .send_command(&column_page_address(page as u8))
                .await?;
            self.panel.send_data(self.framebuffer.page(page)).await?;
        }

        #[cfg(feature = "defmt")]
        defmt::trace!("Frame flushed, {=u32} pixels lit", self.framebuffer.lit_pixels());

        Ok(())
    }

    /// Draw `text` at `(x, y)`; see [`Framebuffer::draw_string`].
    pub fn draw_string(&mut self, x: i32, y: i32, text: &str) -> usize {
        self.framebuffer.draw_string(x, y, text)
    }

    /// Draw `text` centred on row `y`; see [`Framebuffer::draw_string_centered`].
    pub fn draw_string_centered(&mut self, y: i32, text: &str) -> usize {
        self.framebuffer.draw_string_centered(y, text)
    }

    /// The frame that the next [`flush()`](Self::flush) will send.
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Mutable access to the frame, also an `embedded-graphics`
    /// [`DrawTarget`](embedded_graphics::draw_target::DrawTarget).
    pub fn framebuffer_mut(&mut self) -> &mut Framebuffer {
        &mut self.framebuffer
    }

    /// Direct access to the controller for contrast, power and inversion.
    pub fn panel_mut(&mut self) -> &mut Panel<I2C> {
        &mut self.panel
    }

    /// Check whether the display has been successfully initialised.
    ///
    /// No I2C traffic is generated.
    pub fn is_initialized(&self) -> bool {
        self.panel.is_initialized()
    }

    /// Release the I2C peripheral.
    pub fn release(self) -> I2C {
        self.panel.release()
    }
}
