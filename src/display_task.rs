//! Long-running display tasks.
//!
//! Two firmwares share the driver:
//!
//! - [`greeting_task`] renders "Hello" / "World" once and then idles.
//! - [`line_echo_task`] shows each line received on a serial stream and
//!   echoes it back.
//!
//! These are regular `async fn`s — **not** Embassy `#[task]`s. Callers
//! wrap them in a thin concrete task, since Embassy tasks cannot be generic:
//!
//! ```ignore
//! #[embassy_executor::task]
//! async fn oled_task(driver: OledDriver<MyI2c>, config: OledConfig) {
//!     greeting_task(driver, config).await;
//! }
//! ```

use embassy_time::Timer;
use embedded_hal_async::i2c::I2c;
use embedded_io_async::{Read, Write};

use crate::config::OledConfig;
use crate::driver::OledDriver;
use crate::error::OledError;
use crate::font::GLYPH_SIZE;
use crate::line::LineBuffer;
use crate::panel::HEIGHT;

/// Row of the first greeting line.
pub const GREETING_TOP_Y: i32 = 12;

/// Row of the second greeting line.
pub const GREETING_BOTTOM_Y: i32 = 24;

/// Banner rendered and echoed once when the line echo starts.
pub const READY_BANNER: &[u8] = b"READY";

/// Row that vertically centres one line of text.
pub const LINE_Y: i32 = (HEIGHT as i32 - GLYPH_SIZE as i32) / 2;

/// Contrast applied once the line echo has initialised the panel.
pub const ECHO_CONTRAST: u8 = 0xFF;

/// Bytes requested from the serial stream per read.
const RX_BUF_SIZE: usize = 64;

// ── Greeting ─────────────────────────────────────────────────────────────

/// Initialise the panel and render the two-line greeting.
///
/// # Errors
///
/// * [`OledError::Init`] — nothing was drawn; the panel must not be used.
/// * [`OledError::Bus`] — the frame was only partially transmitted.
pub async fn show_greeting<I2C>(driver: &mut OledDriver<I2C>) -> Result<(), OledError<I2C::Error>>
where
    I2C: I2c,
{
    driver.init().await?;

    driver.clear_buffer();
    driver.draw_string_centered(GREETING_TOP_Y, "Hello");
    driver.draw_string_centered(GREETING_BOTTOM_Y, "World");

    driver.flush().await
}

/// One-shot greeting followed by an idle loop.
///
/// # Errors
///
/// * Initialisation failure: logs the error and **returns** (task exits).
/// * Flush failure: logs the error and idles anyway.
pub async fn greeting_task<I2C>(mut driver: OledDriver<I2C>, config: OledConfig)
where
    I2C: I2c,
{
    match show_greeting(&mut driver).await {
        Ok(()) => {
            #[cfg(feature = "defmt")]
            defmt::info!("Greeting rendered");
        }
        Err(OledError::Init(_e)) => {
            #[cfg(feature = "defmt")]
            defmt::error!(
                "OLED init failed at I2C address {=u8:#x}: {}",
                config.address,
                _e
            );
            return;
        }
        Err(_e) => {
            #[cfg(feature = "defmt")]
            defmt::warn!("Greeting flush failed: {}", _e);
        }
    }

    loop {
        Timer::after(config.idle_period()).await;
    }
}

// ── Line echo ────────────────────────────────────────────────────────────

/// Replace the panel contents with `text` centred on [`LINE_Y`].
pub async fn render_line<I2C>(
    driver: &mut OledDriver<I2C>,
    text: &[u8],
) -> Result<(), OledError<I2C::Error>>
where
    I2C: I2c,
{
    driver.clear_buffer();
    driver.framebuffer_mut().draw_bytes_centered(LINE_Y, text);
    driver.flush().await
}

/// Render `text`, then echo it on `serial` followed by `\r\n`.
///
/// A failed flush is logged and does not stop the echo.
///
/// # Errors
///
/// Returns the serial error if the echo could not be written.
pub async fn show_and_echo<I2C, S>(
    driver: &mut OledDriver<I2C>,
    serial: &mut S,
    text: &[u8],
) -> Result<(), S::Error>
where
    I2C: I2c,
    S: Write,
{
    if let Err(_e) = render_line(driver, text).await {
        #[cfg(feature = "defmt")]
        defmt::warn!("Line render failed: {}", _e);
    }

    serial.write_all(text).await?;
    serial.write_all(b"\r\n").await?;
    serial.flush().await
}

/// Feed a chunk of received bytes, showing and echoing every completed line.
///
/// # Errors
///
/// Returns the first serial write error; remaining bytes of `chunk` are
/// not processed.
pub async fn process_bytes<I2C, S>(
    driver: &mut OledDriver<I2C>,
    serial: &mut S,
    lines: &mut LineBuffer,
    chunk: &[u8],
) -> Result<(), S::Error>
where
    I2C: I2c,
    S: Write,
{
    for &byte in chunk {
        if let Some(line) = lines.push(byte) {
            #[cfg(feature = "defmt")]
            defmt::debug!("Line: {=[u8]:a}", &line[..]);
            show_and_echo(driver, serial, &line).await?;
        }
    }
    Ok(())
}

/// Serial line display loop.
///
/// # Control flow
///
/// 1. Initialise the display; on failure log and **return**. Then raise
///    the contrast to [`ECHO_CONTRAST`] (a failure is only logged).
/// 2. Render and echo [`READY_BANNER`].
/// 3. Read the serial stream forever, rendering and echoing each line.
///
/// Serial errors are logged and the loop continues.
pub async fn line_echo_task<I2C, S>(mut driver: OledDriver<I2C>, mut serial: S)
where
    I2C: I2c,
    S: Read + Write,
{
    if let Err(_e) = driver.init().await {
        #[cfg(feature = "defmt")]
        defmt::error!("OLED init failed: {}", _e);
        return;
    }

    if let Err(_e) = driver.panel_mut().set_contrast(ECHO_CONTRAST).await {
        #[cfg(feature = "defmt")]
        defmt::warn!("Set contrast failed: {}", _e);
    }

    if let Err(_e) = show_and_echo(&mut driver, &mut serial, READY_BANNER).await {
        #[cfg(feature = "defmt")]
        defmt::warn!("Serial write failed");
    }

    let mut lines = LineBuffer::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match serial.read(&mut buf).await {
            Ok(n) if n > 0 => {
                if let Err(_e) = process_bytes(&mut driver, &mut serial, &mut lines, &buf[..n]).await {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("Serial write failed");
                }
            }
            Ok(_) => {
                // No bytes read, continue
            }
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Serial read failed");
            }
        }
    }
}
