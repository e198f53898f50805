//! Async driver for the 0.42" SSD1306 OLED (72×40 visible pixels) using Embassy.
//!
//! This crate talks to the controller directly over any
//! `embedded-hal-async` I2C bus. It provides:
//!
//! - [`OledDriver`] — power-on sequence, an in-memory page-packed
//!   [`Framebuffer`] and the page-by-page flush protocol.
//! - An 8×8 bitmap font with left-aligned and centred string drawing.
//! - [`LineBuffer`] — the accumulate-until-newline policy used to show
//!   serial input.
//! - [`greeting_task`] and [`line_echo_task`] — ready-made display loops.
//!
//! # Quick Start
//!
//! ```ignore
//! use mini_oled_display_rs::{OledConfig, OledDriver, greeting_task};
//!
//! // In your Embassy main:
//! let oled = OledDriver::new(i2c, OledConfig::default());
//! spawner.spawn(oled_task(oled, OledConfig::default())).unwrap();
//!
//! // Thin task wrapper (Embassy tasks cannot be generic):
//! #[embassy_executor::task]
//! async fn oled_task(driver: OledDriver<MyI2cType>, config: OledConfig) {
//!     greeting_task(driver, config).await;
//! }
//! ```
//!
//! # Crate Features
//!
//! - **`task`** *(default)* — the display loops in [`display_task`], which
//!   need `embedded-io-async` for the serial stream.
//! - **`defmt`** — structured logging via [`defmt`].

#![no_std]

pub mod bus;
pub mod config;
#[cfg(feature = "task")]
pub mod display_task;
pub mod driver;
pub mod error;
pub mod font;
pub mod framebuffer;
pub mod line;
pub mod panel;
pub mod text;

// ── Re-exports for convenience ───────────────────────────────────────────

pub use bus::{I2cTransport, CONTROL_COMMAND, CONTROL_DATA};
pub use config::{OledConfig, DEFAULT_ADDRESS};
#[cfg(feature = "task")]
pub use display_task::{greeting_task, line_echo_task};
pub use driver::OledDriver;
pub use error::{BusError, InitError, OledError};
pub use framebuffer::Framebuffer;
pub use line::{LineBuffer, LINE_CAPACITY};
pub use panel::{Panel, FRAME_BYTES, HEIGHT, PAGES, WIDTH, X_OFFSET};
