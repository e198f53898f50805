//! Shared helpers for the integration tests.
//!
//! Builds `embedded-hal-mock` I2C expectations for the exact transactions
//! the driver is supposed to emit.

#![allow(dead_code)]

use embedded_hal_async::i2c::{ErrorKind, NoAcknowledgeSource};
use embedded_hal_mock::eh1::i2c::Transaction as I2cTransaction;

use mini_oled_display_rs::panel::{column_page_address, INIT_SEQUENCE};
use mini_oled_display_rs::{OledConfig, CONTROL_COMMAND, CONTROL_DATA, FRAME_BYTES, PAGES, WIDTH};

/// Display address used throughout the tests.
pub const ADDR: u8 = 0x3C;

/// Default configuration without the diagnostic scan, so tests only see
/// display traffic.
pub fn quiet_config() -> OledConfig {
    OledConfig {
        scan_before_init: false,
        ..OledConfig::default()
    }
}

/// The NACK a missing device produces.
pub fn nack() -> ErrorKind {
    ErrorKind::NoAcknowledge(NoAcknowledgeSource::Address)
}

/// Expected write for a command transaction.
pub fn command(bytes: &[u8]) -> I2cTransaction {
    let mut frame = vec![CONTROL_COMMAND];
    frame.extend_from_slice(bytes);
    I2cTransaction::write(ADDR, frame)
}

/// Expected write for a data transaction.
pub fn data(bytes: &[u8]) -> I2cTransaction {
    let mut frame = vec![CONTROL_DATA];
    frame.extend_from_slice(bytes);
    I2cTransaction::write(ADDR, frame)
}

/// Every register write of the power-on sequence, in order.
pub fn init_expectations() -> Vec<I2cTransaction> {
    INIT_SEQUENCE.iter().map(|step| command(step)).collect()
}

/// Addressing triplet plus page data for every page of `frame`.
pub fn flush_expectations(frame: &[u8; FRAME_BYTES]) -> Vec<I2cTransaction> {
    (0..PAGES)
        .flat_map(|page| {
            [
                command(&column_page_address(page as u8)),
                data(&frame[page * WIDTH..(page + 1) * WIDTH]),
            ]
        })
        .collect()
}
