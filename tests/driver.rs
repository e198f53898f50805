//! Driver integration tests — init sequence, flush protocol and the
//! fatal-init short circuit, observed on a mocked I2C bus.
//!
//! Run with: cargo test --test driver

mod common;

use embedded_graphics::{
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
};
use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction as I2cTransaction};

use mini_oled_display_rs::bus::{SCAN_FIRST_ADDRESS, SCAN_LAST_ADDRESS};
use mini_oled_display_rs::panel::{cmd, INIT_SEQUENCE};
use mini_oled_display_rs::{
    BusError, Framebuffer, InitError, OledConfig, OledDriver, OledError, FRAME_BYTES, PAGES, WIDTH,
};

use common::{command, data, flush_expectations, init_expectations, nack, quiet_config, ADDR};

// ---------------------------------------------------------------------------
// Initialisation
// ---------------------------------------------------------------------------

#[tokio::test]
async fn new_generates_no_traffic() {
    let mut i2c = I2cMock::new(&[]);
    let oled = OledDriver::new(i2c.clone(), quiet_config());
    assert!(!oled.is_initialized());
    i2c.done();
}

#[tokio::test]
async fn init_sends_the_literal_sequence_in_order() {
    let mut i2c = I2cMock::new(&init_expectations());
    let mut oled = OledDriver::new(i2c.clone(), quiet_config());

    oled.init().await.expect("init must succeed when every step is acknowledged");
    assert!(oled.is_initialized());

    i2c.done();
}

#[tokio::test]
async fn init_scans_the_bus_first_when_enabled() {
    let mut expectations: Vec<I2cTransaction> = (SCAN_FIRST_ADDRESS..=SCAN_LAST_ADDRESS)
        .map(|address| {
            let probe = I2cTransaction::write(address, vec![]);
            if address == ADDR {
                probe
            } else {
                probe.with_error(nack())
            }
        })
        .collect();
    expectations.extend(init_expectations());

    let mut i2c = I2cMock::new(&expectations);
    let mut oled = OledDriver::new(i2c.clone(), OledConfig::default());

    oled.init().await.unwrap();

    i2c.done();
}

#[tokio::test]
async fn empty_scan_does_not_block_init() {
    let mut expectations: Vec<I2cTransaction> = (SCAN_FIRST_ADDRESS..=SCAN_LAST_ADDRESS)
        .map(|address| I2cTransaction::write(address, vec![]).with_error(nack()))
        .collect();
    expectations.extend(init_expectations());

    let mut i2c = I2cMock::new(&expectations);
    let mut oled = OledDriver::new(i2c.clone(), OledConfig::default());

    assert_eq!(oled.init().await, Ok(()));

    i2c.done();
}

/// A failure at any step aborts init, and nothing drawn afterwards reaches
/// the bus.
#[tokio::test]
async fn init_failure_at_any_step_blocks_rendering() {
    for failing_step in 0..INIT_SEQUENCE.len() {
        let mut expectations = init_expectations();
        expectations.truncate(failing_step + 1);
        let last = expectations.pop().unwrap();
        expectations.push(last.with_error(nack()));

        let mut i2c = I2cMock::new(&expectations);
        let mut oled = OledDriver::new(i2c.clone(), quiet_config());

        let result = oled.init().await;
        assert_eq!(
            result,
            Err(OledError::Init(InitError {
                step: failing_step,
                command: INIT_SEQUENCE[failing_step][0],
                source: BusError::I2c(nack()),
            })),
            "step {} must abort init",
            failing_step
        );
        assert!(!oled.is_initialized());

        oled.draw_string_centered(12, "Hello");
        assert_eq!(oled.flush().await, Err(OledError::NotInitialized));

        // No transaction beyond the failing step was issued.
        i2c.done();
    }
}

#[tokio::test]
async fn init_can_be_retried_by_the_caller() {
    let mut expectations = vec![command(&[cmd::DISPLAY_OFF]).with_error(nack())];
    expectations.extend(init_expectations());

    let mut i2c = I2cMock::new(&expectations);
    let mut oled = OledDriver::new(i2c.clone(), quiet_config());

    assert!(oled.init().await.is_err());
    assert!(oled.init().await.is_ok());
    assert!(oled.is_initialized());

    i2c.done();
}

// ---------------------------------------------------------------------------
// Flush protocol
// ---------------------------------------------------------------------------

#[tokio::test]
async fn flush_before_init_is_refused_without_traffic() {
    let mut i2c = I2cMock::new(&[]);
    let mut oled = OledDriver::new(i2c.clone(), quiet_config());

    assert_eq!(oled.flush().await, Err(OledError::NotInitialized));

    i2c.done();
}

#[tokio::test]
async fn flush_sends_five_addressed_pages_in_order() {
    let mut expected_frame = [0u8; FRAME_BYTES];
    // Mark each page so misordered pages would not match.
    for page in 0..PAGES {
        expected_frame[page * WIDTH] = 1 << page;
    }

    let mut expectations = init_expectations();
    let flush = flush_expectations(&expected_frame);
    assert_eq!(flush.len(), 2 * PAGES);
    expectations.extend(flush);

    let mut i2c = I2cMock::new(&expectations);
    let mut oled = OledDriver::new(i2c.clone(), quiet_config());
    oled.init().await.unwrap();

    for page in 0..PAGES as i32 {
        oled.framebuffer_mut().set_pixel(0, page * 8 + page, true);
    }
    assert_eq!(oled.framebuffer().as_bytes(), &expected_frame);

    oled.flush().await.unwrap();

    i2c.done();
}

#[tokio::test]
async fn addressing_triplet_uses_column_offset() {
    let mut expectations = init_expectations();
    expectations.push(command(&[0x0C, 0x11, 0xB0]));
    expectations.push(data(&[0u8; WIDTH]));
    expectations.push(command(&[0x0C, 0x11, 0xB1]));
    expectations.push(data(&[0u8; WIDTH]).with_error(nack()));

    let mut i2c = I2cMock::new(&expectations);
    let mut oled = OledDriver::new(i2c.clone(), quiet_config());
    oled.init().await.unwrap();

    // Failure on page 1 data aborts pages 2..4.
    assert_eq!(oled.flush().await, Err(OledError::Bus(BusError::I2c(nack()))));

    i2c.done();
}

#[tokio::test]
async fn failed_addressing_command_skips_the_page_data() {
    let mut expectations = init_expectations();
    expectations.push(command(&[0x0C, 0x11, 0xB0]).with_error(nack()));

    let mut i2c = I2cMock::new(&expectations);
    let mut oled = OledDriver::new(i2c.clone(), quiet_config());
    oled.init().await.unwrap();

    assert!(matches!(oled.flush().await, Err(OledError::Bus(_))));

    i2c.done();
}

#[tokio::test]
async fn next_flush_after_failure_resends_the_full_frame() {
    let frame = [0u8; FRAME_BYTES];

    let mut expectations = init_expectations();
    expectations.push(command(&[0x0C, 0x11, 0xB0]));
    expectations.push(data(&frame[..WIDTH]).with_error(nack()));
    expectations.extend(flush_expectations(&frame));

    let mut i2c = I2cMock::new(&expectations);
    let mut oled = OledDriver::new(i2c.clone(), quiet_config());
    oled.init().await.unwrap();

    assert!(oled.flush().await.is_err());
    assert!(oled.flush().await.is_ok());

    i2c.done();
}

#[tokio::test]
async fn hello_world_frame_reaches_the_panel() {
    let mut expected = Framebuffer::new();
    expected.draw_string(16, 12, "Hello");
    expected.draw_string(16, 24, "World");

    let mut expectations = init_expectations();
    expectations.extend(flush_expectations(expected.as_bytes()));

    let mut i2c = I2cMock::new(&expectations);
    let mut oled = OledDriver::new(i2c.clone(), quiet_config());
    oled.init().await.unwrap();

    oled.clear_buffer();
    assert_eq!(oled.draw_string_centered(12, "Hello"), 5);
    assert_eq!(oled.draw_string_centered(24, "World"), 5);
    oled.flush().await.unwrap();

    i2c.done();
}

#[tokio::test]
async fn embedded_graphics_drawing_is_flushed() {
    let mut expected = Framebuffer::new();
    for x in 0..WIDTH as i32 {
        expected.set_pixel(x, 39, true);
    }

    let mut expectations = init_expectations();
    expectations.extend(flush_expectations(expected.as_bytes()));

    let mut i2c = I2cMock::new(&expectations);
    let mut oled = OledDriver::new(i2c.clone(), quiet_config());
    oled.init().await.unwrap();

    Line::new(Point::new(-10, 39), Point::new(100, 39))
        .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
        .draw(oled.framebuffer_mut())
        .unwrap();
    oled.flush().await.unwrap();

    i2c.done();
}

// ---------------------------------------------------------------------------
// Panel controls
// ---------------------------------------------------------------------------

#[tokio::test]
async fn panel_controls_send_single_commands() {
    let mut i2c = I2cMock::new(&[
        command(&[cmd::SET_CONTRAST, 0xFF]),
        command(&[cmd::DISPLAY_OFF]),
        command(&[cmd::DISPLAY_ON]),
        command(&[cmd::SET_INVERSE]),
        command(&[cmd::SET_NORMAL]),
    ]);
    let mut oled = OledDriver::new(i2c.clone(), quiet_config());

    let panel = oled.panel_mut();
    panel.set_contrast(0xFF).await.unwrap();
    panel.set_display_on(false).await.unwrap();
    panel.set_display_on(true).await.unwrap();
    panel.set_inverted(true).await.unwrap();
    panel.set_inverted(false).await.unwrap();

    i2c.done();
}

#[tokio::test]
async fn release_returns_the_bus() {
    let i2c = I2cMock::new(&[]);
    let oled = OledDriver::new(i2c, quiet_config());
    let mut i2c = oled.release();
    i2c.done();
}
