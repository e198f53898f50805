//! Hello / World greeting
//!
//! Initialises the 72×40 OLED, renders "Hello" and "World" centred on two
//! rows and then idles. If the panel does not answer during init the task
//! logs the failing step and exits; nothing is drawn.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes           |
//! |-----------|------------|-----------------|
//! | I2C0 SDA  | GP20       |                 |
//! | I2C0 SCL  | GP21       |                 |
//! | OLED VCC  | 3V3        |                 |
//! | OLED GND  | GND        |                 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use {defmt_rtt as _, panic_probe as _};

use mini_oled_display_rs::{greeting_task, OledConfig, OledDriver};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

// Wire the I2C0 interrupt to Embassy's handler.
bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
});

type OledI2c = I2c<'static, I2C0, i2c::Async>;

/// Thin wrapper that monomorphises the generic `greeting_task`.
#[embassy_executor::task]
async fn oled_task(driver: OledDriver<OledI2c>, config: OledConfig) {
    greeting_task(driver, config).await;
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Hello OLED starting");

    // Standard mode; the panel also runs at 400 kHz.
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = 100_000;

    let i2c = I2c::new_async(
        p.I2C0,
        p.PIN_21, // SCL
        p.PIN_20, // SDA
        Irqs,
        i2c_config,
    );

    let config = OledConfig::default();
    let oled = OledDriver::new(i2c, config);

    spawner.spawn(unwrap!(oled_task(oled, config)));
}
