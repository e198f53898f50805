//! Serial line display
//!
//! Shows each newline-terminated line received on UART0 centred on the
//! OLED and echoes it back. Lines longer than ten characters are
//! truncated. "READY" is shown and echoed once the panel is up.
//!
//! # Wiring
//!
//! | Signal    | Pico 2 Pin | Notes           |
//! |-----------|------------|-----------------|
//! | UART0 TX  | GP0        | 115200 8N1      |
//! | UART0 RX  | GP1        |                 |
//! | I2C0 SDA  | GP20       |                 |
//! | I2C0 SCL  | GP21       |                 |

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::block::ImageDef;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, UART0};
use embassy_rp::uart::{BufferedInterruptHandler, BufferedUart, Config as UartConfig, Uart};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use mini_oled_display_rs::{line_echo_task, OledConfig, OledDriver};

/// Tell the Boot ROM about our application.
#[link_section = ".start_block"]
#[used]
pub static IMAGE_DEF: ImageDef = embassy_rp::block::ImageDef::secure_exe();

bind_interrupts!(struct Irqs {
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

static TX_BUF: StaticCell<[u8; 64]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 64]> = StaticCell::new();

type OledI2c = I2c<'static, I2C0, i2c::Async>;

#[embassy_executor::task]
async fn echo_task(driver: OledDriver<OledI2c>, serial: BufferedUart) {
    line_echo_task(driver, serial).await;
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let p = embassy_rp::init(Default::default());
    info!("Line echo starting");

    let i2c = I2c::new_async(p.I2C0, p.PIN_21, p.PIN_20, Irqs, i2c::Config::default());
    let oled = OledDriver::new(i2c, OledConfig::default());

    let tx_buf = TX_BUF.init([0u8; 64]);
    let rx_buf = RX_BUF.init([0u8; 64]);

    let uart_config = UartConfig::default(); // 115200 baud default
    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);

    spawner.spawn(unwrap!(echo_task(oled, uart)));
}
