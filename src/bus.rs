//! I2C bus transport.
//!
//! Frames controller writes as `[address << 1 | W] [control] [payload..]`
//! where the control byte tells the SSD1306 how to interpret the payload.
//! Every transaction is bounded by a timeout and never retried; the first
//! failure is returned to the caller.

use embassy_time::with_timeout;
use embedded_hal_async::i2c::I2c;
use heapless::Vec;

use crate::config::OledConfig;
use crate::error::BusError;

/// Control byte selecting command interpretation of the payload.
pub const CONTROL_COMMAND: u8 = 0x00;

/// Control byte selecting display RAM (pixel data) interpretation.
pub const CONTROL_DATA: u8 = 0x40;

/// Largest payload carried by a single transaction: one full row of the
/// controller's 128-column page RAM.
pub const MAX_PAYLOAD: usize = 128;

/// Lowest 7-bit address probed by [`I2cTransport::scan`].
pub const SCAN_FIRST_ADDRESS: u8 = 0x03;

/// Highest 7-bit address probed by [`I2cTransport::scan`].
pub const SCAN_LAST_ADDRESS: u8 = 0x77;

/// Number of addresses covered by a scan.
pub const SCAN_SLOTS: usize = (SCAN_LAST_ADDRESS - SCAN_FIRST_ADDRESS) as usize + 1;

/// Owns the I2C peripheral and applies the configured timeouts.
pub struct I2cTransport<I2C> {
    i2c: I2C,
    config: OledConfig,
}

impl<I2C> I2cTransport<I2C>
where
    I2C: I2c,
{
    /// Create a transport. No bus traffic is generated.
    ///
    /// # Arguments
    /// * `i2c` — I2C peripheral (takes ownership for exclusive access).
    /// * `config` — address and timeouts.
    pub fn new(i2c: I2C, config: OledConfig) -> Self {
        Self { i2c, config }
    }

    /// The configuration this transport was built with.
    pub fn config(&self) -> &OledConfig {
        &self.config
    }

    /// Write one framed transaction to `address`.
    ///
    /// An empty `payload` is a successful no-op and generates no bus
    /// traffic.
    ///
    /// # Errors
    /// * [`BusError::Overflow`] if `payload` exceeds [`MAX_PAYLOAD`].
    /// * [`BusError::Timeout`] if the write does not finish within
    ///   `write_timeout_ms`.
    /// * [`BusError::I2c`] if the bus reports a failure (e.g. NACK).
    pub async fn write(
        &mut self,
        address: u8,
        control: u8,
        payload: &[u8],
    ) -> Result<(), BusError<I2C::Error>> {
        if payload.is_empty() {
            return Ok(());
        }

        // Full write buffer: [control, payload..]
        let mut frame: Vec<u8, { MAX_PAYLOAD + 1 }> = Vec::new();
        frame.push(control).map_err(|_| BusError::Overflow)?;
        frame
            .extend_from_slice(payload)
            .map_err(|_| BusError::Overflow)?;

        match with_timeout(self.config.write_timeout(), self.i2c.write(address, &frame)).await {
            Ok(result) => result.map_err(BusError::I2c),
            Err(_) => Err(BusError::Timeout),
        }
    }

    /// Command-framed write to the configured display address.
    pub async fn write_command(&mut self, bytes: &[u8]) -> Result<(), BusError<I2C::Error>> {
        self.write(self.config.address, CONTROL_COMMAND, bytes).await
    }

    /// Data-framed write to the configured display address.
    pub async fn write_data(&mut self, bytes: &[u8]) -> Result<(), BusError<I2C::Error>> {
        self.write(self.config.address, CONTROL_DATA, bytes).await
    }

    /// Address-only probe: start, address + write bit, stop.
    ///
    /// # Errors
    /// [`BusError::Timeout`] after `probe_timeout_ms`, or [`BusError::I2c`]
    /// when nothing acknowledges.
    pub async fn probe(&mut self, address: u8) -> Result<(), BusError<I2C::Error>> {
        match with_timeout(self.config.probe_timeout(), self.i2c.write(address, &[])).await {
            Ok(result) => result.map_err(BusError::I2c),
            Err(_) => Err(BusError::Timeout),
        }
    }

    /// Probe every valid 7-bit address and report the responders.
    ///
    /// Diagnostic only: failures are expected for empty addresses and are
    /// never surfaced. Logs each responding address and warns when the bus
    /// appears empty.
    pub async fn scan(&mut self) -> Vec<u8, SCAN_SLOTS> {
        #[cfg(feature = "defmt")]
        defmt::info!(
            "I2C scan: {=u8:#x}..={=u8:#x}",
            SCAN_FIRST_ADDRESS,
            SCAN_LAST_ADDRESS
        );

        let mut found = Vec::new();
        for address in SCAN_FIRST_ADDRESS..=SCAN_LAST_ADDRESS {
            if self.probe(address).await.is_ok() {
                #[cfg(feature = "defmt")]
                defmt::info!("I2C device found at {=u8:#x}", address);
                // Capacity equals the number of probed addresses.
                let _ = found.push(address);
            }
        }

        if found.is_empty() {
            #[cfg(feature = "defmt")]
            defmt::warn!("No I2C devices found (check wiring/pins/pullups)");
        }

        found
    }

    /// Release the I2C peripheral.
    pub fn release(self) -> I2C {
        self.i2c
    }
}
