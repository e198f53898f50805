//! Driver and task configuration.
//!
//! [`OledConfig`] is the single source of bus and timing parameters. The
//! panel geometry is fixed by the hardware and lives in [`crate::panel`]
//! instead.

use embassy_time::Duration;

/// Default 7-bit I2C address of the 0.42" SSD1306 module.
pub const DEFAULT_ADDRESS: u8 = 0x3C;

/// Configuration for the OLED driver and its tasks.
///
/// [`OledConfig::default()`] reproduces the stock board setup: address
/// `0x3C`, 100 ms write timeout, 30 ms probe timeout, a diagnostic bus
/// scan before initialisation and a 1 s idle period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct OledConfig {
    /// 7-bit I2C address of the display controller. Default: `0x3C`.
    pub address: u8,
    /// Upper bound for a single command or data write. Default: 100 ms.
    pub write_timeout_ms: u64,
    /// Upper bound for an address-only probe during a scan. Default: 30 ms.
    pub probe_timeout_ms: u64,
    /// Run [`I2cTransport::scan`](crate::bus::I2cTransport::scan) before
    /// the init sequence. The result is only logged. Default: `true`.
    pub scan_before_init: bool,
    /// Sleep interval of the idle loop after a one-shot render. Default: 1000 ms.
    pub idle_period_ms: u64,
}

impl Default for OledConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_ADDRESS,
            write_timeout_ms: 100,
            probe_timeout_ms: 30,
            scan_before_init: true,
            idle_period_ms: 1000,
        }
    }
}

impl OledConfig {
    /// Timeout applied to command and data writes.
    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }

    /// Timeout applied to address probes.
    pub fn probe_timeout(&self) -> Duration {
        Duration::from_millis(self.probe_timeout_ms)
    }

    /// Period of the idle loop.
    pub fn idle_period(&self) -> Duration {
        Duration::from_millis(self.idle_period_ms)
    }
}
