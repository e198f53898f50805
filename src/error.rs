//! Error types for the OLED display driver.

use core::fmt;

/// Failure of a single bus transaction.
///
/// Generic over the I2C implementation's error type so the underlying
/// cause is never lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BusError<E> {
    /// The bus reported an error (typically the target did not acknowledge).
    I2c(E),
    /// The transaction did not complete within the configured timeout.
    Timeout,
    /// The payload does not fit in one framed transaction.
    Overflow,
}

impl<E: fmt::Debug> fmt::Display for BusError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            BusError::I2c(e) => write!(f, "I2C error: {:?}", e),
            BusError::Timeout => write!(f, "I2C transaction timed out"),
            BusError::Overflow => write!(f, "Payload too long for one transaction"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for BusError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            BusError::I2c(_e) => defmt::write!(f, "I2C error"),
            BusError::Timeout => defmt::write!(f, "I2C timeout"),
            BusError::Overflow => defmt::write!(f, "Payload overflow"),
        }
    }
}

/// A step of the power-on sequence failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitError<E> {
    /// Index into [`INIT_SEQUENCE`](crate::panel::INIT_SEQUENCE).
    pub step: usize,
    /// Opcode of the register write that failed.
    pub command: u8,
    /// The transaction failure.
    pub source: BusError<E>,
}

impl<E: fmt::Debug> fmt::Display for InitError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "Init step {} (command 0x{:02X}) failed: {}",
            self.step, self.command, self.source
        )
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for InitError<E> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "Init step {} (command {=u8:#x}) failed: {}",
            self.step,
            self.command,
            self.source
        )
    }
}

/// Errors that can occur during OLED display operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OledError<E> {
    /// A command or data transaction failed.
    Bus(BusError<E>),
    /// The power-on sequence failed. Fatal: the panel must not be rendered to.
    Init(InitError<E>),
    /// An operation was attempted before [`OledDriver::init()`](crate::OledDriver::init)
    /// succeeded.
    NotInitialized,
}

impl<E> From<BusError<E>> for OledError<E> {
    fn from(e: BusError<E>) -> Self {
        OledError::Bus(e)
    }
}

impl<E> From<InitError<E>> for OledError<E> {
    fn from(e: InitError<E>) -> Self {
        OledError::Init(e)
    }
}

impl<E: fmt::Debug> fmt::Display for OledError<E> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            OledError::Bus(e) => write!(f, "Bus error: {}", e),
            OledError::Init(e) => write!(f, "{}", e),
            OledError::NotInitialized => write!(f, "Display not initialized"),
        }
    }
}

#[cfg(feature = "defmt")]
impl<E> defmt::Format for OledError<E> {
    fn format(&self, f: defmt::Formatter) {
        match self {
            OledError::Bus(e) => defmt::write!(f, "Bus error: {}", e),
            OledError::Init(e) => defmt::write!(f, "{}", e),
            OledError::NotInitialized => defmt::write!(f, "Not initialized"),
        }
    }
}
