//! Interface abstraction for register I/O.

pub(crate) mod address;
pub(crate) mod i2c;
pub(crate) mod spi;

pub use address::Adxl345Address;
pub use i2c::I2cInterface;
pub use spi::SpiInterface;

use crate::error::Error;

pub(crate) mod sealed {
    pub trait Sealed {}
}

/// Minimal async register I/O for the device core.
///
/// Each call is exactly one bus transaction.
#[allow(async_fn_in_trait)]
pub trait Interface: sealed::Sealed {
    /// Reads a single register.
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error>;
    /// Writes a single register.
    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error>;
    /// Reads `buffer.len()` consecutive registers starting at `reg` in one transaction.
    async fn burst_read(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error>;
}
