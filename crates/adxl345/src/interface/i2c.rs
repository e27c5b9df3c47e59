//! I2C interface adapter for the ADXL345.

use embedded_hal_async::i2c::I2c;

use super::Adxl345Address;
use super::{Interface, sealed};
use crate::error::Error;

/// I2C register interface.
pub struct I2cInterface<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> I2cInterface<I2C> {
    /// Creates a new I2C interface with the given bus and 7-bit address.
    pub const fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Creates a new I2C interface at the default address (ALT ADDRESS low).
    pub const fn new_primary(i2c: I2C) -> Self {
        Self::new(i2c, Adxl345Address::Primary.addr())
    }

    /// Changes the 7-bit I2C address.
    pub fn set_address(&mut self, address: u8) {
        self.address = address;
    }

    /// Returns the 7-bit I2C address in use.
    pub const fn address(&self) -> u8 {
        self.address
    }

    /// Releases the underlying I2C bus.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C> Interface for I2cInterface<I2C>
where
    I2C: I2c,
{
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        let mut buffer = [0u8];
        self.i2c
            .write_read(self.address, &[reg], &mut buffer)
            .await
            .map_err(|_| Error::Bus)?;
        Ok(buffer[0])
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        let buffer = [reg, value];
        self.i2c
            .write(self.address, &buffer)
            .await
            .map_err(|_| Error::Bus)
    }

    // Multi-byte reads auto-increment on I2C; no address flag is needed.
    async fn burst_read(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error> {
        if buffer.is_empty() {
            return Ok(());
        }
        self.i2c
            .write_read(self.address, &[reg], buffer)
            .await
            .map_err(|_| Error::Bus)
    }
}

impl<I2C> sealed::Sealed for I2cInterface<I2C> {}
