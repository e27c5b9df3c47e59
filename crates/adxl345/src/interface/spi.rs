//! SPI interface adapter for the ADXL345.
//!
//! The bus must be configured for SPI mode 3, 8-bit words, at most 5 MHz.

use embedded_hal_async::spi::{Operation, SpiDevice};

use super::{Interface, sealed};
use crate::error::Error;

/// SPI register interface.
pub struct SpiInterface<SPI> {
    spi: SPI,
}

impl<SPI> SpiInterface<SPI> {
    /// Creates a new SPI interface with the given device.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Releases the underlying SPI device.
    pub fn release(self) -> SPI {
        self.spi
    }
}

const SPI_READ_MASK: u8 = 0x80;
const SPI_MULTI_MASK: u8 = 0x40;
const SPI_ADDR_MASK: u8 = 0x3F;

pub(crate) const fn spi_addr_read(reg: u8) -> u8 {
    (reg & SPI_ADDR_MASK) | SPI_READ_MASK
}

pub(crate) const fn spi_addr_burst_read(reg: u8) -> u8 {
    (reg & SPI_ADDR_MASK) | SPI_READ_MASK | SPI_MULTI_MASK
}

pub(crate) const fn spi_addr_write(reg: u8) -> u8 {
    reg & SPI_ADDR_MASK
}

impl<SPI> Interface for SpiInterface<SPI>
where
    SPI: SpiDevice,
{
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        let addr_buf = [spi_addr_read(reg)];
        let mut buffer = [0u8];
        let mut ops = [Operation::Write(&addr_buf), Operation::Read(&mut buffer)];
        self.spi
            .transaction(&mut ops)
            .await
            .map_err(|_| Error::Bus)?;
        Ok(buffer[0])
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        let buffer = [spi_addr_write(reg), value];
        self.spi.write(&buffer).await.map_err(|_| Error::Bus)
    }

    async fn burst_read(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error> {
        if buffer.is_empty() {
            return Ok(());
        }
        let addr_buf = [spi_addr_burst_read(reg)];
        let mut ops = [Operation::Write(&addr_buf), Operation::Read(buffer)];
        self.spi.transaction(&mut ops).await.map_err(|_| Error::Bus)
    }
}

impl<SPI> sealed::Sealed for SpiInterface<SPI> {}
