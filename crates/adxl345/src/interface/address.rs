//! I2C address definitions for the ADXL345.

/// ADXL345 I2C addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Adxl345Address {
    /// Primary address: 0x53 (ALT ADDRESS = low).
    Primary,
    /// Alternate address: 0x1D (ALT ADDRESS = high).
    Alternate,
}

impl Adxl345Address {
    /// Returns the 7-bit I2C address.
    pub const fn addr(self) -> u8 {
        match self {
            Self::Primary => 0x53,
            Self::Alternate => 0x1D,
        }
    }
}
