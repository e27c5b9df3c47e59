//! Error type for the ADXL345 driver.

use core::fmt;

/// Error type for ADXL345 operations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// Rejected configuration input. No bus access was attempted.
    InvalidArgument,
    /// Bus transaction failed (timeout, NACK, transport error).
    Bus,
    /// DEVID did not match the expected identity byte.
    DeviceIdentityMismatch {
        /// Identity byte read back from the device.
        found: u8,
    },
    /// Operation attempted before `attach` succeeded or after `detach`.
    NotAttached,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument => f.write_str("invalid argument"),
            Self::Bus => f.write_str("bus transaction failed"),
            Self::DeviceIdentityMismatch { found } => {
                write!(f, "unexpected device id 0x{found:02x}")
            }
            Self::NotAttached => f.write_str("device not attached"),
        }
    }
}

impl core::error::Error for Error {}
