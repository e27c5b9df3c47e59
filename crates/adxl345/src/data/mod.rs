//! Sample decoding.

pub(crate) mod scale;

pub use scale::{ScaleFactor, mg_per_lsb};

use crate::register::Register;

/// First register of the axis block.
pub(crate) const SAMPLE_BLOCK_START: Register = Register::DataX0;
/// Axis block length (X, Y, Z as little-endian 16-bit pairs).
pub(crate) const SAMPLE_BLOCK_LEN: usize = 6;

/// One acceleration sample in raw device counts.
///
/// Counts are signed two's-complement values. With full resolution enabled the scale is
/// fixed at about 3.9 mg/LSB for every range; see [`mg_per_lsb`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Sample {
    /// X-axis raw count.
    pub x: i16,
    /// Y-axis raw count.
    pub y: i16,
    /// Z-axis raw count.
    pub z: i16,
}

impl Sample {
    /// Creates a sample from raw counts.
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decodes the six-byte axis block read from `DATAX0`.
    pub const fn from_le_bytes(bytes: [u8; SAMPLE_BLOCK_LEN]) -> Self {
        Self {
            x: i16::from_le_bytes([bytes[0], bytes[1]]),
            y: i16::from_le_bytes([bytes[2], bytes[3]]),
            z: i16::from_le_bytes([bytes[4], bytes[5]]),
        }
    }

    /// Converts the sample to milli-g using the given scale.
    pub const fn to_milli_g(self, scale: ScaleFactor) -> [i32; 3] {
        [
            scale.apply(self.x),
            scale.apply(self.y),
            scale.apply(self.z),
        ]
    }
}
