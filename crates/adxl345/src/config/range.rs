use crate::error::Error;
use crate::register::data_format;

/// Full-scale measurement range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Range {
    /// +/-2 g range.
    G2,
    /// +/-4 g range.
    G4,
    /// +/-8 g range.
    G8,
    /// +/-16 g range.
    G16,
}

impl Range {
    /// Default range applied at attach.
    pub const DEFAULT: Self = Self::G16;

    /// Parses a range given in g. Only 2, 4, 8 and 16 are accepted.
    pub const fn from_g(g: u16) -> Result<Self, Error> {
        match g {
            2 => Ok(Self::G2),
            4 => Ok(Self::G4),
            8 => Ok(Self::G8),
            16 => Ok(Self::G16),
            _ => Err(Error::InvalidArgument),
        }
    }

    /// Returns the full-scale range in g.
    pub const fn g(self) -> u16 {
        match self {
            Self::G2 => 2,
            Self::G4 => 4,
            Self::G8 => 8,
            Self::G16 => 16,
        }
    }

    pub(crate) const fn bits(self) -> u8 {
        match self {
            Self::G2 => 0b00,
            Self::G4 => 0b01,
            Self::G8 => 0b10,
            Self::G16 => 0b11,
        }
    }

    /// Returns the DATA_FORMAT value for this range, always with full resolution set.
    pub const fn data_format_value(self) -> u8 {
        data_format::FULL_RES | (self.bits() & data_format::RANGE_MASK)
    }
}

impl Default for Range {
    fn default() -> Self {
        Self::DEFAULT
    }
}
