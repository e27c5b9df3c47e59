//! Integer scaling helpers for raw samples.

/// Sensitivity in full-resolution mode, in LSB/g. Independent of the selected range.
pub const FULL_RES_LSB_PER_G: i32 = 256;

/// Ratio representing a scale factor without floating-point math.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScaleFactor {
    /// Scale numerator.
    pub numerator: i32,
    /// Scale denominator.
    pub denominator: i32,
}

impl ScaleFactor {
    /// Creates a new scale ratio.
    pub const fn new(numerator: i32, denominator: i32) -> Self {
        Self {
            numerator,
            denominator,
        }
    }

    /// Scales a raw count, truncating toward zero.
    pub const fn apply(self, raw: i16) -> i32 {
        if self.denominator == 0 {
            return 0;
        }
        (raw as i32) * self.numerator / self.denominator
    }
}

/// Returns the full-resolution scale in milli-g per LSB (about 3.9).
pub const fn mg_per_lsb() -> ScaleFactor {
    ScaleFactor::new(1000, FULL_RES_LSB_PER_G)
}
