//! Configuration for the ADXL345.

pub(crate) mod range;
pub(crate) mod rate;
pub(crate) mod store;
pub(crate) mod tap;

pub use range::Range;
pub use rate::{RateStep, RateTable};
pub(crate) use store::ConfigStore;
pub use tap::TapConfig;

use crate::classifier::DEFAULT_DOUBLE_TAP_COOLDOWN_MS;
use crate::error::Error;
use crate::interrupt::InterruptConfig;

/// Default output data rate request, in Hz.
pub const DEFAULT_RATE_HZ: u32 = 100;

/// ADXL345 configuration applied at attach.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Config {
    /// Initial full-scale range.
    pub range: Range,
    /// Initial output data rate request in Hz.
    pub rate_hz: u32,
    /// Mapping from requested rates to device codes.
    pub rate_table: RateTable,
    /// Tap detection settings.
    pub tap: TapConfig,
    /// Interrupt enables and routing.
    pub interrupts: InterruptConfig,
    /// Window after a double tap in which single taps are dropped, in milliseconds.
    pub double_tap_cooldown_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Creates a default configuration: 16 g, 100 Hz, default taps, all events on INT1.
    pub const fn new() -> Self {
        Self {
            range: Range::DEFAULT,
            rate_hz: DEFAULT_RATE_HZ,
            rate_table: RateTable::STANDARD,
            tap: TapConfig::DEFAULT,
            interrupts: InterruptConfig::DEFAULT,
            double_tap_cooldown_ms: DEFAULT_DOUBLE_TAP_COOLDOWN_MS,
        }
    }

    /// Sets the initial range.
    #[must_use]
    pub const fn with_range(mut self, range: Range) -> Self {
        self.range = range;
        self
    }

    /// Sets the initial rate request.
    #[must_use]
    pub const fn with_rate_hz(mut self, rate_hz: u32) -> Self {
        self.rate_hz = rate_hz;
        self
    }

    /// Replaces the rate table.
    #[must_use]
    pub const fn with_rate_table(mut self, table: RateTable) -> Self {
        self.rate_table = table;
        self
    }

    /// Sets the tap configuration.
    #[must_use]
    pub const fn with_tap(mut self, tap: TapConfig) -> Self {
        self.tap = tap;
        self
    }

    /// Sets the interrupt configuration.
    #[must_use]
    pub const fn with_interrupts(mut self, interrupts: InterruptConfig) -> Self {
        self.interrupts = interrupts;
        self
    }

    /// Sets the double-tap cooldown.
    #[must_use]
    pub const fn with_double_tap_cooldown_ms(mut self, cooldown_ms: u32) -> Self {
        self.double_tap_cooldown_ms = cooldown_ms;
        self
    }

    pub(crate) const fn validate(&self) -> Result<(), Error> {
        match self.rate_table.select(self.rate_hz) {
            Ok(_) => Ok(()),
            Err(err) => Err(err),
        }
    }
}
