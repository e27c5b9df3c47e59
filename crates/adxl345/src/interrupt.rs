//! Interrupt routing and source decoding.

use crate::register::int;

/// Interrupt pin selection (device pins).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptPin {
    /// Interrupt pin 1.
    Int1,
    /// Interrupt pin 2.
    Int2,
}

/// Interrupt enable and routing configuration (INT_ENABLE / INT_MAP).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptConfig {
    /// Generate an interrupt for each new sample.
    pub data_ready: bool,
    /// Generate an interrupt for single taps.
    pub single_tap: bool,
    /// Generate an interrupt for double taps.
    pub double_tap: bool,
    /// Pin all enabled events are routed to.
    pub pin: InterruptPin,
}

impl InterruptConfig {
    /// Data-ready, single-tap and double-tap enabled, routed to INT1.
    pub const DEFAULT: Self = Self {
        data_ready: true,
        single_tap: true,
        double_tap: true,
        pin: InterruptPin::Int1,
    };

    /// Creates the default interrupt configuration.
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Enables or disables data-ready interrupts.
    #[must_use]
    pub const fn with_data_ready(mut self, enable: bool) -> Self {
        self.data_ready = enable;
        self
    }

    /// Enables or disables single-tap interrupts.
    #[must_use]
    pub const fn with_single_tap(mut self, enable: bool) -> Self {
        self.single_tap = enable;
        self
    }

    /// Enables or disables double-tap interrupts.
    #[must_use]
    pub const fn with_double_tap(mut self, enable: bool) -> Self {
        self.double_tap = enable;
        self
    }

    /// Routes all events to the given pin.
    #[must_use]
    pub const fn with_pin(mut self, pin: InterruptPin) -> Self {
        self.pin = pin;
        self
    }

    pub(crate) const fn int_enable_value(self) -> u8 {
        let mut value = 0;
        if self.data_ready {
            value |= int::DATA_READY;
        }
        if self.single_tap {
            value |= int::SINGLE_TAP;
        }
        if self.double_tap {
            value |= int::DOUBLE_TAP;
        }
        value
    }

    // A set INT_MAP bit sends the event to INT2.
    pub(crate) const fn int_map_value(self) -> u8 {
        match self.pin {
            InterruptPin::Int1 => 0,
            InterruptPin::Int2 => self.int_enable_value(),
        }
    }
}

impl Default for InterruptConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Decoded INT_SOURCE flags. Several may be set by one read.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct InterruptSource {
    /// New sample available.
    pub data_ready: bool,
    /// Single tap detected.
    pub single_tap: bool,
    /// Double tap detected.
    pub double_tap: bool,
}

impl InterruptSource {
    /// Decodes the INT_SOURCE register. Bits the driver does not service are ignored.
    pub const fn from_reg(value: u8) -> Self {
        Self {
            data_ready: (value & int::DATA_READY) != 0,
            single_tap: (value & int::SINGLE_TAP) != 0,
            double_tap: (value & int::DOUBLE_TAP) != 0,
        }
    }

    /// Returns true if any serviced bit is set.
    pub const fn any(self) -> bool {
        self.data_ready || self.single_tap || self.double_tap
    }
}

/// Error returned by the interrupt event loop.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum InterruptWaitError<E> {
    /// Underlying pin error.
    Pin(E),
}
