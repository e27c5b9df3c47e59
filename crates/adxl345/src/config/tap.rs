use crate::register::{Register, tap_axes};

/// Tap detection thresholds and timing.
///
/// Register units: threshold 62.5 mg/LSB, duration 625 us/LSB, latency and window
/// 1.25 ms/LSB.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapConfig {
    /// THRESH_TAP value.
    pub threshold: u8,
    /// DUR value (maximum time above threshold for a tap).
    pub duration: u8,
    /// LATENT value (wait after the first tap before the window opens).
    pub latency: u8,
    /// WINDOW value (time in which a second tap can start).
    pub window: u8,
    /// TAP_AXES value.
    pub axes: u8,
}

impl Default for TapConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TapConfig {
    /// 4 g threshold, 20 ms duration, 100 ms latency, 300 ms window, all axes.
    pub const DEFAULT: Self = Self {
        threshold: 0x40,
        duration: 0x20,
        latency: 0x50,
        window: 0xF0,
        axes: tap_axes::X | tap_axes::Y | tap_axes::Z,
    };

    /// Sets the tap threshold.
    #[must_use]
    pub const fn with_threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the tap duration.
    #[must_use]
    pub const fn with_duration(mut self, duration: u8) -> Self {
        self.duration = duration;
        self
    }

    /// Sets the double-tap latency.
    #[must_use]
    pub const fn with_latency(mut self, latency: u8) -> Self {
        self.latency = latency;
        self
    }

    /// Sets the double-tap window.
    #[must_use]
    pub const fn with_window(mut self, window: u8) -> Self {
        self.window = window;
        self
    }

    /// Selects which axes participate in tap detection.
    #[must_use]
    pub const fn with_axes(mut self, x: bool, y: bool, z: bool) -> Self {
        let suppress = self.axes & tap_axes::SUPPRESS;
        let mut axes = suppress;
        if x {
            axes |= tap_axes::X;
        }
        if y {
            axes |= tap_axes::Y;
        }
        if z {
            axes |= tap_axes::Z;
        }
        self.axes = axes;
        self
    }

    /// Sets the double-tap suppress bit.
    #[must_use]
    pub const fn with_suppress(mut self, suppress: bool) -> Self {
        if suppress {
            self.axes |= tap_axes::SUPPRESS;
        } else {
            self.axes &= !tap_axes::SUPPRESS;
        }
        self
    }

    /// Register writes for this configuration, in attach order.
    pub(crate) const fn writes(self) -> [(Register, u8); 5] {
        [
            (Register::ThreshTap, self.threshold),
            (Register::Dur, self.duration),
            (Register::Latent, self.latency),
            (Register::Window, self.window),
            (Register::TapAxes, self.axes),
        ]
    }
}
