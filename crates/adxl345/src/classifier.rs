//! Tap and double-tap classification.
//!
//! The part can flag a single tap on the same motion that completes a double tap, or
//! shortly after it. A single tap that lands within the cooldown of the last double
//! tap is treated as part of that gesture and dropped.

use crate::interrupt::InterruptSource;

/// Default single-tap suppression window after a double tap, in milliseconds.
pub const DEFAULT_DOUBLE_TAP_COOLDOWN_MS: u32 = 400;

/// Gesture reported to consumers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Gesture {
    /// A single tap.
    SingleTap,
    /// A double tap.
    DoubleTap,
}

/// Result of classifying the tap bits of one INT_SOURCE read.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TapOutcome {
    /// No tap bit set.
    None,
    /// Single tap reported.
    SingleTap,
    /// Double tap reported.
    DoubleTap,
    /// Single tap dropped inside the double-tap cooldown.
    Suppressed,
}

impl TapOutcome {
    /// Returns the gesture to report, if any.
    pub const fn gesture(self) -> Option<Gesture> {
        match self {
            Self::SingleTap => Some(Gesture::SingleTap),
            Self::DoubleTap => Some(Gesture::DoubleTap),
            Self::None | Self::Suppressed => None,
        }
    }
}

/// Full decision for one interrupt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Classification {
    /// Tap decision.
    pub tap: TapOutcome,
    /// A sample refresh is due. Independent of the tap decision.
    pub refresh: bool,
}

impl Classification {
    /// Nothing to do.
    pub const NONE: Self = Self {
        tap: TapOutcome::None,
        refresh: false,
    };
}

/// Debounce state machine. Holds only the time of the last double tap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TapClassifier {
    cooldown_ms: u32,
    last_double_tap_ms: Option<u64>,
}

impl Default for TapClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_DOUBLE_TAP_COOLDOWN_MS)
    }
}

impl TapClassifier {
    /// Creates a classifier with the given cooldown.
    pub const fn new(cooldown_ms: u32) -> Self {
        Self {
            cooldown_ms,
            last_double_tap_ms: None,
        }
    }

    /// Returns the suppression window in milliseconds.
    pub const fn cooldown_ms(&self) -> u32 {
        self.cooldown_ms
    }

    /// Returns the timestamp of the last reported double tap.
    pub const fn last_double_tap_ms(&self) -> Option<u64> {
        self.last_double_tap_ms
    }

    /// Forgets the last double tap.
    pub fn reset(&mut self) {
        self.last_double_tap_ms = None;
    }

    /// Classifies one raw INT_SOURCE value observed at `now_ms`.
    pub fn classify(&mut self, source: u8, now_ms: u64) -> Classification {
        if source == 0 {
            return Classification::NONE;
        }
        let flags = InterruptSource::from_reg(source);

        let tap = if flags.double_tap {
            self.last_double_tap_ms = Some(now_ms);
            TapOutcome::DoubleTap
        } else if flags.single_tap {
            if self.within_cooldown(now_ms) {
                TapOutcome::Suppressed
            } else {
                TapOutcome::SingleTap
            }
        } else {
            TapOutcome::None
        };

        Classification {
            tap,
            refresh: flags.data_ready,
        }
    }

    fn within_cooldown(&self, now_ms: u64) -> bool {
        match self.last_double_tap_ms {
            Some(last) => now_ms.saturating_sub(last) < u64::from(self.cooldown_ms),
            None => false,
        }
    }
}
