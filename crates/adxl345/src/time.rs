//! Monotonic time source used by the tap debounce.
//!
//! The driver only needs millisecond timestamps. On embedded targets enable the
//! `embassy-time` feature and use [`EmbassyTime`]; tests supply their own clock.

/// Platform-agnostic monotonic clock.
pub trait TimeSource: Clone + Send + Sync {
    /// Returns the current time in milliseconds since an arbitrary epoch.
    fn now_ms(&self) -> u64;

    /// Returns milliseconds elapsed since `reference_ms`, saturating at zero.
    fn elapsed_ms_since(&self, reference_ms: u64) -> u64 {
        self.now_ms().saturating_sub(reference_ms)
    }
}

/// Time source backed by the Embassy time driver.
#[cfg(feature = "embassy-time")]
#[derive(Clone, Copy, Debug, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EmbassyTime;

#[cfg(feature = "embassy-time")]
impl TimeSource for EmbassyTime {
    fn now_ms(&self) -> u64 {
        embassy_time::Instant::now().as_millis()
    }
}
