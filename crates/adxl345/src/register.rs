//! ADXL345 register definitions.
//!
//! Register addresses and bit layouts are fixed by the part. Only the registers the
//! driver core touches are listed here.

/// ADXL345 register addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Device identity register.
    DevId = 0x00,
    /// Tap threshold (62.5 mg/LSB).
    ThreshTap = 0x1D,
    /// Tap duration (625 us/LSB).
    Dur = 0x21,
    /// Tap latency before the double-tap window (1.25 ms/LSB).
    Latent = 0x22,
    /// Double-tap window (1.25 ms/LSB).
    Window = 0x23,
    /// Axis enable for tap detection.
    TapAxes = 0x2A,
    /// Output data rate and power mode.
    BwRate = 0x2C,
    /// Power-saving features control.
    PowerCtl = 0x2D,
    /// Interrupt enable control.
    IntEnable = 0x2E,
    /// Interrupt pin mapping (clear = INT1).
    IntMap = 0x2F,
    /// Interrupt source (read clears tap bits).
    IntSource = 0x30,
    /// Data format control.
    DataFormat = 0x31,
    /// X-axis data 0; start of the six-byte X/Y/Z block ending at 0x37.
    DataX0 = 0x32,
}

impl Register {
    /// Returns the register address.
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

/// Expected values for DEVID.
pub mod dev_id {
    /// Fixed identity byte of the ADXL345.
    pub const EXPECTED: u8 = 0xE5;
}

/// POWER_CTL register bits.
pub mod power_ctl {
    /// Measurement mode (clear = standby).
    pub const MEASURE: u8 = 0b0000_1000;
    /// Standby.
    pub const STANDBY: u8 = 0b0000_0000;
}

/// DATA_FORMAT register bits.
pub mod data_format {
    /// Full resolution (4 mg/LSB regardless of range).
    pub const FULL_RES: u8 = 0b0000_1000;
    /// Range selection mask.
    pub const RANGE_MASK: u8 = 0b0000_0011;
}

/// BW_RATE register bits.
pub mod bw_rate {
    /// Output data rate code mask.
    pub const RATE_MASK: u8 = 0b0000_1111;
}

/// INT_ENABLE / INT_MAP / INT_SOURCE bits (shared layout). Only the serviced events are listed.
pub mod int {
    /// New sample available.
    pub const DATA_READY: u8 = 0b1000_0000;
    /// Single tap detected.
    pub const SINGLE_TAP: u8 = 0b0100_0000;
    /// Double tap detected.
    pub const DOUBLE_TAP: u8 = 0b0010_0000;
}

/// TAP_AXES register bits.
pub mod tap_axes {
    /// Suppress double tap if acceleration exceeds threshold between taps.
    pub const SUPPRESS: u8 = 0b0000_1000;
    /// Tap detection on X.
    pub const X: u8 = 0b0000_0100;
    /// Tap detection on Y.
    pub const Y: u8 = 0b0000_0010;
    /// Tap detection on Z.
    pub const Z: u8 = 0b0000_0001;
}
