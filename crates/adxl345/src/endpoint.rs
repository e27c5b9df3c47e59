//! Text endpoints: a read-style sample view and two read/write attributes.
//!
//! These mirror what a character device and its attribute files would expose. Every
//! sample read fetches fresh data and starts from the beginning of the text.

use core::fmt::Write as _;

use embassy_sync::blocking_mutex::raw::RawMutex;
use heapless::String;

use crate::driver::Adxl345;
use crate::error::Error;
use crate::interface::Interface;
use crate::time::TimeSource;

// "X: -32768\n" three times.
const SAMPLE_TEXT_CAPACITY: usize = 32;
const ATTRIBUTE_TEXT_CAPACITY: usize = 12;

/// Named read/write configuration attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Attribute {
    /// Full-scale range in g.
    Range,
    /// Requested output data rate in Hz.
    Rate,
}

impl Attribute {
    /// Returns the attribute name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Range => "range",
            Self::Rate => "rate",
        }
    }

    /// Looks up an attribute by name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "range" => Some(Self::Range),
            "rate" => Some(Self::Rate),
            _ => None,
        }
    }
}

impl<M, I, T> Adxl345<M, I, T>
where
    M: RawMutex,
    I: Interface,
    T: TimeSource,
{
    /// Reads a fresh sample and writes `"X: <x>\nY: <y>\nZ: <z>\n"` into `buf`.
    ///
    /// Output is truncated to `buf.len()`. Returns the number of bytes written. An
    /// empty buffer returns 0 without touching the bus.
    pub async fn read_text(&self, buf: &mut [u8]) -> Result<usize, Error> {
        if buf.is_empty() {
            return Ok(0);
        }
        let sample = self.read_sample().await?;
        let mut text: String<SAMPLE_TEXT_CAPACITY> = String::new();
        write!(text, "X: {}\nY: {}\nZ: {}\n", sample.x, sample.y, sample.z)
            .map_err(|_| Error::InvalidArgument)?;
        Ok(copy_truncated(text.as_bytes(), buf))
    }

    /// Writes the committed attribute value followed by a newline into `buf`.
    pub async fn show(&self, attribute: Attribute, buf: &mut [u8]) -> Result<usize, Error> {
        let value = match attribute {
            Attribute::Range => u32::from(self.range().await?.g()),
            Attribute::Rate => self.rate_hz().await?,
        };
        let mut text: String<ATTRIBUTE_TEXT_CAPACITY> = String::new();
        writeln!(text, "{value}").map_err(|_| Error::InvalidArgument)?;
        Ok(copy_truncated(text.as_bytes(), buf))
    }

    /// Parses `input` as an integer and applies it to the attribute.
    ///
    /// Accepts decimal, `0x` hexadecimal and leading-zero octal with an optional sign
    /// and one trailing newline. Returns `input.len()` on success. Parse errors and
    /// non-positive values are rejected before any bus access.
    pub async fn store(&self, attribute: Attribute, input: &[u8]) -> Result<usize, Error> {
        let value = parse_int(input)?;
        if value <= 0 {
            return Err(Error::InvalidArgument);
        }
        match attribute {
            Attribute::Range => {
                let g = u16::try_from(value).map_err(|_| Error::InvalidArgument)?;
                self.set_range(g).await?;
            }
            Attribute::Rate => {
                let hz = u32::try_from(value).map_err(|_| Error::InvalidArgument)?;
                self.set_rate(hz).await?;
            }
        }
        Ok(input.len())
    }
}

fn copy_truncated(src: &[u8], dst: &mut [u8]) -> usize {
    let len = src.len().min(dst.len());
    dst[..len].copy_from_slice(&src[..len]);
    len
}

/// Parses a 32-bit signed integer with automatic radix detection.
pub(crate) fn parse_int(input: &[u8]) -> Result<i32, Error> {
    let input = input.strip_suffix(b"\n").unwrap_or(input);
    let (negative, digits) = match input.split_first() {
        Some((b'-', rest)) => (true, rest),
        Some((b'+', rest)) => (false, rest),
        _ => (false, input),
    };
    let (radix, digits) = if let Some(hex) = digits
        .strip_prefix(b"0x")
        .or_else(|| digits.strip_prefix(b"0X"))
    {
        (16, hex)
    } else if digits.len() > 1 && digits[0] == b'0' {
        (8, &digits[1..])
    } else {
        (10, digits)
    };
    if digits.is_empty() {
        return Err(Error::InvalidArgument);
    }

    let mut magnitude: i64 = 0;
    for &byte in digits {
        let digit = char::from(byte)
            .to_digit(radix)
            .ok_or(Error::InvalidArgument)?;
        magnitude = magnitude * i64::from(radix) + i64::from(digit);
        if magnitude > i64::from(i32::MAX) + 1 {
            return Err(Error::InvalidArgument);
        }
    }
    let value = if negative { -magnitude } else { magnitude };
    i32::try_from(value).map_err(|_| Error::InvalidArgument)
}
