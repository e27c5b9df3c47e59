//! Async `#![no_std]` driver core for the
//! [ADXL345](https://www.analog.com/en/products/adxl345.html) 3-axis accelerometer.
//!
//! The driver is meant to be shared: consumers read samples and tune range and rate
//! through `&self`, while a separate task runs the interrupt event loop that reacts
//! to data-ready, single-tap and double-tap events. One async lock serializes all bus
//! traffic, and an [`InterruptGate`] keeps the event loop out while a consumer holds
//! the bus.
//!
//! # Quick start (SPI)
//!
//! ```rust,no_run
//! use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
//! use ph_adxl345::{Adxl345Spi, Config, Gesture, TimeSource};
//! # use embedded_hal_async::digital::Wait;
//! # use embedded_hal_async::spi::SpiDevice;
//! #
//! # async fn example<SPI: SpiDevice, P: Wait, T: TimeSource>(spi: SPI, mut int1: P, time: T)
//! #     -> Result<(), ph_adxl345::Error> {
//! let accel: Adxl345Spi<CriticalSectionRawMutex, SPI, T> =
//!     Adxl345Spi::new_spi(spi, Config::new(), time);
//! accel.attach().await?;
//!
//! let events = accel.run(&mut int1, |gesture| match gesture {
//!     Gesture::SingleTap => {}
//!     Gesture::DoubleTap => {}
//! });
//! let reads = async {
//!     accel.set_rate(50).await?;
//!     let sample = accel.read_sample().await?;
//!     let _ = (sample.x, sample.y, sample.z);
//!     Ok::<(), ph_adxl345::Error>(())
//! };
//! # let _ = (events, reads);
//! # Ok(())
//! # }
//! ```
//!
//! # Rates
//!
//! Requested rates round up to the next supported output data rate. The default
//! [`RateTable::STANDARD`] covers 6.25 Hz to 3200 Hz; supply a different table through
//! [`Config::with_rate_table`] if a board needs other thresholds.
//!
//! # Text endpoints
//!
//! [`Adxl345::read_text`], [`Adxl345::show`] and [`Adxl345::store`] provide the
//! line-oriented view of a character device and its `range`/`rate` attributes.
//!
//! # Scaling helpers
//!
//! The part always runs in full-resolution mode. Use [`mg_per_lsb`] or
//! [`Sample::to_milli_g`] to convert raw counts without floating-point math.

#![no_std]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::correctness)]
#![warn(
    clippy::suspicious,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::cloned_instead_of_copied,
    clippy::explicit_iter_loop,
    clippy::implicit_clone,
    clippy::inconsistent_struct_constructor,
    clippy::manual_assert,
    clippy::manual_let_else,
    clippy::match_same_arms,
    clippy::needless_pass_by_value,
    clippy::semicolon_if_nothing_returned,
    clippy::uninlined_format_args,
    clippy::unnested_or_patterns,
    clippy::std_instead_of_core,
    clippy::std_instead_of_alloc,
    clippy::alloc_instead_of_core
)]
#![allow(
    clippy::mod_module_files,
    clippy::self_named_module_files,
    clippy::similar_names,
    clippy::struct_excessive_bools,
    clippy::fn_params_excessive_bools,
    clippy::must_use_candidate,
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    clippy::cast_lossless,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::module_name_repetitions,
    clippy::wildcard_imports
)]

#[macro_use]
mod fmt;

mod classifier;
mod config;
mod data;
mod device;
mod driver;
mod endpoint;
mod error;
mod gate;
mod interface;
mod interrupt;
mod register;
mod time;

#[cfg(test)]
mod testing;

// Interface layer
pub use interface::Adxl345Address;
pub use interface::{I2cInterface, Interface, SpiInterface};

// Configuration
pub use config::{Config, DEFAULT_RATE_HZ, Range, RateStep, RateTable, TapConfig};

// Driver
pub use driver::{Adxl345, Adxl345I2c, Adxl345Spi, Dispatch};
pub use endpoint::Attribute;
pub use gate::InterruptGate;

// Data types
pub use data::{Sample, ScaleFactor, mg_per_lsb};

// Events
pub use classifier::{
    Classification, DEFAULT_DOUBLE_TAP_COOLDOWN_MS, Gesture, TapClassifier, TapOutcome,
};
pub use interrupt::{InterruptConfig, InterruptPin, InterruptSource, InterruptWaitError};

// Errors and time
pub use error::Error;
#[cfg(feature = "embassy-time")]
pub use time::EmbassyTime;
pub use time::TimeSource;
