//! Shared-access driver for the ADXL345.
//!
//! [`Adxl345`] is used through `&self` from two contexts at once: consumer calls such
//! as [`Adxl345::read_sample`], and the interrupt event loop [`Adxl345::run`]. All bus
//! traffic and driver state sit behind one async lock. Consumer calls close the
//! [`InterruptGate`] before they start waiting for the lock and reopen it after the
//! lock is released, so the event loop never services the device in the middle of a
//! consumer transaction.

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::mutex::Mutex;
use embedded_hal_async::digital::Wait;

use crate::classifier::{Gesture, TapOutcome};
use crate::config::{Config, Range, RateStep};
use crate::data::Sample;
use crate::device::DeviceCore;
use crate::error::Error;
use crate::gate::InterruptGate;
use crate::interface::{I2cInterface, Interface, SpiInterface};
use crate::interrupt::InterruptWaitError;
use crate::time::TimeSource;

/// Result of servicing one interrupt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Dispatch {
    /// Gesture to report, if any.
    pub gesture: Option<Gesture>,
    /// Tap decision, including suppressed single taps.
    pub tap: TapOutcome,
    /// The cached sample was refreshed from the device.
    pub refreshed: bool,
}

impl Dispatch {
    /// An interrupt with nothing to report.
    pub const NONE: Self = Self {
        gesture: None,
        tap: TapOutcome::None,
        refreshed: false,
    };
}

/// ADXL345 3-axis accelerometer driver.
pub struct Adxl345<M: RawMutex, I, T> {
    core: Mutex<M, DeviceCore<I>>,
    gate: InterruptGate<M>,
    time: T,
}

/// I2C type alias for the ADXL345 driver.
pub type Adxl345I2c<M, I2C, T> = Adxl345<M, I2cInterface<I2C>, T>;

/// SPI type alias for the ADXL345 driver.
pub type Adxl345Spi<M, SPI, T> = Adxl345<M, SpiInterface<SPI>, T>;

impl<M, SPI, T> Adxl345<M, SpiInterface<SPI>, T>
where
    M: RawMutex,
    SPI: embedded_hal_async::spi::SpiDevice,
    T: TimeSource,
{
    /// Creates a new SPI driver. The bus must run in SPI mode 3.
    pub fn new_spi(spi: SPI, config: Config, time: T) -> Self {
        Self::new(SpiInterface::new(spi), config, time)
    }
}

impl<M, I2C, T> Adxl345<M, I2cInterface<I2C>, T>
where
    M: RawMutex,
    I2C: embedded_hal_async::i2c::I2c,
    T: TimeSource,
{
    /// Creates a new I2C driver at the given 7-bit address.
    pub fn new_i2c(i2c: I2C, address: u8, config: Config, time: T) -> Self {
        Self::new(I2cInterface::new(i2c, address), config, time)
    }
}

impl<M, I, T> Adxl345<M, I, T>
where
    M: RawMutex,
    I: Interface,
    T: TimeSource,
{
    /// Creates a driver over an existing interface. Nothing is sent until [`attach`](Self::attach).
    pub fn new(interface: I, config: Config, time: T) -> Self {
        Self {
            core: Mutex::new(DeviceCore::new(interface, config)),
            gate: InterruptGate::new(),
            time,
        }
    }

    /// Verifies DEVID, applies the configuration and starts measuring.
    ///
    /// On [`Error::DeviceIdentityMismatch`] no register besides DEVID is touched.
    pub async fn attach(&self) -> Result<(), Error> {
        let _gate = self.gate.close();
        let mut core = self.core.lock().await;
        core.attach().await
    }

    /// Disables interrupts and puts the part in standby.
    ///
    /// The driver is detached even if the writes fail. A running [`run`](Self::run)
    /// loop returns at its next interrupt.
    pub async fn detach(&self) -> Result<(), Error> {
        let _gate = self.gate.close();
        let mut core = self.core.lock().await;
        core.detach().await
    }

    /// Returns true between a successful attach and detach.
    pub async fn is_attached(&self) -> bool {
        let _gate = self.gate.close();
        let core = self.core.lock().await;
        core.is_attached()
    }

    /// Reads a fresh sample from the device.
    ///
    /// Bus failures are returned as-is and are not retried. The cached sample keeps
    /// its previous value; see [`last_sample`](Self::last_sample).
    pub async fn read_sample(&self) -> Result<Sample, Error> {
        let _gate = self.gate.close();
        let mut core = self.core.lock().await;
        core.read_sample().await
    }

    /// Returns the most recent sample without bus access. May be stale.
    pub async fn last_sample(&self) -> Sample {
        let _gate = self.gate.close();
        let core = self.core.lock().await;
        core.last_sample()
    }

    /// Returns the committed range.
    pub async fn range(&self) -> Result<Range, Error> {
        let _gate = self.gate.close();
        let core = self.core.lock().await;
        core.range()
    }

    /// Returns the committed rate request in Hz.
    ///
    /// This is the value last accepted by [`set_rate`](Self::set_rate), not the
    /// nominal rate of the selected device code.
    pub async fn rate_hz(&self) -> Result<u32, Error> {
        let _gate = self.gate.close();
        let core = self.core.lock().await;
        core.rate_hz()
    }

    /// Returns the rate table step the device is running at.
    pub async fn rate_step(&self) -> Result<RateStep, Error> {
        let _gate = self.gate.close();
        let core = self.core.lock().await;
        core.rate_step()
    }

    /// Sets the full-scale range in g (2, 4, 8 or 16).
    pub async fn set_range(&self, g: u16) -> Result<(), Error> {
        let _gate = self.gate.close();
        let mut core = self.core.lock().await;
        core.set_range(g).await
    }

    /// Requests an output data rate in Hz, rounded up to the next supported rate.
    pub async fn set_rate(&self, hz: u32) -> Result<(), Error> {
        let _gate = self.gate.close();
        let mut core = self.core.lock().await;
        core.set_rate(hz).await
    }

    /// Services one interrupt: reads INT_SOURCE, classifies taps, refreshes on data-ready.
    ///
    /// Returns `Err(Error::Bus)` when INT_SOURCE cannot be read. A failed refresh is
    /// counted and reported through [`Dispatch::refreshed`].
    pub async fn handle_interrupt(&self) -> Result<Dispatch, Error> {
        let _gate = self.gate.close();
        let mut core = self.core.lock().await;
        let now_ms = self.time.now_ms();
        let serviced = core.service_interrupt(now_ms).await?;
        let tap = serviced.classification.tap;
        Ok(Dispatch {
            gesture: tap.gesture(),
            tap,
            refreshed: serviced.refreshed,
        })
    }

    /// Number of bus faults absorbed on the interrupt path.
    pub async fn fault_count(&self) -> u32 {
        let _gate = self.gate.close();
        let core = self.core.lock().await;
        core.fault_count()
    }

    /// Returns the configuration applied at attach.
    pub async fn config(&self) -> Config {
        let _gate = self.gate.close();
        let core = self.core.lock().await;
        core.config()
    }

    /// Returns the interrupt gate.
    pub fn gate(&self) -> &InterruptGate<M> {
        &self.gate
    }

    /// Returns the time source.
    pub fn time(&self) -> &T {
        &self.time
    }

    /// Event loop for the interrupt line.
    ///
    /// Waits for `pin` to be high, then for the gate to be open, then services the
    /// interrupt and hands any gesture to `on_gesture`. A level wait is used so an
    /// interrupt latched while the gate was closed is still serviced. Bus faults are
    /// absorbed, after which the loop idles until the line drops. Returns `Ok(())` once the driver is not attached.
    pub async fn run<P, F>(
        &self,
        pin: &mut P,
        mut on_gesture: F,
    ) -> Result<(), InterruptWaitError<P::Error>>
    where
        P: Wait,
        F: FnMut(Gesture),
    {
        if !self.is_attached().await {
            return Ok(());
        }
        loop {
            pin.wait_for_high().await.map_err(InterruptWaitError::Pin)?;
            self.gate.wait_enabled().await;
            match self.handle_interrupt().await {
                Ok(dispatch) => {
                    if let Some(gesture) = dispatch.gesture {
                        debug!("adxl345 gesture {}", gesture);
                        on_gesture(gesture);
                    }
                }
                Err(Error::NotAttached) => return Ok(()),
                // Level stays asserted while INT_SOURCE is unreadable.
                Err(_) => pin.wait_for_low().await.map_err(InterruptWaitError::Pin)?,
            }
        }
    }

    /// Releases the underlying interface.
    pub fn release(self) -> I {
        self.core.into_inner().release()
    }
}
