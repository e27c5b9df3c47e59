//! Device core operations for the ADXL345.
//!
//! Everything here runs with exclusive access to the bus; the driver wraps the core in
//! its lock.

use crate::classifier::{Classification, TapClassifier};
use crate::config::{Config, ConfigStore, Range, RateStep};
use crate::data::{SAMPLE_BLOCK_LEN, SAMPLE_BLOCK_START, Sample};
use crate::error::Error;
use crate::interface::Interface;
use crate::register::{Register, dev_id, power_ctl};

pub(crate) struct DeviceCore<I> {
    interface: I,
    config: Config,
    store: ConfigStore,
    sample: Sample,
    classifier: TapClassifier,
    faults: u32,
    attached: bool,
}

impl<I> DeviceCore<I>
where
    I: Interface,
{
    pub(crate) const fn new(interface: I, config: Config) -> Self {
        Self {
            interface,
            store: ConfigStore::new(config.rate_table),
            classifier: TapClassifier::new(config.double_tap_cooldown_ms),
            config,
            sample: Sample::new(0, 0, 0),
            faults: 0,
            attached: false,
        }
    }

    pub(crate) const fn config(&self) -> Config {
        self.config
    }

    pub(crate) const fn is_attached(&self) -> bool {
        self.attached
    }

    /// Every failed attach leaves the core detached, including a re-attach.
    pub(crate) async fn attach(&mut self) -> Result<(), Error> {
        self.attached = false;
        self.config.validate()?;
        self.verify_device().await?;
        self.apply_config().await?;
        self.classifier = TapClassifier::new(self.config.double_tap_cooldown_ms);
        self.sample = Sample::default();
        self.attached = true;
        info!(
            "adxl345 attached: range {} g, rate {} Hz",
            self.store.range().g(),
            self.store.rate_hz()
        );
        Ok(())
    }

    pub(crate) async fn verify_device(&mut self) -> Result<(), Error> {
        let found = self.read_reg(Register::DevId).await?;
        if found != dev_id::EXPECTED {
            error!("unexpected DEVID {=u8:#x}", found);
            return Err(Error::DeviceIdentityMismatch { found });
        }
        Ok(())
    }

    // Measurement is switched on last, after every event source is configured.
    async fn apply_config(&mut self) -> Result<(), Error> {
        let config = self.config;
        self.store
            .apply_range(&mut self.interface, config.range)
            .await?;
        self.store
            .set_rate(&mut self.interface, config.rate_hz)
            .await?;
        for (reg, value) in config.tap.writes() {
            self.write_reg(reg, value).await?;
        }
        self.write_reg(Register::IntMap, config.interrupts.int_map_value())
            .await?;
        self.write_reg(Register::IntEnable, config.interrupts.int_enable_value())
            .await?;
        self.write_reg(Register::PowerCtl, power_ctl::MEASURE).await
    }

    /// Quiesces the part. Both writes are attempted; the core is detached either way.
    pub(crate) async fn detach(&mut self) -> Result<(), Error> {
        self.ensure_attached()?;
        self.attached = false;
        let int_result = self.write_reg(Register::IntEnable, 0).await;
        let power_result = self
            .write_reg(Register::PowerCtl, power_ctl::STANDBY)
            .await;
        if int_result.is_err() || power_result.is_err() {
            warn!("adxl345 detach: standby write failed");
        }
        int_result.and(power_result)
    }

    pub(crate) async fn read_sample(&mut self) -> Result<Sample, Error> {
        self.ensure_attached()?;
        self.refresh_sample().await
    }

    async fn refresh_sample(&mut self) -> Result<Sample, Error> {
        let mut buffer = [0u8; SAMPLE_BLOCK_LEN];
        self.interface
            .burst_read(SAMPLE_BLOCK_START.addr(), &mut buffer)
            .await?;
        self.sample = Sample::from_le_bytes(buffer);
        Ok(self.sample)
    }

    pub(crate) const fn last_sample(&self) -> Sample {
        self.sample
    }

    pub(crate) fn range(&self) -> Result<Range, Error> {
        self.ensure_attached()?;
        Ok(self.store.range())
    }

    pub(crate) fn rate_hz(&self) -> Result<u32, Error> {
        self.ensure_attached()?;
        Ok(self.store.rate_hz())
    }

    pub(crate) fn rate_step(&self) -> Result<RateStep, Error> {
        self.ensure_attached()?;
        Ok(self.store.rate_step())
    }

    pub(crate) async fn set_range(&mut self, g: u16) -> Result<(), Error> {
        self.ensure_attached()?;
        self.store.set_range(&mut self.interface, g).await
    }

    pub(crate) async fn set_rate(&mut self, hz: u32) -> Result<(), Error> {
        self.ensure_attached()?;
        self.store.set_rate(&mut self.interface, hz).await
    }

    /// Reads INT_SOURCE, classifies it and refreshes the sample on data-ready.
    ///
    /// A failed INT_SOURCE read aborts the event. A failed refresh keeps the tap
    /// decision and reports `refreshed = false`. Both are counted.
    pub(crate) async fn service_interrupt(&mut self, now_ms: u64) -> Result<Serviced, Error> {
        self.ensure_attached()?;
        let source = match self.read_reg(Register::IntSource).await {
            Ok(source) => source,
            Err(err) => {
                self.record_fault();
                warn!("adxl345: INT_SOURCE read failed");
                return Err(err);
            }
        };
        trace!("adxl345 INT_SOURCE {=u8:#x}", source);

        let classification = self.classifier.classify(source, now_ms);
        let refreshed = if classification.refresh {
            match self.refresh_sample().await {
                Ok(_) => true,
                Err(_) => {
                    self.record_fault();
                    warn!("adxl345: sample refresh failed");
                    false
                }
            }
        } else {
            false
        };

        Ok(Serviced {
            classification,
            refreshed,
        })
    }

    fn record_fault(&mut self) {
        self.faults = self.faults.wrapping_add(1);
    }

    pub(crate) const fn fault_count(&self) -> u32 {
        self.faults
    }

    pub(crate) fn release(self) -> I {
        self.interface
    }

    fn ensure_attached(&self) -> Result<(), Error> {
        if self.attached {
            Ok(())
        } else {
            Err(Error::NotAttached)
        }
    }

    pub(crate) async fn read_reg(&mut self, reg: Register) -> Result<u8, Error> {
        self.interface.read_reg(reg.addr()).await
    }

    pub(crate) async fn write_reg(&mut self, reg: Register, value: u8) -> Result<(), Error> {
        self.interface.write_reg(reg.addr(), value).await
    }
}

/// Outcome of one serviced interrupt, before the driver maps it to a dispatch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Serviced {
    pub classification: Classification,
    pub refreshed: bool,
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::classifier::TapOutcome;
    use crate::register::int;
    use crate::testing::{Access, MockInterface};

    fn attached_core() -> (DeviceCore<MockInterface>, MockInterface) {
        let mock = MockInterface::adxl345();
        let mut core = DeviceCore::new(mock.clone(), Config::new());
        block_on(core.attach()).unwrap();
        mock.clear_log();
        (core, mock)
    }

    #[test]
    fn attach_writes_configuration_in_order() {
        let mock = MockInterface::adxl345();
        let mut core = DeviceCore::new(mock.clone(), Config::new());
        block_on(core.attach()).unwrap();

        assert_eq!(mock.log()[0], Access::Read(Register::DevId.addr()));
        let expected = [
            (Register::DataFormat.addr(), 0x0B),
            (Register::BwRate.addr(), 0x0A),
            (Register::ThreshTap.addr(), 0x40),
            (Register::Dur.addr(), 0x20),
            (Register::Latent.addr(), 0x50),
            (Register::Window.addr(), 0xF0),
            (Register::TapAxes.addr(), 0x07),
            (Register::IntMap.addr(), 0x00),
            (
                Register::IntEnable.addr(),
                int::DATA_READY | int::SINGLE_TAP | int::DOUBLE_TAP,
            ),
            (Register::PowerCtl.addr(), power_ctl::MEASURE),
        ];
        assert_eq!(mock.writes(), expected);
        assert!(core.is_attached());
        assert_eq!(core.range(), Ok(Range::G16));
        assert_eq!(core.rate_hz(), Ok(100));
    }

    #[test]
    fn identity_mismatch_touches_only_devid() {
        let mock = MockInterface::default().with_reg(Register::DevId.addr(), 0x12);
        let mut core = DeviceCore::new(mock.clone(), Config::new());
        assert_eq!(
            block_on(core.attach()),
            Err(Error::DeviceIdentityMismatch { found: 0x12 })
        );
        assert_eq!(mock.log(), [Access::Read(Register::DevId.addr())]);
        assert!(!core.is_attached());
        assert_eq!(block_on(core.read_sample()), Err(Error::NotAttached));
    }

    #[test]
    fn invalid_config_touches_nothing() {
        let mock = MockInterface::adxl345();
        let mut core = DeviceCore::new(mock.clone(), Config::new().with_rate_hz(0));
        assert_eq!(block_on(core.attach()), Err(Error::InvalidArgument));
        assert!(mock.log().is_empty());
    }

    #[test]
    fn failed_attach_write_leaves_detached() {
        let mock = MockInterface::adxl345();
        mock.fail_writes_to(Some(Register::IntEnable));
        let mut core = DeviceCore::new(mock.clone(), Config::new());
        assert_eq!(block_on(core.attach()), Err(Error::Bus));
        assert!(!core.is_attached());
        assert_eq!(mock.reg(Register::PowerCtl), 0);
    }

    #[test]
    fn operations_before_attach_fail() {
        let mock = MockInterface::adxl345();
        let mut core = DeviceCore::new(mock.clone(), Config::new());
        assert_eq!(block_on(core.read_sample()), Err(Error::NotAttached));
        assert_eq!(block_on(core.set_range(2)), Err(Error::NotAttached));
        assert_eq!(block_on(core.set_rate(50)), Err(Error::NotAttached));
        assert_eq!(core.range(), Err(Error::NotAttached));
        assert_eq!(core.rate_hz(), Err(Error::NotAttached));
        assert_eq!(block_on(core.service_interrupt(0)), Err(Error::NotAttached));
        assert_eq!(block_on(core.detach()), Err(Error::NotAttached));
        assert!(mock.log().is_empty());
    }

    #[test]
    fn read_sample_decodes_burst() {
        let (mut core, mock) = attached_core();
        mock.set_sample_bytes([0x00, 0x10, 0x00, 0x20, 0x00, 0xF0]);
        let sample = block_on(core.read_sample()).unwrap();
        assert_eq!(sample, Sample::new(4096, 8192, -4096));
        assert_eq!(core.last_sample(), sample);
        assert_eq!(mock.log(), [Access::Burst(Register::DataX0.addr(), 6)]);
    }

    #[test]
    fn failed_read_keeps_stale_sample() {
        let (mut core, mock) = attached_core();
        mock.set_sample_bytes([1, 0, 2, 0, 3, 0]);
        block_on(core.read_sample()).unwrap();
        mock.fail_bursts(true);
        assert_eq!(block_on(core.read_sample()), Err(Error::Bus));
        assert_eq!(core.last_sample(), Sample::new(1, 2, 3));
        assert_eq!(core.fault_count(), 0);
    }

    #[test]
    fn interrupt_with_data_ready_refreshes() {
        let (mut core, mock) = attached_core();
        mock.set_sample_bytes([5, 0, 6, 0, 7, 0]);
        mock.push_int_source(int::DATA_READY | int::DOUBLE_TAP);
        let serviced = block_on(core.service_interrupt(10)).unwrap();
        assert_eq!(serviced.classification.tap, TapOutcome::DoubleTap);
        assert!(serviced.refreshed);
        assert_eq!(core.last_sample(), Sample::new(5, 6, 7));
    }

    #[test]
    fn zero_source_reads_nothing_else() {
        let (mut core, mock) = attached_core();
        mock.push_int_source(0);
        let serviced = block_on(core.service_interrupt(0)).unwrap();
        assert_eq!(serviced.classification, Classification::NONE);
        assert!(!serviced.refreshed);
        assert_eq!(mock.log(), [Access::Read(Register::IntSource.addr())]);
    }

    #[test]
    fn source_fault_is_counted_and_aborts() {
        let (mut core, mock) = attached_core();
        mock.fail_reads_of(Some(Register::IntSource));
        assert_eq!(block_on(core.service_interrupt(0)), Err(Error::Bus));
        assert_eq!(core.fault_count(), 1);
        assert_eq!(mock.log(), [Access::Read(Register::IntSource.addr())]);
    }

    #[test]
    fn refresh_fault_keeps_tap() {
        let (mut core, mock) = attached_core();
        mock.fail_bursts(true);
        mock.push_int_source(int::DATA_READY | int::SINGLE_TAP);
        let serviced = block_on(core.service_interrupt(0)).unwrap();
        assert_eq!(serviced.classification.tap, TapOutcome::SingleTap);
        assert!(!serviced.refreshed);
        assert_eq!(core.fault_count(), 1);
    }

    #[test]
    fn detach_quiesces_and_blocks_further_use() {
        let (mut core, mock) = attached_core();
        block_on(core.detach()).unwrap();
        assert_eq!(
            mock.writes(),
            [
                (Register::IntEnable.addr(), 0),
                (Register::PowerCtl.addr(), power_ctl::STANDBY)
            ]
        );
        assert_eq!(block_on(core.read_sample()), Err(Error::NotAttached));
        assert_eq!(core.rate_hz(), Err(Error::NotAttached));
    }

    #[test]
    fn detach_attempts_standby_after_failed_disable() {
        let (mut core, mock) = attached_core();
        mock.fail_writes_to(Some(Register::IntEnable));
        assert_eq!(block_on(core.detach()), Err(Error::Bus));
        assert!(!core.is_attached());
        assert_eq!(mock.writes().len(), 2);
        assert_eq!(mock.reg(Register::PowerCtl), power_ctl::STANDBY);
    }

    #[test]
    fn reattach_after_detach() {
        let (mut core, mock) = attached_core();
        block_on(core.set_range(2)).unwrap();
        block_on(core.detach()).unwrap();
        block_on(core.attach()).unwrap();
        assert_eq!(core.range(), Ok(Range::G16));
        assert_eq!(mock.reg(Register::PowerCtl), power_ctl::MEASURE);
    }

    #[test]
    fn reattach_with_wrong_identity_detaches() {
        let (mut core, mock) = attached_core();
        mock.set_reg(Register::DevId.addr(), 0x12);
        assert_eq!(
            block_on(core.attach()),
            Err(Error::DeviceIdentityMismatch { found: 0x12 })
        );
        assert!(!core.is_attached());

        mock.clear_log();
        assert_eq!(block_on(core.read_sample()), Err(Error::NotAttached));
        assert!(mock.log().is_empty());
    }

    #[test]
    fn failed_reattach_detaches() {
        let (mut core, mock) = attached_core();
        mock.fail_writes_to(Some(Register::IntEnable));
        assert_eq!(block_on(core.attach()), Err(Error::Bus));
        assert!(!core.is_attached());
        assert_eq!(core.range(), Err(Error::NotAttached));

        mock.fail_writes_to(None);
        block_on(core.attach()).unwrap();
        assert!(core.is_attached());
        assert_eq!(mock.reg(Register::PowerCtl), power_ctl::MEASURE);
    }
}
