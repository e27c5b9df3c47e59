use super::{Range, RateStep, RateTable};
use crate::error::Error;
use crate::interface::Interface;
use crate::register::{Register, bw_rate};

/// Committed acquisition parameters.
///
/// A value is committed only after the matching register write succeeded, so the
/// getters always describe what the hardware was last told. Nothing is committed
/// until attach writes the initial range and rate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct ConfigStore {
    range: Range,
    rate_hz: u32,
    rate: RateStep,
    table: RateTable,
}

impl ConfigStore {
    pub(crate) const fn new(table: RateTable) -> Self {
        Self {
            range: Range::DEFAULT,
            rate_hz: 0,
            rate: table.ceiling(),
            table,
        }
    }

    pub(crate) const fn range(&self) -> Range {
        self.range
    }

    /// Last committed requested rate, not the nominal device rate.
    pub(crate) const fn rate_hz(&self) -> u32 {
        self.rate_hz
    }

    pub(crate) const fn rate_step(&self) -> RateStep {
        self.rate
    }

    pub(crate) async fn set_range<I: Interface>(
        &mut self,
        interface: &mut I,
        g: u16,
    ) -> Result<(), Error> {
        let range = Range::from_g(g)?;
        self.apply_range(interface, range).await
    }

    pub(crate) async fn apply_range<I: Interface>(
        &mut self,
        interface: &mut I,
        range: Range,
    ) -> Result<(), Error> {
        interface
            .write_reg(Register::DataFormat.addr(), range.data_format_value())
            .await?;
        self.range = range;
        Ok(())
    }

    pub(crate) async fn set_rate<I: Interface>(
        &mut self,
        interface: &mut I,
        hz: u32,
    ) -> Result<(), Error> {
        let step = self.table.select(hz)?;
        interface
            .write_reg(Register::BwRate.addr(), step.code & bw_rate::RATE_MASK)
            .await?;
        self.rate_hz = hz;
        self.rate = step;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use futures::executor::block_on;

    use super::*;
    use crate::testing::MockInterface;

    fn store() -> ConfigStore {
        let mut store = ConfigStore::new(RateTable::STANDARD);
        block_on(store.set_rate(&mut MockInterface::default(), 100)).unwrap();
        store
    }

    #[test]
    fn set_range_writes_format_and_commits() {
        let mut iface = MockInterface::default();
        let mut store = store();
        for (g, code) in [(2u16, 0x08u8), (4, 0x09), (8, 0x0A), (16, 0x0B)] {
            iface.clear_log();
            block_on(store.set_range(&mut iface, g)).unwrap();
            assert_eq!(store.range().g(), g);
            assert_eq!(iface.writes(), [(Register::DataFormat.addr(), code)]);
        }
    }

    #[test]
    fn invalid_range_touches_nothing() {
        let mut iface = MockInterface::default();
        let mut store = store();
        assert_eq!(
            block_on(store.set_range(&mut iface, 5)),
            Err(Error::InvalidArgument)
        );
        assert!(iface.log().is_empty());
        assert_eq!(store.range(), Range::G16);
    }

    #[test]
    fn set_rate_rounds_up() {
        let mut iface = MockInterface::default();
        let mut store = store();
        block_on(store.set_rate(&mut iface, 30)).unwrap();
        assert_eq!(store.rate_hz(), 30);
        assert_eq!(store.rate_step().code, 0x09);
        assert_eq!(iface.reg(Register::BwRate), 0x09);

        block_on(store.set_rate(&mut iface, 5000)).unwrap();
        assert_eq!(store.rate_hz(), 5000);
        assert_eq!(iface.reg(Register::BwRate), 0x0F);
    }

    #[test]
    fn zero_rate_touches_nothing() {
        let mut iface = MockInterface::default();
        let mut store = store();
        assert_eq!(
            block_on(store.set_rate(&mut iface, 0)),
            Err(Error::InvalidArgument)
        );
        assert!(iface.log().is_empty());
        assert_eq!(store.rate_hz(), 100);
    }

    #[test]
    fn failed_write_keeps_committed_values() {
        let mut iface = MockInterface::default();
        let mut store = store();

        iface.fail_writes_to(Some(Register::DataFormat));
        assert_eq!(block_on(store.set_range(&mut iface, 2)), Err(Error::Bus));
        assert_eq!(store.range(), Range::G16);

        iface.fail_writes_to(Some(Register::BwRate));
        assert_eq!(block_on(store.set_rate(&mut iface, 400)), Err(Error::Bus));
        assert_eq!(store.rate_hz(), 100);
        assert_eq!(store.rate_step().code, 0x0A);
    }

    #[test]
    fn apply_range_commits_typed_range() {
        let mut iface = MockInterface::default();
        let mut store = store();
        block_on(store.apply_range(&mut iface, Range::G4)).unwrap();
        assert_eq!(store.range(), Range::G4);
        assert_eq!(iface.reg(Register::DataFormat), 0x09);
    }
}
