extern crate std;

use core::sync::atomic::{AtomicU64, Ordering};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::vec::Vec;

use embassy_futures::yield_now;

use crate::error::Error;
use crate::interface::{Interface, sealed};
use crate::register::{Register, dev_id};
use crate::time::TimeSource;

/// One register transaction seen by the mock.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Access {
    Read(u8),
    Write(u8, u8),
    Burst(u8, usize),
}

#[derive(Debug)]
struct MockState {
    regs: [u8; 256],
    log: Vec<Access>,
    int_sources: VecDeque<u8>,
    frames: VecDeque<[u8; 6]>,
    fail_read_of: Option<u8>,
    fail_write_to: Option<u8>,
    fail_burst: bool,
    yield_in_burst: bool,
}

/// Register-file mock. Clones share state so tests can inspect a mock that the driver owns.
#[derive(Clone, Debug)]
pub(crate) struct MockInterface {
    state: Arc<Mutex<MockState>>,
}

impl Default for MockInterface {
    fn default() -> Self {
        Self {
            state: Arc::new(Mutex::new(MockState {
                regs: [0u8; 256],
                log: Vec::new(),
                int_sources: VecDeque::new(),
                frames: VecDeque::new(),
                fail_read_of: None,
                fail_write_to: None,
                fail_burst: false,
                yield_in_burst: false,
            })),
        }
    }
}

impl MockInterface {
    /// A mock that identifies as an ADXL345.
    pub(crate) fn adxl345() -> Self {
        Self::default().with_reg(Register::DevId.addr(), dev_id::EXPECTED)
    }

    fn state(&self) -> MutexGuard<'_, MockState> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    pub(crate) fn with_reg(self, reg: u8, value: u8) -> Self {
        self.set_reg(reg, value);
        self
    }

    pub(crate) fn set_reg(&self, reg: u8, value: u8) {
        self.state().regs[reg as usize] = value;
    }

    pub(crate) fn reg(&self, reg: Register) -> u8 {
        self.state().regs[reg.addr() as usize]
    }

    pub(crate) fn set_sample_bytes(&self, bytes: [u8; 6]) {
        let mut state = self.state();
        let start = Register::DataX0.addr() as usize;
        state.regs[start..start + 6].copy_from_slice(&bytes);
    }

    /// Queues a value returned by the next INT_SOURCE read. Reading clears it.
    pub(crate) fn push_int_source(&self, value: u8) {
        self.state().int_sources.push_back(value);
    }

    /// Queues a frame returned by the next burst read.
    pub(crate) fn push_frame(&self, bytes: [u8; 6]) {
        self.state().frames.push_back(bytes);
    }

    pub(crate) fn fail_reads_of(&self, reg: Option<Register>) {
        self.state().fail_read_of = reg.map(Register::addr);
    }

    pub(crate) fn fail_writes_to(&self, reg: Option<Register>) {
        self.state().fail_write_to = reg.map(Register::addr);
    }

    pub(crate) fn fail_bursts(&self, fail: bool) {
        self.state().fail_burst = fail;
    }

    /// Makes every burst read suspend once, so other futures run while the bus is held.
    pub(crate) fn yield_in_burst(&self, enable: bool) {
        self.state().yield_in_burst = enable;
    }

    pub(crate) fn log(&self) -> Vec<Access> {
        self.state().log.clone()
    }

    pub(crate) fn writes(&self) -> Vec<(u8, u8)> {
        self.state()
            .log
            .iter()
            .filter_map(|access| match access {
                Access::Write(reg, value) => Some((*reg, *value)),
                _ => None,
            })
            .collect()
    }

    pub(crate) fn clear_log(&self) {
        self.state().log.clear();
    }
}

impl Interface for MockInterface {
    async fn read_reg(&mut self, reg: u8) -> Result<u8, Error> {
        let mut state = self.state();
        state.log.push(Access::Read(reg));
        if state.fail_read_of == Some(reg) {
            return Err(Error::Bus);
        }
        if reg == Register::IntSource.addr()
            && let Some(value) = state.int_sources.pop_front()
        {
            return Ok(value);
        }
        Ok(state.regs[reg as usize])
    }

    async fn write_reg(&mut self, reg: u8, value: u8) -> Result<(), Error> {
        let mut state = self.state();
        state.log.push(Access::Write(reg, value));
        if state.fail_write_to == Some(reg) {
            return Err(Error::Bus);
        }
        state.regs[reg as usize] = value;
        Ok(())
    }

    async fn burst_read(&mut self, reg: u8, buffer: &mut [u8]) -> Result<(), Error> {
        let yield_first = {
            let mut state = self.state();
            state.log.push(Access::Burst(reg, buffer.len()));
            if state.fail_burst {
                return Err(Error::Bus);
            }
            state.yield_in_burst
        };
        if yield_first {
            yield_now().await;
        }
        let mut state = self.state();
        if reg == Register::DataX0.addr()
            && let Some(frame) = state.frames.pop_front()
        {
            let start = reg as usize;
            state.regs[start..start + 6].copy_from_slice(&frame);
        }
        for (offset, slot) in buffer.iter_mut().enumerate() {
            let addr = reg.wrapping_add(offset as u8);
            *slot = state.regs[addr as usize];
        }
        Ok(())
    }
}

impl sealed::Sealed for MockInterface {}

/// Controllable clock. Clones share the same counter.
#[derive(Clone, Debug, Default)]
pub(crate) struct MockTime {
    now_ms: Arc<AtomicU64>,
}

impl MockTime {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn set(&self, ms: u64) {
        self.now_ms.store(ms, Ordering::SeqCst);
    }

    pub(crate) fn advance(&self, ms: u64) {
        self.now_ms.fetch_add(ms, Ordering::SeqCst);
    }
}

impl TimeSource for MockTime {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
