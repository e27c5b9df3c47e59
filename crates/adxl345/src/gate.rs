//! Interrupt delivery gate.
//!
//! The synchronous path closes the gate before taking the device lock and reopens it
//! after the lock is released, so the event loop never services an interrupt while a
//! consumer holds the bus. Closing nests; the gate reopens when every closer has
//! released it. An interrupt raised while closed stays latched on the line and is
//! serviced once the gate reopens.

use core::cell::Cell;

use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::signal::Signal;

/// Nesting enable/disable switch with an async wait for the enabled state.
pub struct InterruptGate<M: RawMutex> {
    depth: BlockingMutex<M, Cell<u32>>,
    reopened: Signal<M, ()>,
}

impl<M: RawMutex> Default for InterruptGate<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M: RawMutex> InterruptGate<M> {
    /// Creates an open gate.
    pub const fn new() -> Self {
        Self {
            depth: BlockingMutex::new(Cell::new(0)),
            reopened: Signal::new(),
        }
    }

    /// Closes the gate one level.
    pub fn disable(&self) {
        self.depth.lock(|depth| depth.set(depth.get().saturating_add(1)));
    }

    /// Releases one level. Extra calls on an open gate are ignored.
    pub fn enable(&self) {
        let reopened = self.depth.lock(|depth| {
            let current = depth.get();
            if current == 0 {
                return false;
            }
            depth.set(current - 1);
            current == 1
        });
        if reopened {
            self.reopened.signal(());
        }
    }

    /// Returns true if interrupts may be serviced.
    pub fn is_enabled(&self) -> bool {
        self.depth.lock(|depth| depth.get() == 0)
    }

    /// Returns the current nesting depth.
    pub fn depth(&self) -> u32 {
        self.depth.lock(Cell::get)
    }

    /// Waits until the gate is open. Only one task may wait at a time.
    pub async fn wait_enabled(&self) {
        loop {
            if self.is_enabled() {
                return;
            }
            self.reopened.wait().await;
        }
    }

    /// Closes the gate until the returned guard is dropped.
    pub(crate) fn close(&self) -> GateGuard<'_, M> {
        self.disable();
        GateGuard { gate: self }
    }
}

/// Reopens the gate one level on drop.
pub(crate) struct GateGuard<'a, M: RawMutex> {
    gate: &'a InterruptGate<M>,
}

impl<M: RawMutex> Drop for GateGuard<'_, M> {
    fn drop(&mut self) {
        self.gate.enable();
    }
}
