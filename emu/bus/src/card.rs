// Licensed under the Apache-2.0 license

use ntrcard_registers::{CardRegisters, OFFSET_COMMAND, OFFSET_FIFO, OFFSET_ROMCNT};

use crate::{AccessSize, Bus};

/// A [`CardRegisters`] implementation that reads and writes the controller
/// registers of an `ntrcard_emu_bus::Bus`. This is the seam that lets the
/// driver run against the emulated controller or against a recording fake.
pub struct BusCard<TBus: Bus> {
    bus: TBus,
}

impl<TBus: Bus> BusCard<TBus> {
    pub fn new(bus: TBus) -> Self {
        Self { bus }
    }

    pub fn into_inner(self) -> TBus {
        self.bus
    }
}

impl<TBus: Bus> CardRegisters for BusCard<TBus> {
    /// # Panics
    ///
    /// Panics if the bus faults; the real controller block never faults on
    /// these accesses, so a fault here is a broken test setup.
    fn write_command(&mut self, cmd: u64) {
        self.bus
            .write(AccessSize::DWord, OFFSET_COMMAND, cmd)
            .unwrap()
    }

    fn write_romcnt(&mut self, val: u32) {
        self.bus
            .write(AccessSize::Word, OFFSET_ROMCNT, val.into())
            .unwrap()
    }

    fn read_romcnt(&mut self) -> u32 {
        self.bus.read(AccessSize::Word, OFFSET_ROMCNT).unwrap() as u32
    }

    fn read_fifo(&mut self) -> u32 {
        self.bus.read(AccessSize::Word, OFFSET_FIFO).unwrap() as u32
    }
}
