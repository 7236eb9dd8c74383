/*++

Licensed under the Apache-2.0 license.

File Name:

    fake_bus.rs

Abstract:

    File contains code for a fake implementation of the Bus trait.

--*/
use std::collections::VecDeque;

use crate::testing::Log;
use crate::{AccessSize, Bus, BusAddr, BusData, BusError};

/// A Bus implementation that logs all calls and lets the test script the
/// values returned by successive reads. Driving the transport's poll loop
/// takes a sequence of distinct status words, so reads drain `read_results`
/// first and fall back to `read_result` once the script is exhausted.
///
/// # Example
///
/// ```
/// use ntrcard_emu_bus::{AccessSize, Bus};
/// use ntrcard_emu_bus::testing::FakeBus;
///
/// let mut fake_bus = FakeBus::new();
/// fake_bus.read_results.push_back(Ok(35));
/// assert_eq!(fake_bus.read(AccessSize::Word, 0x4), Ok(35));
/// assert_eq!(fake_bus.read(AccessSize::Word, 0x4), Ok(0));
/// assert_eq!(fake_bus.log.take(), vec!["read(Word, 0x4)", "read(Word, 0x4)"]);
/// ```
pub struct FakeBus {
    pub log: Log,
    pub read_results: VecDeque<Result<BusData, BusError>>,
    pub read_result: Result<BusData, BusError>,
    pub write_result: Result<(), BusError>,
}

impl FakeBus {
    pub fn new() -> Self {
        Self {
            log: Log::new(),
            read_results: VecDeque::new(),
            read_result: Ok(0),
            write_result: Ok(()),
        }
    }
}

impl Default for FakeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl Bus for FakeBus {
    fn read(&mut self, size: AccessSize, addr: BusAddr) -> Result<BusData, BusError> {
        self.log.push(format!("read({size:?}, {addr:#x})"));
        self.read_results.pop_front().unwrap_or(self.read_result)
    }

    fn write(&mut self, size: AccessSize, addr: BusAddr, val: BusData) -> Result<(), BusError> {
        self.log.push(format!("write({size:?}, {addr:#x}, {val:#x})"));
        self.write_result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fake_bus() {
        let mut fake_bus = FakeBus::new();

        assert_eq!(fake_bus.read(AccessSize::Word, 0x4), Ok(0));
        assert_eq!(fake_bus.log.take(), vec!["read(Word, 0x4)"]);

        assert_eq!(fake_bus.write(AccessSize::DWord, 0x8, 0x537), Ok(()));
        assert_eq!(fake_bus.log.take(), vec!["write(DWord, 0x8, 0x537)"]);

        fake_bus.read_result = Err(BusError::LoadAccessFault);
        assert_eq!(
            fake_bus.read(AccessSize::Word, 0x1c),
            Err(BusError::LoadAccessFault)
        );
        assert_eq!(fake_bus.log.take(), vec!["read(Word, 0x1c)"]);
    }

    #[test]
    fn test_scripted_reads() {
        let mut fake_bus = FakeBus::new();
        fake_bus.read_results.push_back(Ok(0x8080_0000));
        fake_bus.read_results.push_back(Err(BusError::LoadAccessFault));

        assert_eq!(fake_bus.read(AccessSize::Word, 0x4), Ok(0x8080_0000));
        assert_eq!(
            fake_bus.read(AccessSize::Word, 0x4),
            Err(BusError::LoadAccessFault)
        );
        // script exhausted, default takes over
        assert_eq!(fake_bus.read(AccessSize::Word, 0x4), Ok(0));
    }
}
