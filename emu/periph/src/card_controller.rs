/*++

Licensed under the Apache-2.0 license.

File Name:

    card_controller.rs

Abstract:

    File contains a polled software model of the cartridge bus controller.

--*/

use std::collections::VecDeque;

use ntrcard_emu_bus::{AccessSize, Bus, BusAddr, BusData, BusError};
use ntrcard_registers::{OFFSET_COMMAND, OFFSET_FIFO, OFFSET_ROMCNT, ROMCNT};
use tock_registers::interfaces::{ReadWriteable, Readable, Writeable};
use tock_registers::registers::InMemoryRegister;

/// Value clocked for response words the device does not drive (the data
/// lines idle high).
const GAP_FILL: u32 = 0xFFFF_FFFF;

/// Emulated cartridge behind the controller: answers a latched command
/// descriptor with response words.
pub trait CartridgeDevice {
    /// Produce up to `word_count` response words for `cmd`. The controller
    /// clocks exactly `word_count` words either way; anything the device
    /// does not drive is read back as 0xFFFFFFFF.
    fn respond(&mut self, cmd: [u8; 8], word_count: usize) -> Vec<u32>;
}

/// Stock cartridge model. Identify-class commands report a chip ID; every
/// other command (including the 0x9F dummy) leaves the bus undriven.
pub struct EmuCartridge {
    chip_id: u32,
}

impl EmuCartridge {
    pub fn new(chip_id: u32) -> Self {
        Self { chip_id }
    }
}

impl CartridgeDevice for EmuCartridge {
    fn respond(&mut self, cmd: [u8; 8], word_count: usize) -> Vec<u32> {
        match cmd[0] {
            // chip ID is repeated for the whole transfer window
            0x90 => vec![self.chip_id; word_count],
            _ => Vec::new(),
        }
    }
}

/// Software model of the cartridge bus controller.
///
/// A `ROMCNT` write with the activate bit latches the control word, decodes
/// the block-size field and queues the device's response words. Busy stays
/// asserted until the transfer is drained through the FIFO; a command-only
/// transfer (block size 0) completes once the status has been observed.
pub struct CardController<D: CartridgeDevice> {
    romcnt: InMemoryRegister<u32, ROMCNT::Register>,
    command: u64,
    fifo: VecDeque<u32>,
    handshake_pending: bool,
    device: D,
}

impl<D: CartridgeDevice> CardController<D> {
    pub fn new(device: D) -> Self {
        Self {
            romcnt: InMemoryRegister::new(0),
            command: 0,
            fifo: VecDeque::new(),
            handshake_pending: false,
            device,
        }
    }

    /// Transferred block length in bytes for a block-size field code.
    fn block_len(code: u32) -> usize {
        match code {
            0 => 0,
            n @ 1..=6 => 0x100usize << n,
            _ => 4,
        }
    }

    fn begin_transfer(&mut self, val: u32) {
        self.romcnt.set(val);
        self.fifo.clear();
        self.handshake_pending = false;

        // a write with activate clear reconfigures or aborts
        if !self.romcnt.is_set(ROMCNT::ACTIVATE) {
            return;
        }

        let word_count = Self::block_len(self.romcnt.read(ROMCNT::BLK_SIZE)) / 4;
        let mut words = self.device.respond(self.command.to_le_bytes(), word_count);
        words.resize(word_count, GAP_FILL);
        self.fifo = words.into();

        if self.fifo.is_empty() {
            self.handshake_pending = true;
        } else {
            self.romcnt.modify(ROMCNT::DATA_READY::SET);
        }
    }
}

impl<D: CartridgeDevice> Bus for CardController<D> {
    fn read(&mut self, size: AccessSize, addr: BusAddr) -> Result<BusData, BusError> {
        match (size, addr) {
            (AccessSize::Word, OFFSET_ROMCNT) => {
                let val = self.romcnt.get();
                // the command-only handshake ends once busy has been seen
                if self.handshake_pending {
                    self.handshake_pending = false;
                    self.romcnt.modify(ROMCNT::ACTIVATE::CLEAR);
                }
                Ok(val.into())
            }
            (AccessSize::Word, OFFSET_FIFO) => {
                let word = self.fifo.pop_front().ok_or(BusError::LoadAccessFault)?;
                if self.fifo.is_empty() {
                    self.romcnt
                        .modify(ROMCNT::ACTIVATE::CLEAR + ROMCNT::DATA_READY::CLEAR);
                }
                Ok(word.into())
            }
            _ => Err(BusError::LoadAccessFault),
        }
    }

    fn write(&mut self, size: AccessSize, addr: BusAddr, val: BusData) -> Result<(), BusError> {
        match (size, addr) {
            (AccessSize::DWord, OFFSET_COMMAND) => {
                self.command = val;
                Ok(())
            }
            (AccessSize::Word, OFFSET_ROMCNT) => {
                self.begin_transfer(val as u32);
                Ok(())
            }
            _ => Err(BusError::StoreAccessFault),
        }
    }
}
