/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains register definitions for the NTR cartridge bus controller.

--*/

#![no_std]

mod static_ref;

use tock_registers::interfaces::{Readable, Writeable};
use tock_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use tock_registers::{register_bitfields, register_structs};

pub use static_ref::StaticRef;

/// Base address of the cartridge bus controller block.
pub const NTRCARD_BASE: usize = 0x1016_4000;

/// Register offsets within the controller block. The emulated controller and
/// the `Bus`-backed register adapter dispatch on these.
pub const OFFSET_ROMCNT: u32 = 0x04;
pub const OFFSET_COMMAND: u32 = 0x08;
pub const OFFSET_FIFO: u32 = 0x1C;

register_structs! {
    /// Cartridge Bus Controller Registers
    pub NtrCardRegisters {
        (0x000 => _reserved0),

        /// Control register; a write with the activate bit starts the
        /// transaction, reads reflect live busy/data-ready status.
        (0x004 => pub romcnt: ReadWrite<u32, ROMCNT::Register>),

        /// Outgoing command descriptor; latched atomically by a single
        /// 64-bit store.
        (0x008 => pub command: WriteOnly<u64>),

        (0x010 => _reserved1),

        /// Response FIFO; each read pops one word of the current transfer.
        (0x01C => pub fifo: ReadOnly<u32>),

        (0x020 => @END),
    }
}

register_bitfields! [
    u32,

    /// Control/Status Register Fields
    pub ROMCNT [
        /// Transfer delay length part 1 (pre-delay cycles)
        DELAY1 OFFSET(0) NUMBITS(13) [],
        /// The data transfer is hardware encrypted (KEY2)
        SEC_DAT OFFSET(13) NUMBITS(1) [],
        /// Security enable
        SEC_EN OFFSET(14) NUMBITS(1) [],
        /// Apply encryption (KEY2) seed to hardware registers
        SEC_SEED OFFSET(15) NUMBITS(1) [],
        /// Transfer delay length part 2 (post-delay cycles)
        DELAY2 OFFSET(16) NUMBITS(6) [],
        /// The command transfer is hardware encrypted (KEY2)
        SEC_CMD OFFSET(22) NUMBITS(1) [],
        /// FIFO register is ready to be read (read-only status)
        DATA_READY OFFSET(23) NUMBITS(1) [],
        /// Transfer block size (0 = none, 1..6 = 0x100 << n bytes, 7 = 4 bytes)
        BLK_SIZE OFFSET(24) NUMBITS(3) [],
        /// Transfer clock rate (0 = 6.7MHz, 1 = 4.2MHz)
        CLK_SLOW OFFSET(27) NUMBITS(1) [],
        /// Secure area mode transferring blocks of 0x1000 bytes at a time
        SEC_LARGE OFFSET(28) NUMBITS(1) [],
        /// RESET line high when set
        NRESET OFFSET(29) NUMBITS(1) [],
        /// Card write enable
        WR OFFSET(30) NUMBITS(1) [],
        /// Begin operation when written; operation in progress when read
        ACTIVATE OFFSET(31) NUMBITS(1) [],
    ],
];

/// Access capability over the controller's named registers. The transport is
/// generic over this trait; production code injects [`NtrCardMmio`], tests
/// inject a double that records accesses.
pub trait CardRegisters {
    /// Latch the 8-byte command descriptor as a single 64-bit store.
    fn write_command(&mut self, cmd: u64);

    /// Write the control word; the activate bit starts the transaction.
    fn write_romcnt(&mut self, val: u32);

    /// Read live busy/data-ready status and echoed configuration bits.
    fn read_romcnt(&mut self) -> u32;

    /// Pop one word of response data from the FIFO.
    fn read_fifo(&mut self) -> u32;
}

/// Memory-mapped implementation of [`CardRegisters`] over the real
/// controller block.
pub struct NtrCardMmio {
    regs: StaticRef<NtrCardRegisters>,
}

impl NtrCardMmio {
    /// Accessors for the controller block at [`NTRCARD_BASE`].
    ///
    /// # Safety
    ///
    /// The caller must have exclusive ownership of the controller's register
    /// block for the lifetime of the returned value; concurrent access from
    /// another owner breaks the polled protocol.
    pub const unsafe fn new() -> Self {
        Self::with_base(NTRCARD_BASE as *const NtrCardRegisters)
    }

    /// Accessors for a controller block at a caller-supplied base address.
    ///
    /// # Safety
    ///
    /// `base` must point at a live controller register block, and the caller
    /// must have exclusive ownership of it.
    pub const unsafe fn with_base(base: *const NtrCardRegisters) -> Self {
        Self {
            regs: StaticRef::new(base),
        }
    }
}

impl CardRegisters for NtrCardMmio {
    fn write_command(&mut self, cmd: u64) {
        self.regs.command.set(cmd);
    }

    fn write_romcnt(&mut self, val: u32) {
        self.regs.romcnt.set(val);
    }

    fn read_romcnt(&mut self) -> u32 {
        self.regs.romcnt.get()
    }

    fn read_fifo(&mut self) -> u32 {
        self.regs.fifo.get()
    }
}
