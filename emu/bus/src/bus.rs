/*++

Licensed under the Apache-2.0 license.

File Name:

    bus.rs

Abstract:

    File contains definition of the Bus trait.

--*/

/// Peripheral address width
pub type BusAddr = u32;

/// Peripheral data width. Wide enough for the 64-bit command latch; word
/// accesses occupy the low 32 bits.
pub type BusData = u64;

/// IO operation size. The controller block is accessed with 32-bit reads and
/// writes except for the command register, which is latched by a single
/// 64-bit store.
#[derive(Debug, Eq, PartialEq, Copy, Clone)]
pub enum AccessSize {
    Word = 4,
    DWord = 8,
}

impl From<AccessSize> for usize {
    fn from(size: AccessSize) -> usize {
        size as usize
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum BusError {
    /// Load address misaligned exception
    LoadAddrMisaligned,

    /// Load access fault exception
    LoadAccessFault,

    /// Store address misaligned exception
    StoreAddrMisaligned,

    /// Store access fault exception
    StoreAccessFault,
}

/// Represents an abstract peripheral bus. Used to read and write emulated
/// peripheral registers.
///
/// Reads take `&mut self`: popping the FIFO register advances the emulated
/// controller's transfer state.
pub trait Bus {
    /// Read data of specified size from given address
    ///
    /// # Error
    ///
    /// * `BusError` - Exception with cause `BusError::LoadAccessFault`
    ///   or `BusError::LoadAddrMisaligned`
    fn read(&mut self, size: AccessSize, addr: BusAddr) -> Result<BusData, BusError>;

    /// Write data of specified size to given address
    ///
    /// # Error
    ///
    /// * `BusError` - Exception with cause `BusError::StoreAccessFault`
    ///   or `BusError::StoreAddrMisaligned`
    fn write(&mut self, size: AccessSize, addr: BusAddr, val: BusData) -> Result<(), BusError>;
}
