/*++

Licensed under the Apache-2.0 license.

File Name:

    reset.rs

Abstract:

    File contains the controller resynchronization sequence and the chip ID
    helper built on it.

--*/

use alloc::vec::Vec;

use ntrcard_registers::CardRegisters;

use crate::flags::OpFlags;
use crate::transport::NtrCard;
use crate::{card_err_def, CardResult};

card_err_def! {
    Reset,
    ResetErr
    {
        // Scratch buffer allocation failed
        ResourceExhausted = 0x1,
    }
}

/// Dummy descriptor whose only purpose is to run a full transfer window and
/// resynchronize the controller and device state machines.
pub const CMD_DUMMY: [u8; 8] = [0x9F, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];

/// Identify-class descriptor; the 4-byte response is the chip ID.
pub const CMD_CHIP_ID: [u8; 8] = [0x90, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00];

/// Response window drained by [`NtrCard::reset`].
const RESET_RESPONSE_LEN: usize = 0x2000;

/// Pre-delay used for raw (unencrypted) commands.
const RAW_PRE_DELAY: u16 = 32;

impl<R: CardRegisters> NtrCard<R> {
    /// Flush the controller after an interrupted prior transaction by
    /// issuing the dummy command with a full 0x2000-byte response window.
    /// The drained data is meaningless and discarded.
    pub fn reset(&mut self) -> CardResult<()> {
        self.reset_with_len(RESET_RESPONSE_LEN)
    }

    fn reset_with_len(&mut self, response_len: usize) -> CardResult<()> {
        let mut scratch = Vec::new();
        if scratch.try_reserve_exact(response_len).is_err() {
            raise_err!(ResourceExhausted)
        }
        scratch.resize(response_len, 0);

        let flags = OpFlags {
            response_len,
            pre_delay: RAW_PRE_DELAY,
            ..OpFlags::default()
        };
        self.execute(&CMD_DUMMY, &flags, &mut scratch)
    }

    /// Resynchronize the controller, then read the cartridge chip ID.
    pub fn chip_id(&mut self) -> CardResult<u32> {
        self.reset()?;

        let flags = OpFlags {
            response_len: 4,
            pre_delay: RAW_PRE_DELAY,
            ..OpFlags::default()
        };
        let mut id = [0u8; 4];
        self.execute(&CMD_CHIP_ID, &flags, &mut id)?;
        Ok(u32::from_le_bytes(id))
    }
}
