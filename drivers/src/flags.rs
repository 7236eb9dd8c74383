/*++

Licensed under the Apache-2.0 license.

File Name:

    flags.rs

Abstract:

    File contains the operation flags and their control-word encoder.

--*/

use ntrcard_registers::ROMCNT;

use crate::{card_err_def, CardResult};

card_err_def! {
    Flags,
    FlagsErr
    {
        // Response length outside the enumerated set
        InvalidArgument = 0x1,
    }
}

/// Describes one command/response exchange. Immutable once handed to the
/// transport; the control word is always derived through [`OpFlags::encode`]
/// so invalid bit combinations cannot be hand-assembled.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct OpFlags {
    /// Declared response length in bytes; must be one of
    /// 0, 4, 0x200, 0x400, 0x800, 0x1000, 0x2000 or 0x4000.
    pub response_len: usize,

    /// Pre-transfer delay in cycles (13-bit field).
    pub pre_delay: u16,

    /// Post-transfer delay in cycles (6-bit field).
    pub post_delay: u8,

    /// Command phase is hardware encrypted (KEY2).
    pub key2_command: bool,

    /// Response phase is hardware encrypted (KEY2).
    pub key2_response: bool,

    /// Select the slow transfer clock divider.
    pub slow_clock: bool,

    /// Secure-area mode transferring 0x1000-byte blocks at a time.
    pub large_secure_area: bool,
}

impl OpFlags {
    /// Block-size field code for the declared response length.
    fn block_size_code(&self) -> CardResult<u32> {
        let code = match self.response_len {
            0 => 0,
            4 => 7,
            0x200 => 1,
            0x400 => 2,
            0x800 => 3,
            0x1000 => 4,
            0x2000 => 5,
            0x4000 => 6,
            _ => raise_err!(InvalidArgument),
        };
        Ok(code)
    }

    /// Pack these flags into the control word.
    ///
    /// Delay counts wider than their fields are truncated by masking, not
    /// rejected; a pre-delay of 0x2000 encodes as 0. Setting either KEY2
    /// phase sets the security-enable bit as well, callers never set it
    /// themselves.
    pub fn encode(&self) -> CardResult<u32> {
        let mut ctrl = ROMCNT::BLK_SIZE.val(self.block_size_code()?)
            + ROMCNT::DELAY1.val(u32::from(self.pre_delay))
            + ROMCNT::DELAY2.val(u32::from(self.post_delay));
        if self.key2_command {
            ctrl = ctrl + ROMCNT::SEC_CMD::SET;
        }
        if self.key2_response {
            ctrl = ctrl + ROMCNT::SEC_DAT::SET;
        }
        if self.key2_command || self.key2_response {
            ctrl = ctrl + ROMCNT::SEC_EN::SET;
        }
        if self.slow_clock {
            ctrl = ctrl + ROMCNT::CLK_SLOW::SET;
        }
        if self.large_secure_area {
            ctrl = ctrl + ROMCNT::SEC_LARGE::SET;
        }
        Ok(ctrl.value)
    }
}
