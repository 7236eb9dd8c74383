/*++

Licensed under the Apache-2.0 license.

File Name:

    transport.rs

Abstract:

    File contains the command/response transport for the cartridge bus
    controller.

--*/

use ntrcard_registers::{CardRegisters, ROMCNT};
use tock_registers::LocalRegisterCopy;

use crate::flags::OpFlags;
use crate::{card_err_def, CardResult};

card_err_def! {
    Transport,
    TransportErr
    {
        // Response buffer length does not match the declared response length
        InvalidArgument = 0x1,
    }
}

/// One cartridge bus controller instance. Owns the register capability for
/// the block; `execute` is the only path that touches the registers, and the
/// exclusive borrow makes nested transactions unrepresentable.
pub struct NtrCard<R: CardRegisters> {
    regs: R,
}

impl<R: CardRegisters> NtrCard<R> {
    pub fn new(regs: R) -> Self {
        Self { regs }
    }

    /// Run one command/response exchange.
    ///
    /// Latches the 8-byte descriptor, starts the transaction with the
    /// control word derived from `flags`, then polls the controller and
    /// drains response words into `resp` until the busy bit clears. `resp`
    /// must be exactly `flags.response_len` bytes; words the controller
    /// clocks beyond that are popped and discarded to keep its state
    /// machine progressing.
    ///
    /// The protocol has no error status bit, so completion of the poll loop
    /// is reported as success unconditionally. A transaction whose busy bit
    /// never clears spins forever here; bounding that is the caller's
    /// watchdog's job.
    pub fn execute(&mut self, cmd: &[u8; 8], flags: &OpFlags, resp: &mut [u8]) -> CardResult<()> {
        // both argument checks come before the first register access
        let ctrl = flags.encode()?;
        if resp.len() != flags.response_len {
            raise_err!(InvalidArgument)
        }

        // the controller latches the descriptor atomically from one 64-bit
        // store; a pair of word stores targets a different electrical mode
        self.regs.write_command(u64::from_le_bytes(*cmd));

        let ctrl = ctrl | (ROMCNT::ACTIVATE::SET + ROMCNT::NRESET::SET).value;
        log::debug!("ROMCNT = {ctrl:#010x}");
        self.regs.write_romcnt(ctrl);

        let mut cursor = 0;
        loop {
            if self.status().is_set(ROMCNT::DATA_READY) {
                // the pop itself advances the controller, so it happens even
                // when the word has nowhere to land
                let word = self.regs.read_fifo();
                if cursor < resp.len() {
                    resp[cursor..cursor + 4].copy_from_slice(&word.to_le_bytes());
                    cursor += 4;
                }
            }
            if !self.status().is_set(ROMCNT::ACTIVATE) {
                break;
            }
        }
        Ok(())
    }

    fn status(&mut self) -> LocalRegisterCopy<u32, ROMCNT::Register> {
        LocalRegisterCopy::new(self.regs.read_romcnt())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardComponent, FlagsErr};
    use ntrcard_emu_bus::testing::FakeBus;
    use ntrcard_emu_bus::BusCard;

    const BUSY: u64 = 1 << 31;
    const DATA_READY: u64 = 1 << 23;

    const INVALID_ARGUMENT: u32 =
        ((CardComponent::Transport as u32) << 24) | TransportErr::InvalidArgument as u32;

    fn scripted_card(
        statuses: Vec<Result<u64, ntrcard_emu_bus::BusError>>,
    ) -> (NtrCard<BusCard<FakeBus>>, ntrcard_emu_bus::testing::Log) {
        let mut fake = FakeBus::new();
        fake.read_results = statuses.into();
        let log = fake.log.clone();
        (NtrCard::new(BusCard::new(fake)), log)
    }

    #[test]
    fn test_invalid_response_len_touches_no_registers() {
        let (mut card, log) = scripted_card(vec![]);
        let flags = OpFlags {
            response_len: 12,
            ..OpFlags::default()
        };
        let mut resp = [0u8; 12];

        let err = card
            .execute(&[0x90, 0, 0, 0, 0, 0, 0, 0], &flags, &mut resp)
            .err();
        assert_eq!(
            err,
            Some(((CardComponent::Flags as u32) << 24) | FlagsErr::InvalidArgument as u32)
        );
        assert!(log.is_empty());
    }

    #[test]
    fn test_buffer_mismatch_touches_no_registers() {
        let (mut card, log) = scripted_card(vec![]);
        let flags = OpFlags {
            response_len: 0x200,
            ..OpFlags::default()
        };
        let mut resp = [0u8; 4];

        let err = card
            .execute(&[0x90, 0, 0, 0, 0, 0, 0, 0], &flags, &mut resp)
            .err();
        assert_eq!(err, Some(INVALID_ARGUMENT));
        assert!(log.is_empty());
    }

    #[test]
    fn test_identify_reads_exactly_one_word() {
        // ready-check sees data, pop yields the ID, busy-check sees idle
        let (mut card, log) = scripted_card(vec![
            Ok(BUSY | DATA_READY),
            Ok(0xC2FF_01C0),
            Ok(0),
        ]);
        let flags = OpFlags {
            response_len: 4,
            ..OpFlags::default()
        };
        let mut resp = [0u8; 4];

        card.execute(&[0x90, 0, 0, 0, 0, 0, 0, 0], &flags, &mut resp)
            .unwrap();
        assert_eq!(u32::from_le_bytes(resp), 0xC2FF_01C0);

        let lines = log.take();
        assert_eq!(
            lines,
            vec![
                "write(DWord, 0x8, 0x90)",
                // block size 7, activate, reset line high
                "write(Word, 0x4, 0xa7000000)",
                "read(Word, 0x4)",
                "read(Word, 0x1c)",
                "read(Word, 0x4)",
            ]
        );
    }

    #[test]
    fn test_zero_len_handshake_reads_no_fifo() {
        let (mut card, log) = scripted_card(vec![Ok(BUSY), Ok(0)]);
        let flags = OpFlags::default();

        card.execute(&[0x9F, 0, 0, 0, 0, 0, 0, 0], &flags, &mut [])
            .unwrap();

        let fifo_reads = log
            .take()
            .iter()
            .filter(|line| line.contains("0x1c"))
            .count();
        assert_eq!(fifo_reads, 0);
    }

    #[test]
    fn test_zero_len_discards_data_ready_pulses() {
        // a controller that pulses data-ready anyway: the pop still happens
        // (it advances the bus state machine) but nothing is stored
        let (mut card, log) = scripted_card(vec![
            Ok(BUSY | DATA_READY),
            Ok(0xDEAD_BEEF),
            Ok(BUSY),
            Ok(0),
            Ok(0),
        ]);
        let flags = OpFlags::default();

        card.execute(&[0x9F, 0, 0, 0, 0, 0, 0, 0], &flags, &mut [])
            .unwrap();

        let lines = log.take();
        let fifo_reads = lines.iter().filter(|line| line.contains("0x1c")).count();
        assert_eq!(fifo_reads, 1);
    }

    #[test]
    fn test_excess_words_discarded_after_buffer_full() {
        // declared 4 bytes, controller clocks two words; the second is
        // popped and dropped
        let (mut card, log) = scripted_card(vec![
            Ok(BUSY | DATA_READY),
            Ok(0x1111_1111),
            Ok(BUSY),
            Ok(BUSY | DATA_READY),
            Ok(0x2222_2222),
            Ok(0),
        ]);
        let flags = OpFlags {
            response_len: 4,
            ..OpFlags::default()
        };
        let mut resp = [0u8; 4];

        card.execute(&[0x90, 0, 0, 0, 0, 0, 0, 0], &flags, &mut resp)
            .unwrap();
        assert_eq!(u32::from_le_bytes(resp), 0x1111_1111);

        let lines = log.take();
        let fifo_reads = lines.iter().filter(|line| line.contains("0x1c")).count();
        assert_eq!(fifo_reads, 2);
    }

    #[test]
    fn test_key2_command_encodes_security_bits() {
        let (mut card, log) = scripted_card(vec![Ok(BUSY), Ok(0)]);
        let flags = OpFlags {
            key2_command: true,
            ..OpFlags::default()
        };

        card.execute(&[0x3C, 0, 0, 0, 0, 0, 0, 0], &flags, &mut [])
            .unwrap();

        // SEC_CMD | SEC_EN | ACTIVATE | NRESET
        let lines = log.take();
        assert_eq!(lines[1], "write(Word, 0x4, 0xa0404000)");
    }
}
