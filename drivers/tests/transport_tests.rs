/*++

Licensed under the Apache-2.0 license.

File Name:

    transport_tests.rs

Abstract:

    File contains test cases driving the transport against the emulated
    cartridge bus controller.

--*/

use ntrcard_emu_bus::BusCard;
use ntrcard_emu_periph::{CardController, CartridgeDevice, EmuCartridge};
use ntrcard_lib::{NtrCard, OpFlags, CMD_CHIP_ID};

const CHIP_ID: u32 = 0xC2FF_01C0;

fn emulated_card() -> NtrCard<BusCard<CardController<EmuCartridge>>> {
    NtrCard::new(BusCard::new(CardController::new(EmuCartridge::new(
        CHIP_ID,
    ))))
}

#[test]
fn test_identify_round_trip() {
    let mut card = emulated_card();
    let flags = OpFlags {
        response_len: 4,
        ..OpFlags::default()
    };
    let mut resp = [0u8; 4];

    card.execute(&CMD_CHIP_ID, &flags, &mut resp).unwrap();
    assert_eq!(u32::from_le_bytes(resp), CHIP_ID);
}

#[test]
fn test_reset_drains_full_window() {
    let mut card = emulated_card();
    card.reset().unwrap();

    // the controller is idle again, a follow-up transaction works
    let mut resp = [0u8; 4];
    let flags = OpFlags {
        response_len: 4,
        ..OpFlags::default()
    };
    card.execute(&CMD_CHIP_ID, &flags, &mut resp).unwrap();
    assert_eq!(u32::from_le_bytes(resp), CHIP_ID);
}

#[test]
fn test_chip_id_helper() {
    let mut card = emulated_card();
    assert_eq!(card.chip_id().unwrap(), CHIP_ID);
}

#[test]
fn test_bulk_read_lands_in_caller_buffer() {
    struct Counting {
        next: u32,
    }
    impl CartridgeDevice for Counting {
        fn respond(&mut self, _cmd: [u8; 8], word_count: usize) -> Vec<u32> {
            (0..word_count as u32)
                .map(|i| self.next.wrapping_add(i))
                .collect()
        }
    }

    let mut card = NtrCard::new(BusCard::new(CardController::new(Counting { next: 7 })));
    let flags = OpFlags {
        response_len: 0x200,
        ..OpFlags::default()
    };
    let mut resp = [0u8; 0x200];

    card.execute(&[0xB7, 0, 0, 0, 0x02, 0, 0, 0], &flags, &mut resp)
        .unwrap();

    for (i, chunk) in resp.chunks_exact(4).enumerate() {
        let word = u32::from_le_bytes(chunk.try_into().unwrap());
        assert_eq!(word, 7 + i as u32);
    }
}

#[test]
fn test_zero_len_handshake_against_controller() {
    let mut card = emulated_card();
    card.execute(&[0x9F, 0, 0, 0, 0, 0, 0, 0], &OpFlags::default(), &mut [])
        .unwrap();
}
