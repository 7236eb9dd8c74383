/*++

Licensed under the Apache-2.0 license.

File Name:

    main.rs

Abstract:

    File contains main entrypoint for the NTR cartridge controller emulator
    demo.

--*/

use clap::arg;
use ntrcard_emu_bus::BusCard;
use ntrcard_emu_periph::{CardController, EmuCartridge};
use ntrcard_lib::NtrCard;
use std::process::exit;

fn parse_hex(raw: &str) -> Result<u32, std::num::ParseIntError> {
    let digits = raw
        .strip_prefix("0x")
        .or_else(|| raw.strip_prefix("0X"))
        .unwrap_or(raw);
    u32::from_str_radix(digits, 16)
}

fn main() {
    let args = clap::Command::new("ntrcard-emu")
        .about("NTR cartridge bus controller emulator demo")
        .arg(
            arg!(--"chip-id" <VALUE> "Chip ID reported by the emulated cartridge (hex)")
                .required(false)
                .value_parser(clap::value_parser!(String))
                .default_value("0xC2FF01C0"),
        )
        .get_matches();

    simple_logger::SimpleLogger::new()
        .with_level(log::LevelFilter::Debug)
        .init()
        .unwrap();

    let raw = args.get_one::<String>("chip-id").unwrap();
    let chip_id = match parse_hex(raw) {
        Ok(val) => val,
        Err(err) => {
            eprintln!("invalid --chip-id {raw:?}: {err}");
            exit(1);
        }
    };

    let controller = CardController::new(EmuCartridge::new(chip_id));
    let mut card = NtrCard::new(BusCard::new(controller));

    log::info!("resetting emulated controller and reading chip ID");
    match card.chip_id() {
        Ok(id) => log::info!("chip ID: {id:#010x}"),
        Err(err) => {
            log::error!("transaction failed: {err:#010x}");
            exit(1);
        }
    }
}
