/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the NTR card emulator peripheral library.

--*/

mod card_controller;

pub use card_controller::{CardController, CartridgeDevice, EmuCartridge};
