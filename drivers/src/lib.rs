/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the NTR cartridge command-transport library.

--*/

#![cfg_attr(not(test), no_std)]

extern crate alloc;

mod error;

mod blowfish;
mod flags;
mod reset;
mod transport;

/// Result type carrying component-tagged error codes: the [`CardComponent`]
/// id in bits 31:24, the component's error code in the low bits.
pub type CardResult<T> = Result<T, u32>;

pub use blowfish::{blowfish_key, BlowfishKey, BLOWFISH_KEY_LEN};
pub use error::CardComponent;
pub use flags::{FlagsErr, OpFlags};
pub use reset::{ResetErr, CMD_CHIP_ID, CMD_DUMMY};
pub use transport::{NtrCard, TransportErr};
