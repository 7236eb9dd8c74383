/*++

Licensed under the Apache-2.0 license.

File Name:

    blowfish.rs

Abstract:

    File contains the key-table selector for the cartridge cipher.

--*/

/// Size in bytes of one key table (18 P-array entries + 4 S-boxes).
pub const BLOWFISH_KEY_LEN: usize = 0x1048;

/// Key-table variants selectable for the cartridge cipher key schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlowfishKey {
    /// Original-hardware default table.
    Ntr,

    /// Revision-A hardware table for retail devices.
    RevisionARetail,

    /// Revision-A hardware table for development devices.
    RevisionADev,
}

static KEY_NTR: [u8; BLOWFISH_KEY_LEN] = *include_bytes!("key_data/ntr.bin");
static KEY_REVA_RETAIL: [u8; BLOWFISH_KEY_LEN] = *include_bytes!("key_data/reva_retail.bin");
static KEY_REVA_DEV: [u8; BLOWFISH_KEY_LEN] = *include_bytes!("key_data/reva_dev.bin");

/// Look up the key table for a variant. The table lives in immutable
/// process-wide storage; consumers copy it only if they need a mutable
/// working set for key-schedule expansion.
///
/// Any variant not explicitly mapped resolves to the [`BlowfishKey::Ntr`]
/// table; callers rely on that fallback, keep the default arm.
pub fn blowfish_key(key: BlowfishKey) -> &'static [u8; BLOWFISH_KEY_LEN] {
    match key {
        BlowfishKey::RevisionARetail => &KEY_REVA_RETAIL,
        BlowfishKey::RevisionADev => &KEY_REVA_DEV,
        _ => &KEY_NTR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variants_select_distinct_tables() {
        let ntr = blowfish_key(BlowfishKey::Ntr).as_ptr();
        let retail = blowfish_key(BlowfishKey::RevisionARetail).as_ptr();
        let dev = blowfish_key(BlowfishKey::RevisionADev).as_ptr();
        assert_ne!(ntr, retail);
        assert_ne!(ntr, dev);
        assert_ne!(retail, dev);
    }

    #[test]
    fn test_default_arm_is_ntr() {
        assert_eq!(blowfish_key(BlowfishKey::Ntr).as_ptr(), KEY_NTR.as_ptr());
    }

    #[test]
    fn test_table_len() {
        assert_eq!(blowfish_key(BlowfishKey::Ntr).len(), 0x1048);
    }
}
