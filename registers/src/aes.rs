// Licensed under the Apache-2.0 license

//! AES engine registers.

use bitfield::bitfield;

/// Key slot 0, eight words.
pub const AES_KEY_0: u32 = 0x400;
/// IV slot 0, four words. Holds the chaining value for CBC/OFB and the
/// running MAC for CBC-MAC/CMAC.
pub const AES_IV_0: u32 = 0x440;
/// Counter slot 0, four words (CTR mode).
pub const AES_CTR_0: u32 = 0x460;
/// Non-zero while the engine is processing.
pub const AES_BUSY: u32 = 0x470;
/// Writing 1 selects the hardware-resident key instead of the key slot.
pub const AES_SK: u32 = 0x478;
/// Writing 1 starts a CMAC over the bytes announced in `AES_REMAINING_BYTES`.
pub const AES_CMAC_INIT: u32 = 0x47C;
/// Bytes left in the current operation. The engine uses it to locate the
/// final block of a CMAC.
pub const AES_REMAINING_BYTES: u32 = 0x4BC;
pub const AES_CONTROL: u32 = 0x4C0;
/// Writing 1 finalizes a CMAC over an empty message.
pub const AES_CMAC_SIZE0_KICK: u32 = 0x524;
pub const AES_SW_RESET: u32 = 0x4F4;

/// Data-in FIFO, four words. The block is consumed when word 3 is written.
pub const DIN_BUFFER: u32 = 0xC00;
/// Data-out FIFO, four words.
pub const DOUT_BUFFER: u32 = 0xD00;

pub const KEY_WORDS: usize = 8;
pub const BLOCK_WORDS: usize = 4;

/// Cipher mode encodings for `AesControl::mode`.
pub mod mode {
    pub const ECB: u32 = 0;
    pub const CBC: u32 = 1;
    pub const CBC_MAC: u32 = 2;
    pub const CTR: u32 = 3;
    pub const OFB: u32 = 5;
    pub const CMAC: u32 = 7;
}

/// Key size encodings for `AesControl::nk_key0`.
pub mod key_size {
    pub const KEY_128: u32 = 0;
    pub const KEY_192: u32 = 1;
    pub const KEY_256: u32 = 2;
}

bitfield! {
    /// AES_CONTROL register.
    #[derive(Clone, Copy, Default, PartialEq, Eq)]
    pub struct AesControl(u32);
    impl Debug;
    u32;
    pub dec_key0, set_dec_key0: 0;
    pub mode, set_mode: 4, 2;
    pub nk_key0, set_nk_key0: 13, 12;
}
