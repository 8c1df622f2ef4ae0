// Licensed under the Apache-2.0 license

//! OTP word map. Offsets are word indices; `word_addr` turns one into a
//! register offset.

use bitfield::bitfield;

/// Register offset of OTP word 0.
pub const OTP_BASE: u32 = 0x2000;
/// Number of OTP words reachable through the window.
pub const OTP_SIZE_WORDS: u32 = 0x80;

pub const fn word_addr(word: u32) -> u32 {
    OTP_BASE + word * 4
}

pub const HUK: u32 = 0x00;
pub const HUK_WORDS: usize = 8;

pub const KPICV: u32 = 0x08;
pub const KCEICV: u32 = 0x0C;
pub const KEY_WORDS: usize = 4;

pub const ICV_MANUFACTURE_FLAGS: u32 = 0x10;

/// HBK0 occupies the first four words, HBK1 the last four. A full 256-bit
/// HBK uses all eight.
pub const HBK: u32 = 0x11;
pub const HBK0: u32 = HBK;
pub const HBK1: u32 = 0x15;
pub const HBK_WORDS: usize = 8;
pub const HBK0_WORDS: usize = 4;
pub const HBK1_WORDS: usize = 4;

pub const KCP: u32 = 0x19;
pub const KCE: u32 = 0x1D;

pub const OEM_PROGRAMMED_FLAGS: u32 = 0x21;

pub const ICV_MIN_VERSION: u32 = 0x22;
pub const ICV_MIN_VERSION_WORDS: usize = 2;
pub const OEM_MIN_VERSION: u32 = 0x24;
pub const OEM_MIN_VERSION_WORDS: usize = 3;

pub const ICV_GENERAL_PURPOSE_CONFIG: u32 = 0x27;

pub const DCU_LOCK: u32 = 0x28;
pub const DCU_LOCK_WORDS: usize = 4;

bitfield! {
    /// ICV manufacturing flag word.
    #[derive(Clone, Copy, Default, PartialEq, Eq)]
    pub struct IcvManufactureFlags(u32);
    impl Debug;
    u32;
    pub u8, huk_zero_count, set_huk_zero_count: 7, 0;
    pub u8, kpicv_zero_count, set_kpicv_zero_count: 14, 8;
    pub kpicv_not_in_use, set_kpicv_not_in_use: 15;
    pub u8, kceicv_zero_count, set_kceicv_zero_count: 22, 16;
    pub kceicv_not_in_use, set_kceicv_not_in_use: 23;
    pub u8, hbk0_zero_count, set_hbk0_zero_count: 30, 24;
    pub hbk0_not_in_use, set_hbk0_not_in_use: 31;
}

bitfield! {
    /// OEM programmed flag word.
    #[derive(Clone, Copy, Default, PartialEq, Eq)]
    pub struct OemProgrammedFlags(u32);
    impl Debug;
    u32;
    pub u8, hbk_zero_count, set_hbk_zero_count: 7, 0;
    pub u8, kcp_zero_count, set_kcp_zero_count: 14, 8;
    pub kcp_not_in_use, set_kcp_not_in_use: 15;
    pub u8, kce_zero_count, set_kce_zero_count: 22, 16;
    pub kce_not_in_use, set_kce_not_in_use: 23;
}

macro_rules! flag_word_conversions {
    ($($name:ident),*) => {
        $(
            impl From<u32> for $name {
                fn from(val: u32) -> Self {
                    Self(val)
                }
            }

            impl From<$name> for u32 {
                fn from(val: $name) -> Self {
                    val.0
                }
            }
        )*
    };
}

flag_word_conversions!(IcvManufactureFlags, OemProgrammedFlags);
