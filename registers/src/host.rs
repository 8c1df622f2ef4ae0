// Licensed under the Apache-2.0 license

//! Host control registers: clocks, engine routing, identification.

pub const AES_CLK_ENABLE: u32 = 0x810;
pub const DMA_CLK_ENABLE: u32 = 0x81C;

/// Routes the data path to one engine. See `crypto_ctl`.
pub const CRYPTO_CTL: u32 = 0x900;

pub mod crypto_ctl {
    pub const BYPASS: u32 = 0;
    pub const AES: u32 = 1;
}

/// Peripheral identification registers.
pub const PERIPHERAL_ID_4: u32 = 0x1FD0;
pub const PERIPHERAL_ID_0: u32 = 0x1FE0;
pub const PERIPHERAL_ID_1: u32 = 0x1FE4;
pub const PERIPHERAL_ID_2: u32 = 0x1FE8;
pub const PERIPHERAL_ID_3: u32 = 0x1FEC;

/// Component identification registers.
pub const COMPONENT_ID_0: u32 = 0x1FF0;
pub const COMPONENT_ID_1: u32 = 0x1FF4;
pub const COMPONENT_ID_2: u32 = 0x1FF8;
pub const COMPONENT_ID_3: u32 = 0x1FFC;

/// (register, expected value) for every identification register.
pub const EXPECTED_IDS: [(u32, u32); 9] = [
    (PERIPHERAL_ID_0, 0xC0),
    (PERIPHERAL_ID_1, 0xB0),
    (PERIPHERAL_ID_2, 0x0B),
    (PERIPHERAL_ID_3, 0x00),
    (PERIPHERAL_ID_4, 0x04),
    (COMPONENT_ID_0, 0x0D),
    (COMPONENT_ID_1, 0xF0),
    (COMPONENT_ID_2, 0x05),
    (COMPONENT_ID_3, 0xB1),
];

/// Debug control unit bits the ICV is allowed to lock, four words. The OEM
/// owns the complement.
pub const AO_ICV_DCU_RESTRICTION_MASK: u32 = 0x1E64;
pub const DCU_WORDS: usize = 4;
