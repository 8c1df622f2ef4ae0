// Licensed under the Apache-2.0 license

//! True random number generator registers.

pub const RNG_ISR: u32 = 0x104;
pub const RNG_ICR: u32 = 0x108;
pub const TRNG_CONFIG: u32 = 0x10C;
/// Bit 0 set when the six EHR words hold a fresh sample.
pub const TRNG_VALID: u32 = 0x110;
/// Entropy holding register, six words (192 bits).
pub const EHR_DATA_0: u32 = 0x114;
pub const RND_SOURCE_ENABLE: u32 = 0x12C;
pub const SAMPLE_CNT1: u32 = 0x130;
pub const RNG_SW_RESET: u32 = 0x140;
pub const RNG_CLK_ENABLE: u32 = 0x1C4;

pub const EHR_WORDS: usize = 6;
pub const EHR_BYTES: usize = EHR_WORDS * 4;

/// `RNG_ISR`/`RNG_ICR` bit for "EHR valid".
pub const ISR_EHR_VALID: u32 = 1 << 0;
