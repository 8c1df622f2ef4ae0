// Licensed under the Apache-2.0 license

//! NVM controller: OTP programming status and lifecycle state.

/// Bit 0 set once the last OTP word write has been burned.
pub const AIB_FUSE_PROG_COMPLETED: u32 = 0x1F04;
/// Bit 0 set once `LCS_REG` holds a valid value.
pub const LCS_IS_VALID: u32 = 0x1F08;
/// Bit 0 set when the NVM controller is idle.
pub const NVM_IS_IDLE: u32 = 0x1F10;
/// Lifecycle state, bits 2:0.
pub const LCS_REG: u32 = 0x1F14;

pub const LCS_MASK: u32 = 0x7;

/// Lifecycle state values held in `LCS_REG`.
pub mod lcs {
    pub const CHIP_MANUFACTURE: u32 = 0;
    pub const DEVICE_MANUFACTURE: u32 = 1;
    pub const SECURE: u32 = 5;
    pub const RMA: u32 = 7;
}
