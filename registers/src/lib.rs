// Licensed under the Apache-2.0 license
//
// Register map of the CryptoCell host register window, as seen by the
// production library. Offsets are in bytes from the window base.
#![no_std]

pub mod aes;
pub mod host;
pub mod mmio;
pub mod nvm;
pub mod otp;
pub mod rng;
