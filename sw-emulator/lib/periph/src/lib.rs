/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the CryptoCell emulator peripheral library.

--*/

mod aes;
mod crypto_cell;
mod helpers;
mod otp;
mod soc_reg;
mod trng;

pub use aes::Aes;
pub use crypto_cell::{CryptoCell, CryptoCellArgs, DEFAULT_ICV_DCU_MASK, DEFAULT_RTL_KEY};
pub use otp::Otp;
pub use soc_reg::SocRegisters;
pub use trng::Trng;
