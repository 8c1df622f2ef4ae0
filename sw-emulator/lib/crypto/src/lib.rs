/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the CryptoCell emulator crypto library.

--*/

mod aes_block;
mod helpers;

pub use aes_block::{AesBlockCipher, AES_BLOCK_SIZE};
pub use helpers::{cmac_subkeys, xor_block};
