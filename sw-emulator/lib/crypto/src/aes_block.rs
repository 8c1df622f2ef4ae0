/*++

Licensed under the Apache-2.0 license.

File Name:

    aes_block.rs

Abstract:

    File contains the raw AES block transform used by the emulated engine.
    Chaining modes are implemented by the peripheral on top of it.

--*/

use aes::{Aes128, Aes192, Aes256};
use cipher::{BlockDecrypt, BlockEncrypt, KeyInit};

pub const AES_BLOCK_SIZE: usize = 16;

pub enum AesBlockCipher {
    Aes128(Aes128),
    Aes192(Aes192),
    Aes256(Aes256),
}

impl AesBlockCipher {
    /// Returns `None` unless `key` is 16, 24 or 32 bytes.
    pub fn new(key: &[u8]) -> Option<Self> {
        match key.len() {
            16 => Aes128::new_from_slice(key).ok().map(Self::Aes128),
            24 => Aes192::new_from_slice(key).ok().map(Self::Aes192),
            32 => Aes256::new_from_slice(key).ok().map(Self::Aes256),
            _ => None,
        }
    }

    pub fn encrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) {
        let block: &mut aes::Block = block.into();
        match self {
            Self::Aes128(c) => c.encrypt_block(block),
            Self::Aes192(c) => c.encrypt_block(block),
            Self::Aes256(c) => c.encrypt_block(block),
        }
    }

    pub fn decrypt_block(&self, block: &mut [u8; AES_BLOCK_SIZE]) {
        let block: &mut aes::Block = block.into();
        match self {
            Self::Aes128(c) => c.decrypt_block(block),
            Self::Aes192(c) => c.decrypt_block(block),
            Self::Aes256(c) => c.decrypt_block(block),
        }
    }
}
