// Licensed under the Apache-2.0 license

use crate::{AesBlockCipher, AES_BLOCK_SIZE};

pub fn xor_block(dst: &mut [u8; AES_BLOCK_SIZE], src: &[u8; AES_BLOCK_SIZE]) {
    for (d, s) in dst.iter_mut().zip(src.iter()) {
        *d ^= s;
    }
}

/// Doubling in GF(2^128) with the CMAC polynomial.
fn dbl(block: &[u8; AES_BLOCK_SIZE]) -> [u8; AES_BLOCK_SIZE] {
    let val = u128::from_be_bytes(*block);
    let mut result = val << 1;
    if val >> 127 != 0 {
        result ^= 0x87;
    }
    result.to_be_bytes()
}

/// CMAC subkeys K1 and K2 (RFC 4493 Section 2.3).
pub fn cmac_subkeys(cipher: &AesBlockCipher) -> ([u8; AES_BLOCK_SIZE], [u8; AES_BLOCK_SIZE]) {
    let mut l = [0u8; AES_BLOCK_SIZE];
    cipher.encrypt_block(&mut l);
    let k1 = dbl(&l);
    let k2 = dbl(&k1);
    (k1, k2)
}
