// Licensed under the Apache-2.0 license

//! Thin wrappers over the RustCrypto block cipher modes.

use aes::{Aes128, Aes256};
use cbc::cipher::{BlockEncryptMut, KeyInit, KeyIvInit, StreamCipher};
use ccm::aead::AeadInPlace;
use ccm::consts::{U12, U16};
use cmac::{Cmac, Mac};

type Aes128Ccm = ccm::Ccm<Aes128, U16, U12>;

/// Last block of the AES-256-CBC encryption of `data` (whole blocks) under
/// `iv`.
pub fn aes256_cbc_mac(key: &[u8; 32], iv: &[u8; 16], data: &[u8]) -> [u8; 16] {
    assert_eq!(data.len() % 16, 0);
    let mut enc = cbc::Encryptor::<Aes256>::new(key.into(), iv.into());
    let mut block = [0u8; 16];
    for chunk in data.chunks_exact(16) {
        block.copy_from_slice(chunk);
        enc.encrypt_block_mut((&mut block).into());
    }
    block
}

/// AES-256-CBC encryption of whole blocks.
pub fn aes256_cbc_encrypt(key: &[u8; 32], iv: &[u8; 16], data: &mut [u8]) {
    assert_eq!(data.len() % 16, 0);
    let mut enc = cbc::Encryptor::<Aes256>::new(key.into(), iv.into());
    for chunk in data.chunks_exact_mut(16) {
        enc.encrypt_block_mut(chunk.into());
    }
}

/// XOR `data` with the AES-256-CTR keystream starting at `counter`.
pub fn aes256_ctr(key: &[u8; 32], counter: &[u8; 16], data: &mut [u8]) {
    let mut cipher = ctr::Ctr128BE::<Aes256>::new(key.into(), counter.into());
    cipher.apply_keystream(data);
}

pub fn aes128_cmac(key: &[u8; 16], data: &[u8]) -> [u8; 16] {
    let mut mac = <Cmac<Aes128> as KeyInit>::new(key.into());
    mac.update(data);
    mac.finalize().into_bytes().into()
}

/// AES-128-CCM with a 12-byte nonce and 16-byte tag. Encrypts in place and
/// returns the tag.
pub fn aes128_ccm_encrypt(
    key: &[u8; 16],
    nonce: &[u8; 12],
    aad: &[u8],
    data: &mut [u8],
) -> [u8; 16] {
    let cipher = <Aes128Ccm as KeyInit>::new(key.into());
    cipher
        .encrypt_in_place_detached(nonce.into(), aad, data)
        .unwrap()
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cmac_rfc4493() {
        let key: [u8; 16] = hex::decode("2b7e151628aed2a6abf7158809cf4f3c")
            .unwrap()
            .try_into()
            .unwrap();
        assert_eq!(
            hex::encode(aes128_cmac(&key, &[])),
            "bb1d6929e95937287fa37d129b756746"
        );
    }

    #[test]
    fn test_ctr_sp800_38a() {
        let mut key = [0u8; 32];
        key.copy_from_slice(
            &hex::decode("603deb1015ca71be2b73aef0857d77811f352c073b6108d72d9810a30914dff4")
                .unwrap(),
        );
        let counter: [u8; 16] = core::array::from_fn(|i| 0xf0 + i as u8);
        let mut data = hex::decode("6bc1bee22e409f96e93d7e117393172a").unwrap();
        aes256_ctr(&key, &counter, &mut data);
        assert_eq!(hex::encode(data), "601ec313775789a5b7a7f504bbf3d228");
    }
}
