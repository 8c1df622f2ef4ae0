// Licensed under the Apache-2.0 license

/// Provisioning key derivations implemented independently from the drivers,
/// for use in end-to-end test-cases.
///
/// DO NOT REFACTOR THIS FILE TO RE-USE CODE FROM THE PRODUCTION LIBRARY
use crate::crypto::{aes128_cmac, aes256_cbc_encrypt, aes256_cbc_mac, aes256_ctr};

/// Key used by Block_Cipher_df: bytes 00..1f.
pub const DF_KEY: [u8; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
];

/// 0x01 || label || 0x00 || context || 0x80, MAC'd with AES-128-CMAC.
pub fn cmac_kdf(key: &[u8; 16], label: &[u8], context: &[u8]) -> [u8; 16] {
    let mut input = vec![0x01];
    input.extend_from_slice(label);
    input.push(0x00);
    input.extend_from_slice(context);
    input.push(0x80);
    aes128_cmac(key, &input)
}

/// SP 800-90A Block_Cipher_df with AES-256 and a 48-byte output.
pub fn block_cipher_df(input: &[u8]) -> [u8; 48] {
    let mut s = Vec::new();
    s.extend_from_slice(&(input.len() as u32).to_be_bytes());
    s.extend_from_slice(&48u32.to_be_bytes());
    s.extend_from_slice(input);
    s.push(0x80);
    while s.len() % 16 != 0 {
        s.push(0);
    }

    let mut temp = [0u8; 48];
    for (i, chunk) in temp.chunks_exact_mut(16).enumerate() {
        let mut bcc_input = vec![0u8; 16];
        bcc_input[..4].copy_from_slice(&(i as u32).to_be_bytes());
        bcc_input.extend_from_slice(&s);
        chunk.copy_from_slice(&aes256_cbc_mac(&DF_KEY, &[0; 16], &bcc_input));
    }

    let mut key = [0u8; 32];
    key.copy_from_slice(&temp[..32]);
    let mut x = [0u8; 16];
    x.copy_from_slice(&temp[32..]);
    let mut output = [0u8; 48];
    aes256_cbc_encrypt(&key, &x, &mut output);
    output
}

fn increment(v: &[u8; 16]) -> [u8; 16] {
    u128::from_be_bytes(*v).wrapping_add(1).to_be_bytes()
}

/// CTR_DRBG instantiate from `entropy`, then generate 32 bytes.
pub fn derive_huk(entropy: &[u8]) -> [u8; 32] {
    let mut seed = block_cipher_df(entropy);
    aes256_ctr(&[0; 32], &increment(&[0; 16]), &mut seed);

    let mut key = [0u8; 32];
    key.copy_from_slice(&seed[..32]);
    let mut v = [0u8; 16];
    v.copy_from_slice(&seed[32..]);

    let mut huk = [0u8; 32];
    aes256_ctr(&key, &increment(&v), &mut huk);
    huk
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entropy() -> Vec<u8> {
        (0..48).map(|i| (i * 7 + 3) as u8).collect()
    }

    #[test]
    fn test_block_cipher_df() {
        assert_eq!(
            hex::encode(block_cipher_df(&entropy())),
            "8798db84a90c308bdef196b9454eb7cfdba52855504bf24fe21c32bb568e4a5a\
             ea1e70fbbebbb12fa88d3c1c5f5e392b"
        );
    }

    #[test]
    fn test_derive_huk() {
        assert_eq!(
            hex::encode(derive_huk(&entropy())),
            "ab7906eea3a7d7b0e093791d2987678dcfd9eb45f639a5bb15e401e0fefb83b9"
        );
    }

    #[test]
    fn test_cmac_kdf_chain() {
        let rtl_key: [u8; 16] = core::array::from_fn(|i| 0x10 + i as u8);
        let context: [u8; 16] = core::array::from_fn(|i| 0xa0 + i as u8);
        let ktmp = cmac_kdf(&rtl_key, b"KEY ICV", &context);
        assert_eq!(hex::encode(ktmp), "a824fee7ab1521a99542a23a10bb05c8");
        assert_eq!(
            hex::encode(cmac_kdf(&ktmp, b"P", b"PICV")),
            "6b9d3b19e4000f933573abf9070c5a59"
        );
    }
}
