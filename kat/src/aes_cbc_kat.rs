/*++

Licensed under the Apache-2.0 license.

File Name:

    aes_cbc_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for AES-128-CBC.

--*/

use cc_prod_drivers::{
    AesContext, AesDirection, AesEngine, AesMode, CcMmio, ProdError, ProdResult, WaitStrategy,
};

// NIST SP 800-38A F.2.1 and F.2.2, first two blocks.
const KEY: [u8; 16] = [
    0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
];

const IV: [u8; 16] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
];

pub(crate) const PT: [u8; 32] = [
    0x6b, 0xc1, 0xbe, 0xe2, 0x2e, 0x40, 0x9f, 0x96, 0xe9, 0x3d, 0x7e, 0x11, 0x73, 0x93, 0x17, 0x2a,
    0xae, 0x2d, 0x8a, 0x57, 0x1e, 0x03, 0xac, 0x9c, 0x9e, 0xb7, 0x6f, 0xac, 0x45, 0xaf, 0x8e, 0x51,
];

const CT: [u8; 32] = [
    0x76, 0x49, 0xab, 0xac, 0x81, 0x19, 0xb2, 0x46, 0xce, 0xe9, 0x8e, 0x9b, 0x12, 0xe9, 0x19, 0x7d,
    0x50, 0x86, 0xcb, 0x9b, 0x50, 0x72, 0x19, 0xee, 0x95, 0xdb, 0x11, 0x3a, 0x91, 0x76, 0x78, 0xb2,
];

#[derive(Default, Debug)]
pub struct AesCbcKat {}

impl AesCbcKat {
    /// This function executes the Known Answer Tests (aka KAT) for AES-CBC.
    ///
    /// Encryption runs block by block to exercise chaining across calls.
    pub fn execute<M: CcMmio, W: WaitStrategy>(
        &self,
        aes: &mut AesEngine<M, W>,
    ) -> ProdResult<()> {
        let mut ciphertext = [0u8; 32];
        let mut ctx = AesContext::new(
            AesMode::Cbc,
            AesDirection::Encrypt,
            (&KEY).into(),
            Some(&IV[..]),
        )?;
        for (input, output) in PT.chunks_exact(16).zip(ciphertext.chunks_exact_mut(16)) {
            aes.crypt(&mut ctx, input, output)?;
        }
        if ciphertext != CT {
            Err(ProdError::KAT_AES_CIPHERTEXT_MISMATCH)?;
        }

        let mut plaintext = [0u8; 32];
        let mut ctx = AesContext::new(
            AesMode::Cbc,
            AesDirection::Decrypt,
            (&KEY).into(),
            Some(&IV[..]),
        )?;
        aes.crypt(&mut ctx, &CT, &mut plaintext)?;
        if plaintext != PT {
            Err(ProdError::KAT_AES_PLAINTEXT_MISMATCH)?;
        }

        Ok(())
    }
}
