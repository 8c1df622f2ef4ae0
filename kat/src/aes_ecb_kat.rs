/*++

Licensed under the Apache-2.0 license.

File Name:

    aes_ecb_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for AES-ECB with 128, 192 and
    256-bit keys.

--*/

use cc_prod_drivers::{
    AesContext, AesDirection, AesEngine, AesKey, AesMode, CcMmio, ProdError, ProdResult,
    WaitStrategy,
};

// FIPS-197 Appendix C.1, C.2 and C.3: key 00 01 02 .., plaintext 00 11 22 .. ff.
const KEY: [u8; 32] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
];

const PT: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
];

const CT_128: [u8; 16] = [
    0x69, 0xc4, 0xe0, 0xd8, 0x6a, 0x7b, 0x04, 0x30, 0xd8, 0xcd, 0xb7, 0x80, 0x70, 0xb4, 0xc5, 0x5a,
];

const CT_192: [u8; 16] = [
    0xdd, 0xa9, 0x7c, 0xa4, 0x86, 0x4c, 0xdf, 0xe0, 0x6e, 0xaf, 0x70, 0xa0, 0xec, 0x0d, 0x71, 0x91,
];

const CT_256: [u8; 16] = [
    0x8e, 0xa2, 0xb7, 0xca, 0x51, 0x67, 0x45, 0xbf, 0xea, 0xfc, 0x49, 0x90, 0x4b, 0x49, 0x60, 0x89,
];

#[derive(Default, Debug)]
pub struct AesEcbKat {}

impl AesEcbKat {
    /// This function executes the Known Answer Tests (aka KAT) for AES-ECB.
    ///
    /// # Arguments
    ///
    /// * `aes` - Claimed AES engine
    ///
    /// # Returns
    ///
    /// * `ProdResult` - Result denoting the KAT outcome.
    pub fn execute<M: CcMmio, W: WaitStrategy>(
        &self,
        aes: &mut AesEngine<M, W>,
    ) -> ProdResult<()> {
        self.encrypt_decrypt(aes, &KEY[..16], &CT_128)?;
        self.encrypt_decrypt(aes, &KEY[..24], &CT_192)?;
        self.encrypt_decrypt(aes, &KEY[..], &CT_256)
    }

    fn encrypt_decrypt<M: CcMmio, W: WaitStrategy>(
        &self,
        aes: &mut AesEngine<M, W>,
        key: &[u8],
        expected: &[u8; 16],
    ) -> ProdResult<()> {
        let mut ciphertext = [0u8; 16];
        let mut ctx = AesContext::new(
            AesMode::Ecb,
            AesDirection::Encrypt,
            AesKey::Array(key),
            None,
        )?;
        aes.crypt(&mut ctx, &PT, &mut ciphertext)?;
        if ciphertext != *expected {
            Err(ProdError::KAT_AES_CIPHERTEXT_MISMATCH)?;
        }

        let mut plaintext = [0u8; 16];
        let mut ctx = AesContext::new(
            AesMode::Ecb,
            AesDirection::Decrypt,
            AesKey::Array(key),
            None,
        )?;
        aes.crypt(&mut ctx, expected, &mut plaintext)?;
        if plaintext != PT {
            Err(ProdError::KAT_AES_PLAINTEXT_MISMATCH)?;
        }

        Ok(())
    }
}
