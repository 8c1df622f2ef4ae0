/*++

Licensed under the Apache-2.0 license.

File Name:

    aes_ctr_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for AES-128-CTR.

--*/

use crate::aes_cbc_kat::PT;
use cc_prod_drivers::{
    AesContext, AesDirection, AesEngine, AesMode, CcMmio, ProdError, ProdResult, WaitStrategy,
};

// NIST SP 800-38A F.5.1, first two blocks.
const KEY: [u8; 16] = [
    0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
];

const COUNTER: [u8; 16] = [
    0xf0, 0xf1, 0xf2, 0xf3, 0xf4, 0xf5, 0xf6, 0xf7, 0xf8, 0xf9, 0xfa, 0xfb, 0xfc, 0xfd, 0xfe, 0xff,
];

const CT: [u8; 32] = [
    0x87, 0x4d, 0x61, 0x91, 0xb6, 0x20, 0xe3, 0x26, 0x1b, 0xef, 0x68, 0x64, 0x99, 0x0d, 0xb6, 0xce,
    0x98, 0x06, 0xf6, 0x6b, 0x79, 0x70, 0xfd, 0xff, 0x86, 0x17, 0x18, 0x7b, 0xb9, 0xff, 0xfd, 0xff,
];

#[derive(Default, Debug)]
pub struct AesCtrKat {}

impl AesCtrKat {
    /// This function executes the Known Answer Tests (aka KAT) for AES-CTR.
    pub fn execute<M: CcMmio, W: WaitStrategy>(
        &self,
        aes: &mut AesEngine<M, W>,
    ) -> ProdResult<()> {
        let mut ciphertext = [0u8; 32];
        let mut ctx = AesContext::new(
            AesMode::Ctr,
            AesDirection::Encrypt,
            (&KEY).into(),
            Some(&COUNTER[..]),
        )?;
        aes.crypt(&mut ctx, &PT, &mut ciphertext)?;
        if ciphertext != CT {
            Err(ProdError::KAT_AES_CIPHERTEXT_MISMATCH)?;
        }
        Ok(())
    }
}
