/*++

Licensed under the Apache-2.0 license.

File Name:

    derivation_kat.rs

Abstract:

    File contains the Known Answer Test (KAT) for the CTR_DRBG derivation
    that generates the HUK.

--*/

use cc_prod::derivation::{generate, instantiate};
use cc_prod_drivers::{AesEngine, CcMmio, LEArray4x8, ProdError, ProdResult, WaitStrategy};

// Generated from Python code:
// >>> entropy = bytes((i * 7 + 3) & 0xff for i in range(48))
// followed by Block_Cipher_df (AES-256, 48-byte output), CTR_DRBG_Update
// and a 32-byte CTR_DRBG_Generate without additional input.
const ENTROPY: [u8; 48] = [
    0x03, 0x0a, 0x11, 0x18, 0x1f, 0x26, 0x2d, 0x34, 0x3b, 0x42, 0x49, 0x50, 0x57, 0x5e, 0x65, 0x6c,
    0x73, 0x7a, 0x81, 0x88, 0x8f, 0x96, 0x9d, 0xa4, 0xab, 0xb2, 0xb9, 0xc0, 0xc7, 0xce, 0xd5, 0xdc,
    0xe3, 0xea, 0xf1, 0xf8, 0xff, 0x06, 0x0d, 0x14, 0x1b, 0x22, 0x29, 0x30, 0x37, 0x3e, 0x45, 0x4c,
];

const EXPECTED: LEArray4x8 = LEArray4x8::new([
    0xee0679ab, 0xb0d7a7a3, 0x1d7993e0, 0x8d678729, 0x45ebd9cf, 0xbba539f6, 0xe001e415, 0xb983fbfe,
]);

#[derive(Default, Debug)]
pub struct DerivationKat {}

impl DerivationKat {
    /// This function executes the Known Answer Test (aka KAT) for the HUK
    /// derivation.
    pub fn execute<M: CcMmio, W: WaitStrategy>(
        &self,
        aes: &mut AesEngine<M, W>,
    ) -> ProdResult<()> {
        let mut state = instantiate(aes, &ENTROPY)?;
        let mut output = [0u8; LEArray4x8::BYTES];
        generate(aes, &mut state, &mut output)?;
        if LEArray4x8::from(output) != EXPECTED {
            Err(ProdError::KAT_DERIVATION_OUTPUT_MISMATCH)?;
        }
        Ok(())
    }
}
