/*++

Licensed under the Apache-2.0 license.

File Name:

    aes_cmac_kat.rs

Abstract:

    File contains the Known Answer Tests (KAT) for AES-128-CMAC.

--*/

use crate::aes_cbc_kat::PT;
use cc_prod_drivers::{AesCmacOp, AesKey, LEArray4x4, ProdError, ProdResult};

// RFC 4493 section 4, examples 1 and 2.
const KEY: [u8; 16] = [
    0x2b, 0x7e, 0x15, 0x16, 0x28, 0xae, 0xd2, 0xa6, 0xab, 0xf7, 0x15, 0x88, 0x09, 0xcf, 0x4f, 0x3c,
];

const EXPECTED_EMPTY: LEArray4x4 =
    LEArray4x4::new([0x29691dbb, 0x283759e9, 0x127da37f, 0x4667759b]);

const EXPECTED_ONE_BLOCK: LEArray4x4 =
    LEArray4x4::new([0xb4160a07, 0x44414d6b, 0x9ddd9bf7, 0x7c284ad0]);

#[derive(Default, Debug)]
pub struct AesCmacKat {}

impl AesCmacKat {
    /// This function executes the Known Answer Tests (aka KAT) for AES-CMAC.
    ///
    /// Covers the empty message, which the engine finalizes separately.
    pub fn execute<A: AesCmacOp>(&self, aes: &mut A) -> ProdResult<()> {
        let mac = aes.cmac(AesKey::from(&KEY), &[])?;
        if LEArray4x4::from(mac) != EXPECTED_EMPTY {
            Err(ProdError::KAT_AES_CMAC_MISMATCH)?;
        }

        let mac = aes.cmac(AesKey::from(&KEY), &PT[..16])?;
        if LEArray4x4::from(mac) != EXPECTED_ONE_BLOCK {
            Err(ProdError::KAT_AES_CMAC_MISMATCH)?;
        }

        Ok(())
    }
}
