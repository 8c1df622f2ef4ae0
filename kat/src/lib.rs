/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the production library Known Answer Tests.

--*/

#![cfg_attr(not(test), no_std)]

mod aes_cbc_kat;
mod aes_cmac_kat;
mod aes_ctr_kat;
mod aes_ecb_kat;
mod derivation_kat;

pub use aes_cbc_kat::AesCbcKat;
pub use aes_cmac_kat::AesCmacKat;
pub use aes_ctr_kat::AesCtrKat;
pub use aes_ecb_kat::AesEcbKat;
pub use cc_prod_drivers::{ProdError, ProdResult};
pub use derivation_kat::DerivationKat;

use cc_prod_drivers::{CcHal, CcMmio, WaitStrategy};

/// Run every KAT on one claim of the AES engine.
///
/// The factory tool calls this before `cc_prod_cmpu` or `cc_prod_dmpu` and
/// refuses to provision when it fails. The provisioning crate cannot call it
/// itself because this crate depends on it.
pub fn execute_kats<M: CcMmio, W: WaitStrategy>(hal: &mut CcHal<M, W>) -> ProdResult<()> {
    let mut aes = hal.aes()?;
    AesEcbKat::default().execute(&mut aes)?;
    AesCbcKat::default().execute(&mut aes)?;
    AesCtrKat::default().execute(&mut aes)?;
    AesCmacKat::default().execute(&mut aes)?;
    DerivationKat::default().execute(&mut aes)?;
    Ok(())
}
