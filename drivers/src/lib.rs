/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the CryptoCell production drivers.

--*/

#![cfg_attr(not(any(feature = "std", test)), no_std)]

mod aes;
mod array;
mod ccm;
mod cmac_kdf;
mod hal;
mod mutex;
mod otp;
pub mod printer;
mod soc_ifc;
mod trng;
pub mod wait;

pub use aes::{
    AesCmacOp, AesContext, AesDirection, AesEngine, AesKey, AesMode, HwKey,
    AES_BLOCK_SIZE_BYTES, AES_IV_SIZE_BYTES,
};
pub use array::{LEArray4x4, LEArray4x8};
pub use cc_prod_error::{ProdError, ProdResult};
pub use cc_prod_registers::mmio::{CcMmio, RealMmio};
pub use ccm::{aes_ccm_decrypt, CCM_NONCE_SIZE, CCM_TAG_SIZE};
pub use cmac_kdf::{cmac_kdf, KDF_CONTEXT_MAX_SIZE, KDF_LABEL_MAX_SIZE};
pub use hal::CcHal;
pub use mutex::CryptoMutex;
pub use otp::Otp;
pub use soc_ifc::{Lifecycle, SocIfc};
pub use trng::Trng;
pub use wait::{BoundedWait, SpinWait, WaitStrategy};
