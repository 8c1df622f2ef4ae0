/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains exports for the CryptoCell production library: the ICV
    (CMPU) and OEM (DMPU) secure key provisioning flows. Callers run
    `cc_prod_kat::execute_kats` on the same HAL first and only provision
    when every KAT passes.

--*/

#![cfg_attr(not(any(feature = "std", test)), no_std)]

mod cmpu;
pub mod config;
pub mod derivation;
mod dmpu;
mod pkg_verify;
mod util;
mod workspace;

pub use cmpu::{cc_prod_cmpu, cc_prod_cmpu_status, CmpuData, UniqueData};
pub use dmpu::{cc_prod_dmpu, cc_prod_dmpu_status, DmpuData, Hbk};
pub use pkg_verify::{
    pkg_verify, resolve_asset, Asset, AssetPkg, PROD_ASSET_ADATA_SIZE, PROD_ASSET_PKG_SIZE,
    PROD_ASSET_PROD_TOKEN, PROD_ASSET_PROD_VERSION, PROD_ASSET_RESERVED1_VAL,
    PROD_ASSET_RESERVED2_VAL,
};
pub use util::{get_zero_count, otp_write_verify, thermometer_encode};

pub use cc_prod_drivers::{BoundedWait, CcHal, CcMmio, RealMmio, SpinWait, WaitStrategy};
pub use cc_prod_error::{status_code, ProdError, ProdResult};
