// Licensed under the Apache-2.0 license

use cc_prod::config::CMPU_WORKSPACE_MINIMUM_SIZE;
use cc_prod::{Asset, AssetPkg, CcHal, CmpuData, UniqueData, PROD_ASSET_PKG_SIZE};
use cc_prod_emu_periph::{CryptoCell, CryptoCellArgs, DEFAULT_RTL_KEY};
use cc_prod_registers::nvm::lcs;
use cc_prod_test::{build_asset_package, AssetPackageParams};

pub const HBK0: [u8; 16] = [
    0xa0, 0xa1, 0xa2, 0xa3, 0xa4, 0xa5, 0xa6, 0xa7, 0xa8, 0xa9, 0xaa, 0xab, 0xac, 0xad, 0xae, 0xaf,
];

pub const KPICV: [u8; 16] = [
    0x00, 0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88, 0x99, 0xaa, 0xbb, 0xcc, 0xdd, 0xee, 0xff,
];

/// HUK generated from `canned_entropy()`, as OTP words.
pub const CANNED_HUK: [u32; 8] = [
    0xee0679ab, 0xb0d7a7a3, 0x1d7993e0, 0x8d678729, 0x45ebd9cf, 0xbba539f6, 0xe001e415, 0xb983fbfe,
];

#[repr(C, align(4))]
pub struct Workspace(pub [u8; CMPU_WORKSPACE_MINIMUM_SIZE]);

impl Workspace {
    pub fn new() -> Box<Self> {
        Box::new(Self([0; CMPU_WORKSPACE_MINIMUM_SIZE]))
    }
}

pub fn canned_entropy() -> Vec<u8> {
    (0..48).map(|i| (i * 7 + 3) as u8).collect()
}

pub fn device(lcs: u32) -> CcHal<CryptoCell> {
    CcHal::with_spin_wait(CryptoCell::new(CryptoCellArgs {
        lcs,
        entropy: Some(canned_entropy()),
        ..Default::default()
    }))
}

pub fn cm_device() -> CcHal<CryptoCell> {
    device(lcs::CHIP_MANUFACTURE)
}

pub fn cmpu_request() -> CmpuData {
    CmpuData {
        unique_data: UniqueData::UserData([0x5A; 16]),
        kpicv: Asset::NoKey,
        kceicv: Asset::NoKey,
        icv_min_version: 0,
        icv_config_word: 0,
        icv_dcu_default_lock: [0; 4],
    }
}

/// Package `asset` for the device with the default RTL key.
pub fn package(label: &[u8], context: &[u8], asset_id: &[u8; 4], asset: &[u8; 16]) -> AssetPkg {
    let bytes: [u8; PROD_ASSET_PKG_SIZE] = build_asset_package(&AssetPackageParams {
        rtl_key: DEFAULT_RTL_KEY,
        label,
        context,
        asset_id: *asset_id,
        nonce: core::array::from_fn(|i| 0x60 + i as u8),
        asset: *asset,
    });
    AssetPkg::from_bytes(&bytes)
}
