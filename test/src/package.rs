// Licensed under the Apache-2.0 license

//! Builds wrapped asset packages the way a provisioning server does.

use crate::crypto::aes128_ccm_encrypt;
use crate::derive::cmac_kdf;

pub const PACKAGE_SIZE: usize = 64;

const TOKEN: u32 = 0x5072_6F64;
const VERSION: u32 = 1;
const ASSET_SIZE: u32 = 16;
const RESERVED: [u32; 2] = [0x5265_7631, 0x5265_7632];

#[derive(Clone, Copy, Debug)]
pub struct AssetPackageParams<'a> {
    /// Device RTL key.
    pub rtl_key: [u8; 16],
    pub label: &'a [u8],
    /// HBK0, user data or OEM HBK prefix of the target device.
    pub context: &'a [u8],
    pub asset_id: [u8; 4],
    pub nonce: [u8; 12],
    pub asset: [u8; 16],
}

pub fn build_asset_package(params: &AssetPackageParams) -> [u8; PACKAGE_SIZE] {
    let ktmp = cmac_kdf(&params.rtl_key, params.label, params.context);
    let kprov = cmac_kdf(&ktmp, b"P", &params.asset_id);

    let mut pkg = [0u8; PACKAGE_SIZE];
    for (chunk, word) in pkg[..20]
        .chunks_exact_mut(4)
        .zip([TOKEN, VERSION, ASSET_SIZE, RESERVED[0], RESERVED[1]])
    {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    pkg[20..32].copy_from_slice(&params.nonce);

    let mut enc_asset = params.asset;
    let (aad, _) = pkg.split_at(20);
    let tag = aes128_ccm_encrypt(&kprov, &params.nonce, aad, &mut enc_asset);
    pkg[32..48].copy_from_slice(&enc_asset);
    pkg[48..].copy_from_slice(&tag);
    pkg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_golden_package() {
        let context: [u8; 16] = core::array::from_fn(|i| 0xa0 + i as u8);
        let pkg = build_asset_package(&AssetPackageParams {
            rtl_key: core::array::from_fn(|i| 0x10 + i as u8),
            label: b"KEY ICV",
            context: &context,
            asset_id: *b"PICV",
            nonce: core::array::from_fn(|i| 0x60 + i as u8),
            asset: hex::decode("00112233445566778899aabbccddeeff")
                .unwrap()
                .try_into()
                .unwrap(),
        });
        assert_eq!(
            hex::encode(pkg),
            "646f725001000000100000003176655232766552606162636465666768696a6b\
             626861a2e89fb176417cd562260dde42955673545a7ae0bc55f4e4e2da3b40fd"
        );
    }
}
