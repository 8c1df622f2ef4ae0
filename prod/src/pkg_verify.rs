/*++

Licensed under the Apache-2.0 license.

File Name:

    pkg_verify.rs

Abstract:

    File contains the asset package format and its unwrap: two CMAC-KDF
    steps from the RTL key down to the provisioning key, then AES-CCM.

--*/

use crate::config::{PROD_ASSET_SIZE, PROV_KEY_LABEL};
use cc_prod_drivers::{
    aes_ccm_decrypt, cmac_kdf, AesEngine, AesKey, CcMmio, HwKey, ProdError, ProdResult,
    WaitStrategy, CCM_NONCE_SIZE, CCM_TAG_SIZE,
};
use zerocopy::little_endian::U32;
use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout, Unaligned};
use zeroize::Zeroizing;

pub const PROD_ASSET_PKG_SIZE: usize = 64;
/// Bytes of the package covered as associated data: the five header words.
pub const PROD_ASSET_ADATA_SIZE: usize = 20;

/// "Prod"
pub const PROD_ASSET_PROD_TOKEN: u32 = 0x5072_6F64;
pub const PROD_ASSET_PROD_VERSION: u32 = 1;
/// "Rev1"
pub const PROD_ASSET_RESERVED1_VAL: u32 = 0x5265_7631;
/// "Rev2"
pub const PROD_ASSET_RESERVED2_VAL: u32 = 0x5265_7632;

/// Wire format of a wrapped asset. Header words are little-endian.
#[repr(C)]
#[derive(
    Clone, Copy, Debug, Eq, PartialEq, FromBytes, IntoBytes, KnownLayout, Immutable, Unaligned,
)]
pub struct AssetPkg {
    pub token: U32,
    pub version: U32,
    pub asset_size: U32,
    pub reserved: [U32; 2],
    pub nonce: [u8; CCM_NONCE_SIZE],
    pub enc_asset: [u8; PROD_ASSET_SIZE],
    pub tag: [u8; CCM_TAG_SIZE],
}

impl AssetPkg {
    pub fn from_bytes(bytes: &[u8; PROD_ASSET_PKG_SIZE]) -> Self {
        // Every 64-byte pattern is a valid `AssetPkg`; the size is fixed by the
        // array type so this cannot fail.
        let mut pkg = Self::new_zeroed();
        pkg.as_mut_bytes().copy_from_slice(bytes);
        pkg
    }

    pub fn to_bytes(&self) -> [u8; PROD_ASSET_PKG_SIZE] {
        let mut bytes = [0u8; PROD_ASSET_PKG_SIZE];
        bytes.copy_from_slice(self.as_bytes());
        bytes
    }

    fn header_is_valid(&self) -> bool {
        self.token.get() == PROD_ASSET_PROD_TOKEN
            && self.version.get() == PROD_ASSET_PROD_VERSION
            && self.asset_size.get() == PROD_ASSET_SIZE as u32
            && self.reserved[0].get() == PROD_ASSET_RESERVED1_VAL
            && self.reserved[1].get() == PROD_ASSET_RESERVED2_VAL
    }
}

/// One key slot of a provisioning request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Asset {
    /// The slot is left empty and flagged "not in use".
    NoKey,
    /// Key supplied in the clear.
    Plain([u8; PROD_ASSET_SIZE]),
    /// Key wrapped for this device.
    Package(AssetPkg),
}

/// Authenticate and decrypt `pkg`.
///
/// # Arguments
///
/// * `aes` - Claimed AES engine
/// * `label` - Ktmp label, selects the owning role
/// * `context` - Ktmp context, binds the package to one device
/// * `asset_id` - Kprov context, selects the key slot
pub fn pkg_verify<M: CcMmio, W: WaitStrategy>(
    aes: &mut AesEngine<M, W>,
    label: &[u8],
    context: &[u8],
    asset_id: &[u8; 4],
    pkg: &AssetPkg,
) -> ProdResult<Zeroizing<[u8; PROD_ASSET_SIZE]>> {
    if !pkg.header_is_valid() {
        return Err(ProdError::PROD_ASSET_PKG_PARAM);
    }

    let ktmp = cmac_kdf(aes, AesKey::Hw(HwKey::Rtl), label, context)?;
    let kprov = cmac_kdf(aes, AesKey::Array(&ktmp[..]), PROV_KEY_LABEL, asset_id)?;

    let mut asset = Zeroizing::new([0u8; PROD_ASSET_SIZE]);
    aes_ccm_decrypt(
        aes,
        &kprov,
        &pkg.nonce,
        &pkg.as_bytes()[..PROD_ASSET_ADATA_SIZE],
        &pkg.enc_asset,
        &pkg.tag,
        &mut asset[..],
    )
    .map_err(|err| match err {
        ProdError::DRIVER_CCM_TAG_MISMATCH => ProdError::PROD_ASSET_PKG_VERIFY,
        other => other,
    })?;
    Ok(asset)
}

/// Resolve a key slot to its plaintext, or `None` for `Asset::NoKey`.
pub fn resolve_asset<M: CcMmio, W: WaitStrategy>(
    aes: &mut AesEngine<M, W>,
    asset: &Asset,
    label: &[u8],
    context: &[u8],
    asset_id: &[u8; 4],
) -> ProdResult<Option<Zeroizing<[u8; PROD_ASSET_SIZE]>>> {
    match asset {
        Asset::NoKey => Ok(None),
        Asset::Plain(key) => Ok(Some(Zeroizing::new(*key))),
        Asset::Package(pkg) => pkg_verify(aes, label, context, asset_id, pkg).map(Some),
    }
}
