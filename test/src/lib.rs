// Licensed under the Apache-2.0 license

//! Reference implementations used by the production library's end-to-end
//! tests. Nothing here calls into the code under test.

pub mod crypto;
pub mod derive;
pub mod package;

pub use package::{build_asset_package, AssetPackageParams, PACKAGE_SIZE};

/// Bytes as the little-endian words the OTP holds.
pub fn words_le(bytes: &[u8]) -> Vec<u32> {
    bytes
        .chunks_exact(4)
        .map(|c| u32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect()
}
