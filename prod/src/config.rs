// Licensed under the Apache-2.0 license

//! Compile-time parameters of the provisioning flows.

/// Smallest workspace accepted by the CMPU flow, in bytes.
pub const CMPU_WORKSPACE_MINIMUM_SIZE: usize = 4096;

/// Smallest workspace accepted by the DMPU flow, in bytes.
pub const DMPU_WORKSPACE_MINIMUM_SIZE: usize = 1536;

/// Required workspace alignment.
pub const WORKSPACE_ALIGNMENT: usize = 4;

/// TRNG bytes fed to the derivation function when generating the HUK.
pub const HUK_ENTROPY_SIZE: usize = 48;

/// Size of a plaintext asset (Kpicv, Kceicv, Kcp, Kce).
pub const PROD_ASSET_SIZE: usize = 16;

/// Size of the per-device context bound into packaged assets.
pub const PROD_UNIQUE_BUFF_SIZE: usize = 16;

/// Ktmp label for ICV assets.
pub const ICV_KEY_LABEL: &[u8] = b"KEY ICV";
/// Ktmp label for OEM assets.
pub const OEM_KEY_LABEL: &[u8] = b"KEY OEM";
/// Kprov label.
pub const PROV_KEY_LABEL: &[u8] = b"P";

pub const KPICV_ASSET_ID: [u8; 4] = *b"PICV";
pub const KCEICV_ASSET_ID: [u8; 4] = *b"EICV";
pub const KCP_ASSET_ID: [u8; 4] = *b"POEM";
pub const KCE_ASSET_ID: [u8; 4] = *b"EOEM";

/// Largest minimum SW version the ICV counter can hold.
pub const ICV_MAX_VERSION: u32 = 64;
/// Largest minimum SW version the OEM counter can hold.
pub const OEM_MAX_VERSION: u32 = 96;
