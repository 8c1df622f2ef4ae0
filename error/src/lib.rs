/*++

Licensed under the Apache-2.0 license.

File Name:

    lib.rs

Abstract:

    File contains the error type and error codes shared by the production
    library, its drivers and the known answer tests.

--*/
#![cfg_attr(not(any(feature = "std", test)), no_std)]
use core::convert::From;
use core::num::{NonZeroU32, TryFromIntError};

/// Production library error type.
///
/// The wrapped value is the status code reported to the caller of the
/// provisioning entry points. Zero is reserved for success and can never be
/// held by this type.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ProdError(pub NonZeroU32);

/// Macro to define error constants ensuring uniqueness
///
/// This macro takes a list of (name, value, doc) tuples and generates
/// constant definitions for each error code.
#[macro_export]
macro_rules! define_error_constants {
    ($(($name:ident, $value:expr, $doc:expr)),* $(,)?) => {
        $(
            #[doc = $doc]
            pub const $name: ProdError = ProdError::new_const($value);
        )*

        #[cfg(test)]
        /// Returns a vector of all defined error constants for testing uniqueness
        pub fn all_constants() -> Vec<(&'static str, u32)> {
            vec![
                $(
                    (stringify!($name), $value),
                )*
            ]
        }
    };
}

impl ProdError {
    /// Create an error; intended to only be used from const contexts, as we
    /// don't want runtime panics if val is zero. Use `ProdError::try_from()`
    /// to decode a status code at runtime.
    const fn new_const(val: u32) -> Self {
        match NonZeroU32::new(val) {
            Some(val) => Self(val),
            None => panic!("ProdError cannot be 0"),
        }
    }

    define_error_constants![
        // Production flow errors. These are the codes a factory tool sees.
        (
            PROD_INVALID_PARAM,
            0x00F02001,
            "Production Error: invalid parameter"
        ),
        (
            PROD_ILLEGAL_ZERO_COUNT,
            0x00F02002,
            "Production Error: key material is all zeros or all ones"
        ),
        (
            PROD_ILLEGAL_LCS,
            0x00F02003,
            "Production Error: lifecycle state does not allow this flow"
        ),
        (
            PROD_ASSET_PKG_PARAM,
            0x00F02004,
            "Production Error: asset package header mismatch"
        ),
        (
            PROD_ASSET_PKG_VERIFY,
            0x00F02005,
            "Production Error: asset package authentication failed"
        ),
        (
            PROD_HAL_FATAL,
            0x00F02006,
            "Production Error: fatal hardware error"
        ),
        // AES engine driver.
        (
            DRIVER_AES_ILLEGAL_KEY_SIZE,
            0x00F03001,
            "Driver Error: AES illegal key size"
        ),
        (
            DRIVER_AES_ILLEGAL_OPERATION_MODE,
            0x00F03002,
            "Driver Error: AES illegal operation mode"
        ),
        (
            DRIVER_AES_ILLEGAL_DECRYPT_MODE,
            0x00F03003,
            "Driver Error: AES MAC modes only support encryption"
        ),
        (
            DRIVER_AES_ILLEGAL_DATA_SIZE,
            0x00F03004,
            "Driver Error: AES illegal data size"
        ),
        (
            DRIVER_AES_ILLEGAL_IV_SIZE,
            0x00F03005,
            "Driver Error: AES illegal IV size"
        ),
        (
            DRIVER_AES_ENGINE_BUSY,
            0x00F03006,
            "Driver Error: AES engine already claimed"
        ),
        (
            DRIVER_AES_INVALID_STATE,
            0x00F03007,
            "Driver Error: AES invalid state"
        ),
        // Key derivation and authenticated decryption built on the engine.
        (
            DRIVER_CMAC_KDF_INVALID_LABEL,
            0x00F04001,
            "Driver Error: CMAC KDF invalid label"
        ),
        (
            DRIVER_CMAC_KDF_INVALID_CONTEXT,
            0x00F04002,
            "Driver Error: CMAC KDF invalid context"
        ),
        (
            DRIVER_CCM_INVALID_SLICE,
            0x00F04003,
            "Driver Error: AES-CCM invalid slice"
        ),
        (
            DRIVER_CCM_TAG_MISMATCH,
            0x00F04004,
            "Driver Error: AES-CCM tag mismatch"
        ),
        // TRNG.
        (
            DRIVER_TRNG_REPETITION_FAILURE,
            0x00F05001,
            "Driver Error: TRNG produced repeated samples"
        ),
        (
            DRIVER_TRNG_INVALID_SIZE,
            0x00F05002,
            "Driver Error: TRNG request size not word aligned"
        ),
        // Wait helpers.
        (
            DRIVER_WAIT_TIMEOUT,
            0x00F06001,
            "Driver Error: hardware status poll timed out"
        ),
        // OTP.
        (
            DRIVER_OTP_INVALID_ADDRESS,
            0x00F07001,
            "Driver Error: OTP word address out of range"
        ),
        // Known answer tests.
        (
            KAT_AES_CIPHERTEXT_MISMATCH,
            0x00F08001,
            "KAT Error: AES ciphertext mismatch"
        ),
        (
            KAT_AES_PLAINTEXT_MISMATCH,
            0x00F08002,
            "KAT Error: AES plaintext mismatch"
        ),
        (
            KAT_AES_CMAC_MISMATCH,
            0x00F08003,
            "KAT Error: AES-CMAC mismatch"
        ),
        (
            KAT_DERIVATION_OUTPUT_MISMATCH,
            0x00F08004,
            "KAT Error: derivation function output mismatch"
        ),
    ];
}

impl From<ProdError> for core::num::NonZeroU32 {
    fn from(val: ProdError) -> Self {
        val.0
    }
}

impl From<ProdError> for u32 {
    fn from(val: ProdError) -> Self {
        core::num::NonZeroU32::from(val).get()
    }
}

impl TryFrom<u32> for ProdError {
    type Error = TryFromIntError;
    fn try_from(val: u32) -> Result<Self, TryFromIntError> {
        match NonZeroU32::try_from(val) {
            Ok(val) => Ok(ProdError(val)),
            Err(err) => Err(err),
        }
    }
}

pub type ProdResult<T> = Result<T, ProdError>;

/// Flattens a result into the status word returned across the C boundary.
pub fn status_code(result: ProdResult<()>) -> u32 {
    match result {
        Ok(()) => 0,
        Err(err) => err.into(),
    }
}
