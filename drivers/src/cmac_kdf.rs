/*++

Licensed under the Apache-2.0 license.

File Name:

    cmac_kdf.rs

Abstract:

    Single-block KDF in counter mode (SP 800-108 Section 4.1) with AES-CMAC
    as the PRF. Produces one 128-bit key.

    Fixed input: 0x01 || label || 0x00 || context || 0x80, where the final
    byte is the output length in bits.

--*/

use crate::{AesCmacOp, AesKey, AES_BLOCK_SIZE_BYTES};
use arrayvec::ArrayVec;
use cc_prod_error::{ProdError, ProdResult};
use zeroize::Zeroizing;

pub const KDF_LABEL_MAX_SIZE: usize = 7;
pub const KDF_CONTEXT_MAX_SIZE: usize = 16;

const KDF_INPUT_MAX_SIZE: usize = 1 + KDF_LABEL_MAX_SIZE + 1 + KDF_CONTEXT_MAX_SIZE + 1;
const KDF_OUTPUT_BITS: u8 = 0x80;

/// Calculate CMAC-KDF
///
/// # Arguments
///
/// * `aes` - AES driver (implements `AesCmacOp`)
/// * `key` - Derivation key; `AesKey::Hw` for the RTL key
/// * `label` - 1 to 7 bytes
/// * `context` - Up to 16 bytes
///
/// # Returns
///
/// 128-bit derived key, wiped when dropped.
pub fn cmac_kdf<A: AesCmacOp>(
    aes: &mut A,
    key: AesKey,
    label: &[u8],
    context: &[u8],
) -> ProdResult<Zeroizing<[u8; AES_BLOCK_SIZE_BYTES]>> {
    if label.is_empty() || label.len() > KDF_LABEL_MAX_SIZE {
        return Err(ProdError::DRIVER_CMAC_KDF_INVALID_LABEL);
    }
    if context.len() > KDF_CONTEXT_MAX_SIZE {
        return Err(ProdError::DRIVER_CMAC_KDF_INVALID_CONTEXT);
    }

    let mut input = Zeroizing::new(ArrayVec::<u8, KDF_INPUT_MAX_SIZE>::new());
    // Counter, single round
    input
        .try_push(0x01)
        .map_err(|_| ProdError::DRIVER_CMAC_KDF_INVALID_LABEL)?;
    input
        .try_extend_from_slice(label)
        .map_err(|_| ProdError::DRIVER_CMAC_KDF_INVALID_LABEL)?;
    // separator
    input
        .try_push(0x00)
        .map_err(|_| ProdError::DRIVER_CMAC_KDF_INVALID_CONTEXT)?;
    input
        .try_extend_from_slice(context)
        .map_err(|_| ProdError::DRIVER_CMAC_KDF_INVALID_CONTEXT)?;
    input
        .try_push(KDF_OUTPUT_BITS)
        .map_err(|_| ProdError::DRIVER_CMAC_KDF_INVALID_CONTEXT)?;

    Ok(Zeroizing::new(aes.cmac(key, &input)?))
}
