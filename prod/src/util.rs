/*++

Licensed under the Apache-2.0 license.

File Name:

    util.rs

Abstract:

    File contains the OTP helpers shared by the CMPU and DMPU flows.

--*/

use crate::config::PROD_ASSET_SIZE;
use crate::workspace::{Region, Workspace};
use cc_prod_drivers::printer::HexWord;
use cc_prod_drivers::{cprintln, CcHal, CcMmio, ProdError, ProdResult, WaitStrategy};
use zeroize::Zeroizing;

/// Count the zero bits of `words`.
///
/// Key material that is all zeros or all ones is rejected with
/// `PROD_ILLEGAL_ZERO_COUNT`.
pub fn get_zero_count(words: &[u32]) -> ProdResult<u32> {
    if words.is_empty() {
        return Err(ProdError::PROD_INVALID_PARAM);
    }
    let zeros: u32 = words.iter().map(|w| w.count_zeros()).sum();
    if zeros == 0 || zeros == words.len() as u32 * u32::BITS {
        return Err(ProdError::PROD_ILLEGAL_ZERO_COUNT);
    }
    Ok(zeros)
}

/// Stage a resolved asset into `region` and return its zero count, or
/// `None` when the slot is not in use.
pub fn stage_asset(
    ws: &mut Workspace,
    region: Region,
    asset: Option<Zeroizing<[u8; PROD_ASSET_SIZE]>>,
) -> ProdResult<Option<u8>> {
    let Some(asset) = asset else {
        return Ok(None);
    };
    ws.store_le(region, &asset[..])?;
    let zeros = get_zero_count(ws.words(region)?)?;
    Ok(Some(zeros as u8))
}

/// Burn `values` into consecutive OTP words starting at `word`, reading each
/// word back after its burn.
///
/// A read-back mismatch or a hung programming cycle is `PROD_HAL_FATAL`; the
/// words burned so far stay burned.
pub fn otp_write_verify<M: CcMmio, W: WaitStrategy>(
    hal: &mut CcHal<M, W>,
    word: u32,
    values: &[u32],
) -> ProdResult<()> {
    let mut otp = hal.otp();
    for (i, expected) in values.iter().enumerate() {
        let addr = word + i as u32;
        otp.write_word(addr, *expected).map_err(|err| match err {
            ProdError::DRIVER_WAIT_TIMEOUT => ProdError::PROD_HAL_FATAL,
            other => other,
        })?;
        if otp.read_word(addr)? != *expected {
            cprintln!("[prod] OTP verify failed at word {}", HexWord(addr));
            return Err(ProdError::PROD_HAL_FATAL);
        }
    }
    Ok(())
}

/// Encode `version` as a thermometer code: the `version` least significant
/// bits of the counter are set.
pub fn thermometer_encode(version: u32, max_version: u32, out: &mut [u32]) -> ProdResult<()> {
    if version > max_version || max_version as usize > out.len() * 32 {
        return Err(ProdError::PROD_INVALID_PARAM);
    }
    let mut remaining = version;
    for word in out.iter_mut() {
        *word = match remaining {
            0 => 0,
            1..=31 => (1u32 << remaining) - 1,
            _ => u32::MAX,
        };
        remaining = remaining.saturating_sub(32);
    }
    Ok(())
}

/// Debug control lock to burn: the bits already in OTP plus the requested
/// bits this role is allowed to own.
pub fn merge_dcu_lock(current: &[u32; 4], request: &[u32; 4], allowed: &[u32; 4]) -> [u32; 4] {
    core::array::from_fn(|i| current[i] | (request[i] & allowed[i]))
}
