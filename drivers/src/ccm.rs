/*++

Licensed under the Apache-2.0 license.

File Name:

    ccm.rs

Abstract:

    AES-CCM authenticated decryption (SP 800-38C) on top of the AES engine.
    Fixed parameters: 12-byte nonce, 16-byte tag, 3-byte length field.

--*/

use crate::{
    AesContext, AesDirection, AesEngine, AesMode, CcMmio, ProdError, ProdResult, WaitStrategy,
    AES_BLOCK_SIZE_BYTES,
};
use zeroize::{Zeroize, Zeroizing};

pub const CCM_NONCE_SIZE: usize = 12;
pub const CCM_TAG_SIZE: usize = 16;

/// Width of the message length field (q in SP 800-38C).
const CCM_LENGTH_SIZE: usize = 15 - CCM_NONCE_SIZE;
const CCM_MAX_PAYLOAD: usize = 1 << (8 * CCM_LENGTH_SIZE);
/// Largest AAD encodable with the two-byte length prefix.
const CCM_MAX_AAD: usize = 0xFF00;

const CCM_B0_FLAGS: u8 =
    0x40 | ((((CCM_TAG_SIZE - 2) / 2) as u8) << 3) | (CCM_LENGTH_SIZE as u8 - 1);
const CCM_CTR_FLAGS: u8 = CCM_LENGTH_SIZE as u8 - 1;

/// CBC-MAC computed by streaming CBC encryption under a zero IV.
struct CbcMac {
    ctx: AesContext,
    pending: Zeroizing<[u8; AES_BLOCK_SIZE_BYTES]>,
    pending_len: usize,
}

impl CbcMac {
    fn new(key: &[u8; 16]) -> ProdResult<Self> {
        Ok(Self {
            ctx: AesContext::new(AesMode::Cbc, AesDirection::Encrypt, key.into(), None)?,
            pending: Zeroizing::new([0u8; AES_BLOCK_SIZE_BYTES]),
            pending_len: 0,
        })
    }

    fn update<M: CcMmio, W: WaitStrategy>(
        &mut self,
        aes: &mut AesEngine<M, W>,
        mut data: &[u8],
    ) -> ProdResult<()> {
        while !data.is_empty() {
            let take = (AES_BLOCK_SIZE_BYTES - self.pending_len).min(data.len());
            self.pending[self.pending_len..self.pending_len + take].copy_from_slice(&data[..take]);
            self.pending_len += take;
            data = &data[take..];
            if self.pending_len == AES_BLOCK_SIZE_BYTES {
                self.flush(aes)?;
            }
        }
        Ok(())
    }

    /// Zero-pad and absorb a partial block, if any.
    fn flush<M: CcMmio, W: WaitStrategy>(&mut self, aes: &mut AesEngine<M, W>) -> ProdResult<()> {
        if self.pending_len == 0 {
            return Ok(());
        }
        self.pending[self.pending_len..].fill(0);
        let mut scratch = Zeroizing::new([0u8; AES_BLOCK_SIZE_BYTES]);
        aes.crypt(&mut self.ctx, &self.pending[..], &mut scratch[..])?;
        self.pending_len = 0;
        Ok(())
    }

    fn finalize<M: CcMmio, W: WaitStrategy>(
        mut self,
        aes: &mut AesEngine<M, W>,
    ) -> ProdResult<Zeroizing<[u8; AES_BLOCK_SIZE_BYTES]>> {
        self.flush(aes)?;
        Ok(Zeroizing::new(self.ctx.iv()))
    }
}

fn counter_block(nonce: &[u8; CCM_NONCE_SIZE], counter: u32) -> [u8; AES_BLOCK_SIZE_BYTES] {
    let mut block = [0u8; AES_BLOCK_SIZE_BYTES];
    block[0] = CCM_CTR_FLAGS;
    block[1..1 + CCM_NONCE_SIZE].copy_from_slice(nonce);
    block[1 + CCM_NONCE_SIZE..].copy_from_slice(&counter.to_be_bytes()[4 - CCM_LENGTH_SIZE..]);
    block
}

/// Decrypt and authenticate an AES-CCM message.
///
/// # Arguments
///
/// * `aes` - Claimed AES engine
/// * `key` - 128-bit key
/// * `nonce` - 12-byte nonce
/// * `aad` - Additional authenticated data
/// * `ciphertext` - Encrypted payload
/// * `tag` - Expected 16-byte tag
/// * `plaintext` - Destination, same length as `ciphertext`. Wiped if the tag
///   does not verify.
#[allow(clippy::too_many_arguments)]
pub fn aes_ccm_decrypt<M: CcMmio, W: WaitStrategy>(
    aes: &mut AesEngine<M, W>,
    key: &[u8; 16],
    nonce: &[u8; CCM_NONCE_SIZE],
    aad: &[u8],
    ciphertext: &[u8],
    tag: &[u8; CCM_TAG_SIZE],
    plaintext: &mut [u8],
) -> ProdResult<()> {
    if plaintext.len() != ciphertext.len()
        || ciphertext.len() >= CCM_MAX_PAYLOAD
        || aad.len() >= CCM_MAX_AAD
    {
        return Err(ProdError::DRIVER_CCM_INVALID_SLICE);
    }

    if !ciphertext.is_empty() {
        let a1 = counter_block(nonce, 1);
        let mut ctr = AesContext::new(
            AesMode::Ctr,
            AesDirection::Encrypt,
            key.into(),
            Some(&a1[..]),
        )?;
        aes.crypt(&mut ctr, ciphertext, plaintext)?;
    }

    let result = verify_tag(aes, key, nonce, aad, plaintext, tag);
    if result.is_err() {
        plaintext.zeroize();
    }
    result
}

fn verify_tag<M: CcMmio, W: WaitStrategy>(
    aes: &mut AesEngine<M, W>,
    key: &[u8; 16],
    nonce: &[u8; CCM_NONCE_SIZE],
    aad: &[u8],
    plaintext: &[u8],
    tag: &[u8; CCM_TAG_SIZE],
) -> ProdResult<()> {
    let mut b0 = [0u8; AES_BLOCK_SIZE_BYTES];
    b0[0] = if aad.is_empty() {
        CCM_B0_FLAGS & !0x40
    } else {
        CCM_B0_FLAGS
    };
    b0[1..1 + CCM_NONCE_SIZE].copy_from_slice(nonce);
    b0[1 + CCM_NONCE_SIZE..]
        .copy_from_slice(&(plaintext.len() as u32).to_be_bytes()[4 - CCM_LENGTH_SIZE..]);

    let mut mac = CbcMac::new(key)?;
    mac.update(aes, &b0)?;
    if !aad.is_empty() {
        mac.update(aes, &(aad.len() as u16).to_be_bytes())?;
        mac.update(aes, aad)?;
        mac.flush(aes)?;
    }
    mac.update(aes, plaintext)?;
    let mut computed = mac.finalize(aes)?;

    // S0 = E(K, A0)
    let a0 = counter_block(nonce, 0);
    let mut ecb = AesContext::new(AesMode::Ecb, AesDirection::Encrypt, key.into(), None)?;
    let mut s0 = Zeroizing::new([0u8; AES_BLOCK_SIZE_BYTES]);
    aes.crypt(&mut ecb, &a0, &mut s0[..])?;

    for (c, s) in computed.iter_mut().zip(s0.iter()) {
        *c ^= s;
    }
    if !constant_time_eq::constant_time_eq(&computed[..], tag) {
        return Err(ProdError::DRIVER_CCM_TAG_MISMATCH);
    }
    Ok(())
}
