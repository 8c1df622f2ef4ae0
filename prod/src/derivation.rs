/*++

Licensed under the Apache-2.0 license.

File Name:

    derivation.rs

Abstract:

    CTR_DRBG (NIST SP 800-90A, AES-256, derivation function in use) reduced
    to what HUK generation needs: Block_Cipher_df, Update, Instantiate and
    Generate. No reseeding and no personalization string.

--*/

use arrayvec::ArrayVec;
use cc_prod_drivers::{
    AesContext, AesDirection, AesEngine, AesKey, AesMode, CcMmio, ProdError, ProdResult,
    WaitStrategy, AES_BLOCK_SIZE_BYTES,
};
use zeroize::{Zeroize, ZeroizeOnDrop, Zeroizing};

pub const DRBG_KEY_SIZE: usize = 32;
pub const DRBG_V_SIZE: usize = AES_BLOCK_SIZE_BYTES;
/// seedlen: Key followed by V.
pub const DF_SEED_SIZE: usize = DRBG_KEY_SIZE + DRBG_V_SIZE;
/// Largest entropy input accepted by the derivation function.
pub const DF_INPUT_MAX_SIZE: usize = 256;

/// L and N, both 32-bit big-endian.
const DF_HEADER_SIZE: usize = 8;
const DF_BUFFER_SIZE: usize = DF_HEADER_SIZE + DF_INPUT_MAX_SIZE + AES_BLOCK_SIZE_BYTES;

/// Block_Cipher_df key: 00 01 .. 1F.
const DF_KEY: [u8; DRBG_KEY_SIZE] = [
    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a, 0x0b, 0x0c, 0x0d, 0x0e, 0x0f,
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1a, 0x1b, 0x1c, 0x1d, 0x1e, 0x1f,
];

/// AES-256(DF_KEY, i || 0^96) for i = 0, 1, 2: the BCC chaining value after
/// the IV block, so each BCC pass only has to run over S.
const DF_INITIAL_MACS: [[u8; AES_BLOCK_SIZE_BYTES]; 3] = [
    [
        0xf2, 0x90, 0x00, 0xb6, 0x2a, 0x49, 0x9f, 0xd0, 0xa9, 0xf3, 0x9a, 0x6a, 0xdd, 0x2e, 0x77,
        0x80,
    ],
    [
        0x9d, 0xba, 0x41, 0xa7, 0x77, 0xf3, 0xb4, 0x6a, 0x37, 0xb7, 0xaa, 0xae, 0x49, 0xd6, 0xdf,
        0x8d,
    ],
    [
        0x2f, 0x7a, 0x3c, 0x60, 0x07, 0x08, 0xd1, 0x24, 0xac, 0xd3, 0xc5, 0xde, 0x3b, 0x65, 0x84,
        0x47,
    ],
];

/// Working state (Key, V). Wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct DrbgState {
    key: [u8; DRBG_KEY_SIZE],
    v: [u8; DRBG_V_SIZE],
}

impl Default for DrbgState {
    fn default() -> Self {
        Self {
            key: [0; DRBG_KEY_SIZE],
            v: [0; DRBG_V_SIZE],
        }
    }
}

impl DrbgState {
    pub fn key(&self) -> &[u8; DRBG_KEY_SIZE] {
        &self.key
    }

    pub fn v(&self) -> &[u8; DRBG_V_SIZE] {
        &self.v
    }
}

fn increment(counter: &[u8; AES_BLOCK_SIZE_BYTES]) -> [u8; AES_BLOCK_SIZE_BYTES] {
    u128::from_be_bytes(*counter).wrapping_add(1).to_be_bytes()
}

/// Build S = L || N || input || 0x80 || 0-pad, padded to a whole block.
fn df_input(input: &[u8]) -> ProdResult<Zeroizing<ArrayVec<u8, DF_BUFFER_SIZE>>> {
    if input.is_empty() || input.len() > DF_INPUT_MAX_SIZE || input.len() % 4 != 0 {
        return Err(ProdError::PROD_INVALID_PARAM);
    }
    let mut s = Zeroizing::new(ArrayVec::<u8, DF_BUFFER_SIZE>::new());
    s.try_extend_from_slice(&(input.len() as u32).to_be_bytes())
        .map_err(|_| ProdError::PROD_INVALID_PARAM)?;
    s.try_extend_from_slice(&(DF_SEED_SIZE as u32).to_be_bytes())
        .map_err(|_| ProdError::PROD_INVALID_PARAM)?;
    s.try_extend_from_slice(input)
        .map_err(|_| ProdError::PROD_INVALID_PARAM)?;
    s.try_push(0x80).map_err(|_| ProdError::PROD_INVALID_PARAM)?;
    while s.len() % AES_BLOCK_SIZE_BYTES != 0 {
        s.try_push(0x00).map_err(|_| ProdError::PROD_INVALID_PARAM)?;
    }
    Ok(s)
}

/// Block_Cipher_df with a 48-byte output.
///
/// # Arguments
///
/// * `aes` - Claimed AES engine
/// * `input` - Entropy input, a non-zero multiple of 4 bytes up to
///   `DF_INPUT_MAX_SIZE`
pub fn block_cipher_df<M: CcMmio, W: WaitStrategy>(
    aes: &mut AesEngine<M, W>,
    input: &[u8],
) -> ProdResult<Zeroizing<[u8; DF_SEED_SIZE]>> {
    let s = df_input(input)?;

    let mut temp = Zeroizing::new([0u8; DF_SEED_SIZE]);
    for (chunk, initial_mac) in temp
        .chunks_exact_mut(AES_BLOCK_SIZE_BYTES)
        .zip(DF_INITIAL_MACS.iter())
    {
        let mut ctx = AesContext::new(
            AesMode::CbcMac,
            AesDirection::Encrypt,
            (&DF_KEY).into(),
            Some(&initial_mac[..]),
        )?;
        chunk.copy_from_slice(&aes.mac(&mut ctx, &s)?);
    }

    // X = E(K, X) three times: CBC over zeros with IV = X.
    let (key, x) = temp.split_at(DRBG_KEY_SIZE);
    let mut ctx = AesContext::new(
        AesMode::Cbc,
        AesDirection::Encrypt,
        AesKey::Array(key),
        Some(x),
    )?;
    let mut output = Zeroizing::new([0u8; DF_SEED_SIZE]);
    aes.crypt(&mut ctx, &[0u8; DF_SEED_SIZE], &mut output[..])?;
    Ok(output)
}

/// CTR_DRBG_Update: (Key, V) = leftmost 48 bytes of CTR(Key, V + 1) xor
/// `provided_data`.
pub fn drbg_update<M: CcMmio, W: WaitStrategy>(
    aes: &mut AesEngine<M, W>,
    provided_data: &[u8; DF_SEED_SIZE],
    state: &mut DrbgState,
) -> ProdResult<()> {
    // The engine uses the loaded counter for the first block; that block is
    // run over zeros and dropped so the kept output starts at V + 1.
    let mut input = Zeroizing::new([0u8; AES_BLOCK_SIZE_BYTES + DF_SEED_SIZE]);
    input[AES_BLOCK_SIZE_BYTES..].copy_from_slice(provided_data);
    let mut output = Zeroizing::new([0u8; AES_BLOCK_SIZE_BYTES + DF_SEED_SIZE]);

    let mut ctx = AesContext::new(
        AesMode::Ctr,
        AesDirection::Encrypt,
        (&state.key).into(),
        Some(&state.v[..]),
    )?;
    aes.crypt(&mut ctx, &input[..], &mut output[..])?;

    let seed = &output[AES_BLOCK_SIZE_BYTES..];
    state.key.copy_from_slice(&seed[..DRBG_KEY_SIZE]);
    state.v.copy_from_slice(&seed[DRBG_KEY_SIZE..]);
    Ok(())
}

/// CTR_DRBG_Instantiate from `entropy`.
pub fn instantiate<M: CcMmio, W: WaitStrategy>(
    aes: &mut AesEngine<M, W>,
    entropy: &[u8],
) -> ProdResult<DrbgState> {
    let seed = block_cipher_df(aes, entropy)?;
    let mut state = DrbgState::default();
    drbg_update(aes, &seed, &mut state)?;
    Ok(state)
}

/// CTR_DRBG_Generate without additional input. `out.len()` must be a
/// non-zero multiple of 16. On return V is the last counter used.
pub fn generate<M: CcMmio, W: WaitStrategy>(
    aes: &mut AesEngine<M, W>,
    state: &mut DrbgState,
    out: &mut [u8],
) -> ProdResult<()> {
    if out.is_empty() || out.len() % AES_BLOCK_SIZE_BYTES != 0 {
        return Err(ProdError::PROD_INVALID_PARAM);
    }
    out.fill(0);

    let first = increment(&state.v);
    let mut ctx = AesContext::new(
        AesMode::Ctr,
        AesDirection::Encrypt,
        (&state.key).into(),
        Some(&first[..]),
    )?;
    let mut block = Zeroizing::new([0u8; AES_BLOCK_SIZE_BYTES]);
    for chunk in out.chunks_exact_mut(AES_BLOCK_SIZE_BYTES) {
        aes.crypt(&mut ctx, &[0u8; AES_BLOCK_SIZE_BYTES], &mut block[..])?;
        chunk.copy_from_slice(&block[..]);
    }

    let next = ctx.iv();
    state.v = u128::from_be_bytes(next).wrapping_sub(1).to_be_bytes();
    Ok(())
}
