/*++

Licensed under the Apache-2.0 license.

File Name:

    aes.rs

Abstract:

    Driver for the AES engine.

    Notes about how this hardware is driven:

    * The engine is claimed through `CcHal::aes()`; the claim holds the
      crypto mutex and enables the engine clocks. Dropping the handle
      clears the key/IV registers, gates the clocks and releases the
      mutex, on success and error paths alike.
    * Key, IV and data registers take bytes in little-endian word order.
    * MAC modes (CBC-MAC, CMAC) run over the whole message in one call; the
      engine locates the final block from AES_REMAINING_BYTES.

--*/

use crate::{CcHal, CcMmio, ProdError, ProdResult, WaitStrategy};
use cc_prod_registers::aes::{self as regs, key_size, mode, AesControl};
use cc_prod_registers::host;
use zeroize::{Zeroize, ZeroizeOnDrop};

pub const AES_BLOCK_SIZE_BYTES: usize = 16;
pub const AES_IV_SIZE_BYTES: usize = 16;
const AES_BLOCK_SIZE_WORDS: usize = AES_BLOCK_SIZE_BYTES / 4;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AesMode {
    Ecb,
    Cbc,
    Ctr,
    CbcMac,
    Cmac,
    Ofb,
}

impl AesMode {
    pub fn is_mac(self) -> bool {
        matches!(self, Self::CbcMac | Self::Cmac)
    }

    /// Modes that only accept whole blocks.
    fn is_block_aligned(self) -> bool {
        matches!(self, Self::Ecb | Self::Cbc | Self::CbcMac)
    }

    /// Modes that XOR the data with a keystream.
    fn is_stream(self) -> bool {
        matches!(self, Self::Ctr | Self::Ofb)
    }

    fn reg_value(self) -> u32 {
        match self {
            Self::Ecb => mode::ECB,
            Self::Cbc => mode::CBC,
            Self::Ctr => mode::CTR,
            Self::CbcMac => mode::CBC_MAC,
            Self::Cmac => mode::CMAC,
            Self::Ofb => mode::OFB,
        }
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum AesDirection {
    Encrypt,
    Decrypt,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum AesKeySize {
    _128,
    _192,
    _256,
}

impl AesKeySize {
    fn from_len(len: usize) -> ProdResult<Self> {
        match len {
            16 => Ok(Self::_128),
            24 => Ok(Self::_192),
            32 => Ok(Self::_256),
            _ => Err(ProdError::DRIVER_AES_ILLEGAL_KEY_SIZE),
        }
    }

    fn words(self) -> usize {
        match self {
            Self::_128 => 4,
            Self::_192 => 6,
            Self::_256 => 8,
        }
    }

    fn reg_value(self) -> u32 {
        match self {
            Self::_128 => key_size::KEY_128,
            Self::_192 => key_size::KEY_192,
            Self::_256 => key_size::KEY_256,
        }
    }
}

/// Keys that live inside the hardware and are never visible to software.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HwKey {
    /// 128-bit RTL key.
    Rtl,
}

/// AES Key
#[derive(Debug, Copy, Clone)]
pub enum AesKey<'a> {
    /// Software supplied key, 16, 24 or 32 bytes.
    Array(&'a [u8]),

    /// Hardware resident key.
    Hw(HwKey),
}

impl<'a> From<&'a [u8; 16]> for AesKey<'a> {
    fn from(value: &'a [u8; 16]) -> Self {
        Self::Array(value)
    }
}

impl<'a> From<&'a [u8; 32]> for AesKey<'a> {
    fn from(value: &'a [u8; 32]) -> Self {
        Self::Array(value)
    }
}

/// State of one AES operation.
///
/// Created per operation and dropped at the end of it. Key and chaining
/// value are wiped on drop.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct AesContext {
    iv: [u32; AES_BLOCK_SIZE_WORDS],
    key: [u32; regs::KEY_WORDS],
    /// Keystream of the last partial CTR/OFB block. Only the trailing
    /// `keystream_left` bytes are unused.
    keystream: [u8; AES_BLOCK_SIZE_BYTES],
    keystream_left: usize,
    #[zeroize(skip)]
    key_size: AesKeySize,
    #[zeroize(skip)]
    mode: AesMode,
    #[zeroize(skip)]
    direction: AesDirection,
    #[zeroize(skip)]
    hw_key: Option<HwKey>,
    #[zeroize(skip)]
    mac_done: bool,
}

impl AesContext {
    /// Validate and capture the parameters of an operation. Does not touch
    /// the hardware.
    ///
    /// # Arguments
    ///
    /// * `mode` - Cipher mode
    /// * `direction` - Encrypt or decrypt. MAC modes only encrypt.
    /// * `key` - Software key (16, 24 or 32 bytes) or a hardware key
    /// * `iv` - Initial chaining value or counter. Must be 16 bytes when
    ///   present; defaults to zero.
    pub fn new(
        mode: AesMode,
        direction: AesDirection,
        key: AesKey,
        iv: Option<&[u8]>,
    ) -> ProdResult<Self> {
        if mode.is_mac() && direction == AesDirection::Decrypt {
            return Err(ProdError::DRIVER_AES_ILLEGAL_DECRYPT_MODE);
        }

        let mut ctx = Self {
            iv: [0u32; AES_BLOCK_SIZE_WORDS],
            key: [0u32; regs::KEY_WORDS],
            keystream: [0u8; AES_BLOCK_SIZE_BYTES],
            keystream_left: 0,
            key_size: AesKeySize::_128,
            mode,
            direction,
            hw_key: None,
            mac_done: false,
        };

        match key {
            AesKey::Array(bytes) => {
                ctx.key_size = AesKeySize::from_len(bytes.len())?;
                for (word, chunk) in ctx.key.iter_mut().zip(bytes.chunks_exact(4)) {
                    *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                }
            }
            AesKey::Hw(hw_key) => ctx.hw_key = Some(hw_key),
        }

        if let Some(iv) = iv {
            if iv.len() != AES_IV_SIZE_BYTES {
                return Err(ProdError::DRIVER_AES_ILLEGAL_IV_SIZE);
            }
            for (word, chunk) in ctx.iv.iter_mut().zip(iv.chunks_exact(4)) {
                *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
            }
        }

        Ok(ctx)
    }

    /// Current chaining value, counter or MAC.
    pub fn iv(&self) -> [u8; AES_IV_SIZE_BYTES] {
        let mut result = [0u8; AES_IV_SIZE_BYTES];
        for (chunk, word) in result.chunks_exact_mut(4).zip(self.iv.iter()) {
            chunk.copy_from_slice(&word.to_le_bytes());
        }
        result
    }

    /// XOR the head of `input` with keystream left over from the previous
    /// call. Returns the number of bytes consumed.
    fn apply_keystream(&mut self, input: &[u8], output: &mut [u8]) -> usize {
        let take = self.keystream_left.min(input.len());
        let start = AES_BLOCK_SIZE_BYTES - self.keystream_left;
        for ((out, byte), key) in output
            .iter_mut()
            .zip(input)
            .zip(&self.keystream[start..start + take])
        {
            *out = byte ^ key;
        }
        self.keystream_left -= take;
        take
    }

    fn control(&self) -> AesControl {
        let mut ctrl = AesControl::default();
        ctrl.set_dec_key0(self.direction == AesDirection::Decrypt);
        ctrl.set_mode(self.mode.reg_value());
        ctrl.set_nk_key0(self.key_size.reg_value());
        ctrl
    }

    fn iv_reg(&self) -> u32 {
        if self.mode == AesMode::Ctr {
            regs::AES_CTR_0
        } else {
            regs::AES_IV_0
        }
    }
}

/// Operations the key derivation code needs from the engine.
pub trait AesCmacOp {
    /// Calculate the AES-CMAC of `data` under `key`.
    fn cmac(&mut self, key: AesKey, data: &[u8]) -> ProdResult<[u8; AES_BLOCK_SIZE_BYTES]>;
}

/// Claimed AES engine.
pub struct AesEngine<'a, M: CcMmio, W: WaitStrategy> {
    hal: &'a mut CcHal<M, W>,
}

impl<'a, M: CcMmio, W: WaitStrategy> AesEngine<'a, M, W> {
    pub(crate) fn claim(hal: &'a mut CcHal<M, W>) -> ProdResult<Self> {
        hal.lock_aes()?;
        // From here on `Drop` undoes the claim.
        let mut engine = Self { hal };
        engine.hal.write(host::AES_CLK_ENABLE, 1);
        engine.hal.write(host::DMA_CLK_ENABLE, 1);
        engine.hal.write(host::CRYPTO_CTL, host::crypto_ctl::AES);
        engine.wait_for_idle()?;
        Ok(engine)
    }

    fn wait_for_idle(&mut self) -> ProdResult<()> {
        self.hal.wait_until(|mmio| mmio.read(regs::AES_BUSY) == 0)
    }

    /// Program mode, key and chaining value for an operation over
    /// `data_len` bytes.
    fn load_context(&mut self, ctx: &AesContext, data_len: usize) -> ProdResult<()> {
        self.wait_for_idle()?;

        self.hal.write(regs::AES_CONTROL, ctx.control().0);
        match ctx.hw_key {
            Some(HwKey::Rtl) => self.hal.write(regs::AES_SK, 1),
            None => {
                self.hal.write(regs::AES_SK, 0);
                for (i, word) in ctx.key[..ctx.key_size.words()].iter().enumerate() {
                    self.hal.write(regs::AES_KEY_0 + (i as u32) * 4, *word);
                }
            }
        }

        if ctx.mode != AesMode::Ecb {
            let iv_reg = ctx.iv_reg();
            for (i, word) in ctx.iv.iter().enumerate() {
                self.hal.write(iv_reg + (i as u32) * 4, *word);
            }
        }

        self.hal.write(regs::AES_REMAINING_BYTES, data_len as u32);
        if ctx.mode == AesMode::Cmac {
            self.hal.write(regs::AES_CMAC_INIT, 1);
        }
        Ok(())
    }

    /// Read the chaining value back into the context so that a following
    /// call continues where this one stopped.
    fn store_context(&mut self, ctx: &mut AesContext) -> ProdResult<()> {
        if ctx.mode == AesMode::Ecb {
            return Ok(());
        }
        self.wait_for_idle()?;
        let iv_reg = ctx.iv_reg();
        for (i, word) in ctx.iv.iter_mut().enumerate() {
            *word = self.hal.read(iv_reg + (i as u32) * 4);
        }
        Ok(())
    }

    /// Run `input` through the engine.
    ///
    /// # Arguments
    ///
    /// * `ctx` - Operation context from `AesContext::new`
    /// * `input` - Data. ECB, CBC and CBC-MAC need whole blocks; CMAC takes
    ///   any length including zero; CTR and OFB take any non-zero length and
    ///   the next call continues mid-block where this one stopped.
    /// * `output` - Destination for ECB/CBC/CTR/OFB, at least `input.len()`
    ///   bytes. Ignored for MAC modes.
    pub fn process(
        &mut self,
        ctx: &mut AesContext,
        input: &[u8],
        mut output: Option<&mut [u8]>,
    ) -> ProdResult<()> {
        if ctx.mode.is_mac() {
            if ctx.mac_done {
                return Err(ProdError::DRIVER_AES_INVALID_STATE);
            }
        } else {
            match output.as_deref() {
                Some(out) if out.len() >= input.len() => {}
                _ => return Err(ProdError::DRIVER_AES_ILLEGAL_DATA_SIZE),
            }
        }
        if input.is_empty() && ctx.mode != AesMode::Cmac {
            return Err(ProdError::DRIVER_AES_ILLEGAL_DATA_SIZE);
        }
        if ctx.mode.is_block_aligned() && input.len() % AES_BLOCK_SIZE_BYTES != 0 {
            return Err(ProdError::DRIVER_AES_ILLEGAL_DATA_SIZE);
        }

        let mut consumed = 0;
        if ctx.mode.is_stream() {
            if let Some(out) = output.as_deref_mut() {
                consumed = ctx.apply_keystream(input, out);
            }
            if consumed == input.len() {
                return Ok(());
            }
        }
        let input = &input[consumed..];

        self.load_context(ctx, input.len())?;

        if input.is_empty() {
            self.hal.write(regs::AES_CMAC_SIZE0_KICK, 1);
            self.wait_for_idle()?;
        }

        for (i, chunk) in input.chunks(AES_BLOCK_SIZE_BYTES).enumerate() {
            let mut block = [0u8; AES_BLOCK_SIZE_BYTES];
            block[..chunk.len()].copy_from_slice(chunk);
            for (w, bytes) in block.chunks_exact(4).enumerate() {
                let word = u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]);
                self.hal.write(regs::DIN_BUFFER + (w as u32) * 4, word);
            }
            block.zeroize();
            self.wait_for_idle()?;

            if let Some(out) = output.as_deref_mut() {
                if ctx.mode.is_mac() {
                    continue;
                }
                for w in 0..AES_BLOCK_SIZE_WORDS {
                    let word = self.hal.read(regs::DOUT_BUFFER + (w as u32) * 4);
                    block[w * 4..w * 4 + 4].copy_from_slice(&word.to_le_bytes());
                }
                let start = consumed + i * AES_BLOCK_SIZE_BYTES;
                out[start..start + chunk.len()].copy_from_slice(&block[..chunk.len()]);
                if ctx.mode.is_stream() && chunk.len() < AES_BLOCK_SIZE_BYTES {
                    // The padding was zero, so the tail of the output block is
                    // raw keystream.
                    ctx.keystream = block;
                    ctx.keystream_left = AES_BLOCK_SIZE_BYTES - chunk.len();
                }
                block.zeroize();
            }
        }

        self.store_context(ctx)?;
        if ctx.mode.is_mac() {
            ctx.mac_done = true;
        }
        Ok(())
    }

    /// Export the tag of a CBC-MAC/CMAC operation from the IV registers.
    pub fn finish(&mut self, ctx: &mut AesContext) -> ProdResult<[u8; AES_BLOCK_SIZE_BYTES]> {
        if !ctx.mode.is_mac() || !ctx.mac_done {
            return Err(ProdError::DRIVER_AES_INVALID_STATE);
        }
        self.store_context(ctx)?;
        Ok(ctx.iv())
    }

    /// Encrypt or decrypt `input` into `output` in one call.
    pub fn crypt(
        &mut self,
        ctx: &mut AesContext,
        input: &[u8],
        output: &mut [u8],
    ) -> ProdResult<()> {
        if ctx.mode.is_mac() {
            return Err(ProdError::DRIVER_AES_ILLEGAL_OPERATION_MODE);
        }
        self.process(ctx, input, Some(output))
    }

    /// Compute the MAC of `input` in one call.
    pub fn mac(
        &mut self,
        ctx: &mut AesContext,
        input: &[u8],
    ) -> ProdResult<[u8; AES_BLOCK_SIZE_BYTES]> {
        if !ctx.mode.is_mac() {
            return Err(ProdError::DRIVER_AES_ILLEGAL_OPERATION_MODE);
        }
        self.process(ctx, input, None)?;
        self.finish(ctx)
    }

    /// Clear key material from the engine and gate its clocks. Best effort:
    /// runs on every exit path through `Drop`.
    fn terminate(&mut self) {
        for i in 0..regs::KEY_WORDS as u32 {
            self.hal.write(regs::AES_KEY_0 + i * 4, 0);
        }
        for i in 0..regs::BLOCK_WORDS as u32 {
            self.hal.write(regs::AES_IV_0 + i * 4, 0);
            self.hal.write(regs::AES_CTR_0 + i * 4, 0);
        }
        self.hal.write(regs::AES_SK, 0);
        self.hal.write(regs::AES_REMAINING_BYTES, 0);
        self.hal.write(host::CRYPTO_CTL, host::crypto_ctl::BYPASS);
        self.hal.write(host::DMA_CLK_ENABLE, 0);
        self.hal.write(host::AES_CLK_ENABLE, 0);
    }
}

impl<M: CcMmio, W: WaitStrategy> AesCmacOp for AesEngine<'_, M, W> {
    fn cmac(&mut self, key: AesKey, data: &[u8]) -> ProdResult<[u8; AES_BLOCK_SIZE_BYTES]> {
        let mut ctx = AesContext::new(AesMode::Cmac, AesDirection::Encrypt, key, None)?;
        self.mac(&mut ctx, data)
    }
}

impl<M: CcMmio, W: WaitStrategy> Drop for AesEngine<'_, M, W> {
    fn drop(&mut self) {
        self.terminate();
        self.hal.unlock_aes();
    }
}
