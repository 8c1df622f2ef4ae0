/*++

Licensed under the Apache-2.0 license.

File Name:

    crypto_cell.rs

Abstract:

    File contains the root register window of the emulated CryptoCell.
    Dispatches each access to the peripheral that owns the offset and
    keeps counters that tests inspect.

--*/

use crate::{Aes, Otp, SocRegisters, Trng};
use cc_prod_registers::host::DCU_WORDS;
use cc_prod_registers::mmio::CcMmio;
use cc_prod_registers::nvm::lcs;
use cc_prod_registers::otp;

/// Default RTL key: bytes 0x10..=0x1F.
pub const DEFAULT_RTL_KEY: [u8; 16] = [
    0x10, 0x11, 0x12, 0x13, 0x14, 0x15, 0x16, 0x17, 0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D, 0x1E,
    0x1F,
];

pub const DEFAULT_ICV_DCU_MASK: [u32; DCU_WORDS] = [0x0000_00FF, 0x0000_00FF, 0, 0];

#[derive(Clone, Debug)]
pub struct CryptoCellArgs {
    /// Lifecycle state reported until the next `power_cycle`.
    pub lcs: u32,
    pub rtl_key: [u8; 16],
    pub icv_dcu_mask: [u32; DCU_WORDS],
    /// Raw TRNG output, repeated when exhausted. `None` draws from a PRNG
    /// seeded with `seed`.
    pub entropy: Option<Vec<u8>>,
    pub seed: u64,
    /// Initial OTP image, word 0 first.
    pub otp: Option<Vec<u32>>,
    /// Status polls that report "busy" after each OTP word burn.
    pub otp_burn_latency: u32,
}

impl Default for CryptoCellArgs {
    fn default() -> Self {
        Self {
            lcs: lcs::CHIP_MANUFACTURE,
            rtl_key: DEFAULT_RTL_KEY,
            icv_dcu_mask: DEFAULT_ICV_DCU_MASK,
            entropy: None,
            seed: 0,
            otp: None,
            otp_burn_latency: 0,
        }
    }
}

pub struct CryptoCell {
    aes: Aes,
    otp: Otp,
    soc: SocRegisters,
    trng: Trng,
    access_count: u64,
}

impl Default for CryptoCell {
    fn default() -> Self {
        Self::new(CryptoCellArgs::default())
    }
}

impl CryptoCell {
    pub fn new(args: CryptoCellArgs) -> Self {
        Self {
            aes: Aes::new(args.rtl_key),
            otp: Otp::new(args.otp.as_deref(), args.otp_burn_latency),
            soc: SocRegisters::new(args.lcs, args.icv_dcu_mask),
            trng: Trng::new(args.entropy, args.seed),
            access_count: 0,
        }
    }

    /// Register reads and writes since creation.
    pub fn access_count(&self) -> u64 {
        self.access_count
    }

    pub fn otp_word(&self, word: u32) -> u32 {
        self.otp.word(word)
    }

    pub fn otp_words(&self, word: u32, len: usize) -> Vec<u32> {
        (word..word + len as u32).map(|w| self.otp.word(w)).collect()
    }

    pub fn otp_image(&self) -> Vec<u32> {
        self.otp.words().to_vec()
    }

    pub fn otp_write_count(&self) -> u32 {
        self.otp.write_count()
    }

    /// Force bits of an OTP word to read back as zero after every burn.
    pub fn inject_stuck_at_zero(&mut self, word: u32, mask: u32) {
        self.otp.inject_stuck_at_zero(word, mask);
    }

    pub fn lcs(&self) -> u32 {
        self.soc.lcs()
    }

    pub fn set_lcs(&mut self, lcs: u32) {
        self.soc.set_lcs(lcs);
    }

    pub fn set_id_register(&mut self, reg: u32, val: u32) {
        self.soc.set_id_register(reg, val);
    }

    /// Reset volatile state and re-derive the lifecycle from OTP, as the
    /// NVM controller does at power-up.
    pub fn power_cycle(&mut self) {
        let icv_flags = self.otp.word(otp::ICV_MANUFACTURE_FLAGS);
        let oem_flags = self.otp.word(otp::OEM_PROGRAMMED_FLAGS);
        let lcs = self.soc.lcs_from_otp(icv_flags, oem_flags);
        self.soc.set_lcs(lcs);
        self.aes.write(cc_prod_registers::aes::AES_SW_RESET, 1, false);
        self.soc.write(cc_prod_registers::host::AES_CLK_ENABLE, 0);
        self.soc.write(cc_prod_registers::host::DMA_CLK_ENABLE, 0);
        self.soc.write(
            cc_prod_registers::host::CRYPTO_CTL,
            cc_prod_registers::host::crypto_ctl::BYPASS,
        );
        self.trng.write(cc_prod_registers::rng::RNG_SW_RESET, 1);
        self.trng.write(cc_prod_registers::rng::RNG_CLK_ENABLE, 0);
    }

    pub fn aes_clock_enabled(&self) -> bool {
        self.soc.aes_clock()
    }

    pub fn aes_key_cleared(&self) -> bool {
        self.aes.key_material_cleared()
    }

    pub fn aes_blocks_processed(&self) -> u64 {
        self.aes.blocks_processed()
    }

    pub fn trng_enabled(&self) -> bool {
        self.trng.enabled()
    }

    pub fn trng_samples_taken(&self) -> u32 {
        self.trng.samples_taken()
    }
}

impl CcMmio for CryptoCell {
    fn read(&mut self, offset: u32) -> u32 {
        self.access_count += 1;
        if Aes::handles(offset) {
            self.aes.read(offset)
        } else if Otp::handles(offset) {
            self.otp.read(offset)
        } else if Trng::handles(offset) {
            self.trng.read(offset)
        } else if SocRegisters::handles(offset) {
            self.soc.read(offset)
        } else {
            0
        }
    }

    fn write(&mut self, offset: u32, val: u32) {
        self.access_count += 1;
        if Aes::handles(offset) {
            let enabled = self.soc.aes_enabled();
            self.aes.write(offset, val, enabled);
        } else if Otp::handles(offset) {
            self.otp.write(offset, val);
        } else if Trng::handles(offset) {
            self.trng.write(offset, val);
        } else if SocRegisters::handles(offset) {
            self.soc.write(offset, val);
        }
    }
}
