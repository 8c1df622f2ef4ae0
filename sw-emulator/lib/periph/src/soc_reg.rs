/*++

Licensed under the Apache-2.0 license.

File Name:

    soc_reg.rs

Abstract:

    File contains the host control, identification and lifecycle registers.

--*/

use cc_prod_registers::host::{self, DCU_WORDS, EXPECTED_IDS};
use cc_prod_registers::nvm::{self, lcs, LCS_MASK};

pub struct SocRegisters {
    ids: [(u32, u32); EXPECTED_IDS.len()],
    lcs: u32,
    icv_dcu_mask: [u32; DCU_WORDS],
    aes_clock: bool,
    dma_clock: bool,
    crypto_ctl: u32,
}

impl SocRegisters {
    pub fn new(lcs: u32, icv_dcu_mask: [u32; DCU_WORDS]) -> Self {
        Self {
            ids: EXPECTED_IDS,
            lcs: lcs & LCS_MASK,
            icv_dcu_mask,
            aes_clock: false,
            dma_clock: false,
            crypto_ctl: host::crypto_ctl::BYPASS,
        }
    }

    pub fn handles(offset: u32) -> bool {
        matches!(
            offset,
            host::AES_CLK_ENABLE
                | host::DMA_CLK_ENABLE
                | host::CRYPTO_CTL
                | nvm::LCS_IS_VALID
                | nvm::LCS_REG
        ) || EXPECTED_IDS.iter().any(|(reg, _)| *reg == offset)
            || Self::dcu_index(offset).is_some()
    }

    fn dcu_index(offset: u32) -> Option<usize> {
        let base = host::AO_ICV_DCU_RESTRICTION_MASK;
        if offset >= base && offset < base + (DCU_WORDS as u32) * 4 {
            Some(((offset - base) / 4) as usize)
        } else {
            None
        }
    }

    pub fn read(&self, offset: u32) -> u32 {
        match offset {
            host::AES_CLK_ENABLE => self.aes_clock as u32,
            host::DMA_CLK_ENABLE => self.dma_clock as u32,
            host::CRYPTO_CTL => self.crypto_ctl,
            nvm::LCS_IS_VALID => 1,
            nvm::LCS_REG => self.lcs,
            o => {
                if let Some(i) = Self::dcu_index(o) {
                    return self.icv_dcu_mask[i];
                }
                self.ids
                    .iter()
                    .find(|(reg, _)| *reg == o)
                    .map_or(0, |(_, val)| *val)
            }
        }
    }

    /// Identification, lifecycle and DCU mask registers are read-only.
    pub fn write(&mut self, offset: u32, val: u32) {
        match offset {
            host::AES_CLK_ENABLE => self.aes_clock = val & 1 != 0,
            host::DMA_CLK_ENABLE => self.dma_clock = val & 1 != 0,
            host::CRYPTO_CTL => self.crypto_ctl = val,
            _ => {}
        }
    }

    /// Data path routed to a clocked AES engine.
    pub fn aes_enabled(&self) -> bool {
        self.aes_clock && self.crypto_ctl == host::crypto_ctl::AES
    }

    pub fn aes_clock(&self) -> bool {
        self.aes_clock || self.dma_clock
    }

    pub fn lcs(&self) -> u32 {
        self.lcs
    }

    pub fn set_lcs(&mut self, lcs: u32) {
        self.lcs = lcs & LCS_MASK;
    }

    pub fn set_id_register(&mut self, reg: u32, val: u32) {
        if let Some(entry) = self.ids.iter_mut().find(|(r, _)| *r == reg) {
            entry.1 = val;
        }
    }

    /// Lifecycle the NVM controller derives from OTP at power-up. RMA is
    /// sticky.
    pub fn lcs_from_otp(&self, icv_flags: u32, oem_flags: u32) -> u32 {
        if self.lcs == lcs::RMA {
            lcs::RMA
        } else if oem_flags != 0 {
            lcs::SECURE
        } else if icv_flags != 0 {
            lcs::DEVICE_MANUFACTURE
        } else {
            lcs::CHIP_MANUFACTURE
        }
    }
}
