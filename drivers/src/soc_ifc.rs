/*++

Licensed under the Apache-2.0 license.

File Name:

    soc_ifc.rs

Abstract:

    File contains device identification and lifecycle state API.

--*/

use crate::printer::HexWord;
use crate::{cprintln, CcHal, CcMmio, ProdResult, WaitStrategy};
use cc_prod_registers::host::{self, DCU_WORDS, EXPECTED_IDS};
use cc_prod_registers::nvm::{self, lcs, LCS_MASK};

/// Lifecycle state as reported by the NVM controller.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Lifecycle {
    ChipManufacture,
    DeviceManufacture,
    Secure,
    Rma,
    Unknown(u32),
}

impl From<u32> for Lifecycle {
    fn from(val: u32) -> Self {
        match val & LCS_MASK {
            lcs::CHIP_MANUFACTURE => Self::ChipManufacture,
            lcs::DEVICE_MANUFACTURE => Self::DeviceManufacture,
            lcs::SECURE => Self::Secure,
            lcs::RMA => Self::Rma,
            other => Self::Unknown(other),
        }
    }
}

/// Device State
pub struct SocIfc<'a, M: CcMmio, W: WaitStrategy> {
    hal: &'a mut CcHal<M, W>,
}

impl<'a, M: CcMmio, W: WaitStrategy> SocIfc<'a, M, W> {
    pub(crate) fn new(hal: &'a mut CcHal<M, W>) -> Self {
        Self { hal }
    }

    /// Check every peripheral and component ID register against the values
    /// of a CryptoCell-312.
    pub fn ids_match(&mut self) -> bool {
        let mut matched = true;
        for (reg, expected) in EXPECTED_IDS {
            let actual = self.hal.read(reg);
            if actual != expected {
                cprintln!(
                    "[soc] ID register {} = {}, expected {}",
                    HexWord(reg),
                    HexWord(actual),
                    HexWord(expected)
                );
                matched = false;
            }
        }
        matched
    }

    /// Wait for the lifecycle register to become valid and decode it.
    pub fn lifecycle(&mut self) -> ProdResult<Lifecycle> {
        self.hal
            .wait_until(|mmio| mmio.read(nvm::LCS_IS_VALID) & 1 != 0)?;
        Ok(Lifecycle::from(self.hal.read(nvm::LCS_REG)))
    }

    /// DCU bits the ICV may lock. The OEM owns the complement.
    pub fn icv_dcu_restriction_mask(&mut self) -> [u32; DCU_WORDS] {
        let mut mask = [0u32; DCU_WORDS];
        for (i, word) in mask.iter_mut().enumerate() {
            *word = self
                .hal
                .read(host::AO_ICV_DCU_RESTRICTION_MASK + (i as u32) * 4);
        }
        mask
    }
}
