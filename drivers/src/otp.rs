/*++

Licensed under the Apache-2.0 license.

File Name:

    otp.rs

Abstract:

    File contains word level access to the one-time-programmable memory.

--*/

use crate::{CcHal, CcMmio, ProdError, ProdResult, WaitStrategy};
use cc_prod_registers::nvm;
use cc_prod_registers::otp::{word_addr, OTP_SIZE_WORDS};

/// OTP accessor. Word indices are the ones listed in `cc_prod_registers::otp`.
pub struct Otp<'a, M: CcMmio, W: WaitStrategy> {
    hal: &'a mut CcHal<M, W>,
}

impl<'a, M: CcMmio, W: WaitStrategy> Otp<'a, M, W> {
    pub(crate) fn new(hal: &'a mut CcHal<M, W>) -> Self {
        Self { hal }
    }

    fn check_range(word: u32, count: usize) -> ProdResult<()> {
        match word.checked_add(count as u32) {
            Some(end) if end <= OTP_SIZE_WORDS => Ok(()),
            _ => Err(ProdError::DRIVER_OTP_INVALID_ADDRESS),
        }
    }

    pub fn read_word(&mut self, word: u32) -> ProdResult<u32> {
        Self::check_range(word, 1)?;
        Ok(self.hal.read(word_addr(word)))
    }

    /// Read `out.len()` consecutive words starting at `word`.
    pub fn read_words(&mut self, word: u32, out: &mut [u32]) -> ProdResult<()> {
        Self::check_range(word, out.len())?;
        for (i, val) in out.iter_mut().enumerate() {
            *val = self.hal.read(word_addr(word + i as u32));
        }
        Ok(())
    }

    /// Burn one word and wait for the programming cycle to complete.
    ///
    /// OTP bits only move from 0 to 1, so the stored value becomes
    /// `old | val`. Use read-back to confirm the result.
    pub fn write_word(&mut self, word: u32, val: u32) -> ProdResult<()> {
        Self::check_range(word, 1)?;
        self.hal
            .wait_until(|mmio| mmio.read(nvm::NVM_IS_IDLE) & 1 != 0)?;
        self.hal.write(word_addr(word), val);
        self.hal
            .wait_until(|mmio| mmio.read(nvm::AIB_FUSE_PROG_COMPLETED) & 1 != 0)
    }
}
