/*++

Licensed under the Apache-2.0 license.

File Name:

    otp.rs

Abstract:

    File contains the emulated OTP array and NVM controller.

--*/

use cc_prod_registers::nvm;
use cc_prod_registers::otp::{OTP_BASE, OTP_SIZE_WORDS};

const OTP_WORDS: usize = OTP_SIZE_WORDS as usize;

/// OTP array. Writes OR into the stored word (bits only go from 0 to 1),
/// minus any bits forced stuck at zero.
pub struct Otp {
    words: [u32; OTP_WORDS],
    stuck_at_zero: [u32; OTP_WORDS],
    write_count: u32,
    burn_latency: u32,
    burn_remaining: u32,
}

impl Otp {
    pub fn new(image: Option<&[u32]>, burn_latency: u32) -> Self {
        let mut words = [0u32; OTP_WORDS];
        if let Some(image) = image {
            for (dst, src) in words.iter_mut().zip(image) {
                *dst = *src;
            }
        }
        Self {
            words,
            stuck_at_zero: [0; OTP_WORDS],
            write_count: 0,
            burn_latency,
            burn_remaining: 0,
        }
    }

    pub fn handles(offset: u32) -> bool {
        Self::word_index(offset).is_some()
            || matches!(offset, nvm::AIB_FUSE_PROG_COMPLETED | nvm::NVM_IS_IDLE)
    }

    fn word_index(offset: u32) -> Option<usize> {
        if offset >= OTP_BASE && offset < OTP_BASE + OTP_SIZE_WORDS * 4 {
            Some(((offset - OTP_BASE) / 4) as usize)
        } else {
            None
        }
    }

    pub fn read(&mut self, offset: u32) -> u32 {
        match offset {
            nvm::AIB_FUSE_PROG_COMPLETED | nvm::NVM_IS_IDLE => {
                if self.burn_remaining > 0 {
                    self.burn_remaining -= 1;
                    0
                } else {
                    1
                }
            }
            _ => Self::word_index(offset).map_or(0, |i| self.words[i]),
        }
    }

    pub fn write(&mut self, offset: u32, val: u32) {
        if let Some(i) = Self::word_index(offset) {
            self.words[i] |= val & !self.stuck_at_zero[i];
            self.write_count += 1;
            self.burn_remaining = self.burn_latency;
        }
    }

    pub fn word(&self, word: u32) -> u32 {
        self.words.get(word as usize).copied().unwrap_or(0)
    }

    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn write_count(&self) -> u32 {
        self.write_count
    }

    pub fn inject_stuck_at_zero(&mut self, word: u32, mask: u32) {
        if let Some(stuck) = self.stuck_at_zero.get_mut(word as usize) {
            *stuck |= mask;
        }
    }
}
