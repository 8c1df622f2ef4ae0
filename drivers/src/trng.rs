// Licensed under the Apache-2.0 license

use crate::{CcHal, CcMmio, ProdError, ProdResult, WaitStrategy};
use cc_prod_registers::rng;
use zeroize::Zeroizing;

/// Ring oscillator cycles between samples.
const SAMPLE_COUNT: u32 = 0x3E8;

/// Raw entropy from the TRNG's entropy holding register.
pub struct Trng<'a, M: CcMmio, W: WaitStrategy> {
    hal: &'a mut CcHal<M, W>,
}

impl<'a, M: CcMmio, W: WaitStrategy> Trng<'a, M, W> {
    pub(crate) fn new(hal: &'a mut CcHal<M, W>) -> Self {
        Self { hal }
    }

    /// Fill `out` with raw entropy. `out.len()` must be a non-zero multiple of
    /// four. The source is stopped again before returning.
    pub fn collect(&mut self, out: &mut [u8]) -> ProdResult<()> {
        if out.is_empty() || out.len() % 4 != 0 {
            return Err(ProdError::DRIVER_TRNG_INVALID_SIZE);
        }

        self.hal.write(rng::RNG_CLK_ENABLE, 1);
        self.hal.write(rng::SAMPLE_CNT1, SAMPLE_COUNT);
        self.hal.write(rng::RNG_ICR, u32::MAX);
        self.hal.write(rng::RND_SOURCE_ENABLE, 1);

        let result = self.collect_samples(out);

        self.hal.write(rng::RND_SOURCE_ENABLE, 0);
        self.hal.write(rng::RNG_CLK_ENABLE, 0);
        result
    }

    fn collect_samples(&mut self, out: &mut [u8]) -> ProdResult<()> {
        let mut previous: Option<Zeroizing<[u32; rng::EHR_WORDS]>> = None;

        for chunk in out.chunks_mut(rng::EHR_BYTES) {
            self.hal
                .wait_until(|mmio| mmio.read(rng::RNG_ISR) & rng::ISR_EHR_VALID != 0)?;

            let mut sample = Zeroizing::new([0u32; rng::EHR_WORDS]);
            for (i, word) in sample.iter_mut().enumerate() {
                *word = self.hal.read(rng::EHR_DATA_0 + (i as u32) * 4);
            }
            self.hal.write(rng::RNG_ICR, rng::ISR_EHR_VALID);

            // Repetition test: a stuck source repeats whole samples.
            if previous.as_ref().is_some_and(|prev| **prev == *sample) {
                return Err(ProdError::DRIVER_TRNG_REPETITION_FAILURE);
            }

            for (dst, word) in chunk.chunks_mut(4).zip(sample.iter()) {
                dst.copy_from_slice(&word.to_le_bytes());
            }
            previous = Some(sample);
        }
        Ok(())
    }
}
