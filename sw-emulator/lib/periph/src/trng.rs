/*++

Licensed under the Apache-2.0 license.

File Name:

    trng.rs

Abstract:

    File contains the emulated TRNG. Samples come from a canned byte
    stream (repeated when exhausted) or a seeded PRNG.

--*/

use cc_prod_registers::rng;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

enum EntropySource {
    Canned { bytes: Vec<u8>, cursor: usize },
    Random(StdRng),
}

pub struct Trng {
    source: EntropySource,
    enabled: bool,
    clock: bool,
    sample: Option<[u32; rng::EHR_WORDS]>,
    samples_taken: u32,
}

impl Trng {
    pub fn new(entropy: Option<Vec<u8>>, seed: u64) -> Self {
        let source = match entropy {
            Some(bytes) if !bytes.is_empty() => EntropySource::Canned { bytes, cursor: 0 },
            _ => EntropySource::Random(StdRng::seed_from_u64(seed)),
        };
        Self {
            source,
            enabled: false,
            clock: false,
            sample: None,
            samples_taken: 0,
        }
    }

    pub fn handles(offset: u32) -> bool {
        (rng::RNG_ISR..=rng::RNG_SW_RESET).contains(&offset) || offset == rng::RNG_CLK_ENABLE
    }

    fn next_sample(&mut self) -> [u32; rng::EHR_WORDS] {
        let mut bytes = [0u8; rng::EHR_BYTES];
        match &mut self.source {
            EntropySource::Canned { bytes: canned, cursor } => {
                for b in bytes.iter_mut() {
                    *b = canned[*cursor];
                    *cursor = (*cursor + 1) % canned.len();
                }
            }
            EntropySource::Random(rng) => rng.fill_bytes(&mut bytes),
        }
        let mut words = [0u32; rng::EHR_WORDS];
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        self.samples_taken += 1;
        words
    }

    fn ready(&self) -> bool {
        self.enabled && self.clock
    }

    pub fn read(&mut self, offset: u32) -> u32 {
        match offset {
            rng::RNG_ISR | rng::TRNG_VALID => {
                if !self.ready() {
                    return 0;
                }
                if self.sample.is_none() {
                    self.sample = Some(self.next_sample());
                }
                rng::ISR_EHR_VALID
            }
            o if (rng::EHR_DATA_0..rng::EHR_DATA_0 + rng::EHR_BYTES as u32).contains(&o) => {
                let index = ((o - rng::EHR_DATA_0) / 4) as usize;
                self.sample.map_or(0, |s| s[index])
            }
            rng::RND_SOURCE_ENABLE => self.enabled as u32,
            rng::RNG_CLK_ENABLE => self.clock as u32,
            _ => 0,
        }
    }

    pub fn write(&mut self, offset: u32, val: u32) {
        match offset {
            rng::RNG_ICR if val & rng::ISR_EHR_VALID != 0 => self.sample = None,
            rng::RND_SOURCE_ENABLE => {
                self.enabled = val & 1 != 0;
                if !self.enabled {
                    self.sample = None;
                }
            }
            rng::RNG_CLK_ENABLE => self.clock = val & 1 != 0,
            rng::RNG_SW_RESET if val & 1 != 0 => {
                self.enabled = false;
                self.sample = None;
            }
            _ => {}
        }
    }

    pub fn enabled(&self) -> bool {
        self.enabled || self.clock
    }

    pub fn samples_taken(&self) -> u32 {
        self.samples_taken
    }
}
