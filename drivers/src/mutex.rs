/*++

Licensed under the Apache-2.0 license.

File Name:

    mutex.rs

Abstract:

    File contains the lock guarding the symmetric crypto engine.

--*/

use crate::{ProdError, ProdResult};
use core::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Lock for the single symmetric crypto engine.
///
/// Only `load`/`store` are used so the lock works on cores without atomic
/// read-modify-write instructions. Callers reach it through `&mut CcHal`, so
/// the check-then-set sequence cannot race.
#[derive(Default, Debug)]
pub struct CryptoMutex {
    locked: AtomicBool,
    acquisitions: AtomicU32,
}

impl CryptoMutex {
    pub const fn new() -> Self {
        Self {
            locked: AtomicBool::new(false),
            acquisitions: AtomicU32::new(0),
        }
    }

    pub(crate) fn lock(&self) -> ProdResult<()> {
        if self.locked.load(Ordering::Acquire) {
            return Err(ProdError::DRIVER_AES_ENGINE_BUSY);
        }
        self.locked.store(true, Ordering::Release);
        let count = self.acquisitions.load(Ordering::Relaxed);
        self.acquisitions
            .store(count.wrapping_add(1), Ordering::Relaxed);
        Ok(())
    }

    pub(crate) fn unlock(&self) {
        self.locked.store(false, Ordering::Release);
    }

    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Number of times the engine has been claimed.
    pub fn acquisitions(&self) -> u32 {
        self.acquisitions.load(Ordering::Relaxed)
    }
}
