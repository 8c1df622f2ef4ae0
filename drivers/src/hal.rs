/*++

Licensed under the Apache-2.0 license.

File Name:

    hal.rs

Abstract:

    File contains the hardware abstraction handed to every driver.

--*/

use crate::{
    AesEngine, CcMmio, CryptoMutex, Otp, ProdResult, SocIfc, SpinWait, Trng, WaitStrategy,
};

/// Owner of the register window.
///
/// Drivers borrow the HAL for the duration of one operation, which keeps
/// register access single-owner. The symmetric engine is additionally
/// guarded by `CryptoMutex` and released when the `AesEngine` handle drops.
pub struct CcHal<M: CcMmio, W: WaitStrategy = SpinWait> {
    mmio: M,
    wait: W,
    aes_mutex: CryptoMutex,
}

impl<M: CcMmio> CcHal<M, SpinWait> {
    /// Create a HAL that busy-polls status bits without a timeout.
    pub fn with_spin_wait(mmio: M) -> Self {
        Self::new(mmio, SpinWait)
    }
}

impl<M: CcMmio, W: WaitStrategy> CcHal<M, W> {
    pub fn new(mmio: M, wait: W) -> Self {
        Self {
            mmio,
            wait,
            aes_mutex: CryptoMutex::new(),
        }
    }

    pub fn mmio(&self) -> &M {
        &self.mmio
    }

    pub fn mmio_mut(&mut self) -> &mut M {
        &mut self.mmio
    }

    pub fn into_mmio(self) -> M {
        self.mmio
    }

    pub fn aes_mutex(&self) -> &CryptoMutex {
        &self.aes_mutex
    }

    /// Claim the AES engine. The claim ends when the returned handle drops.
    pub fn aes(&mut self) -> ProdResult<AesEngine<'_, M, W>> {
        AesEngine::claim(self)
    }

    pub fn otp(&mut self) -> Otp<'_, M, W> {
        Otp::new(self)
    }

    pub fn trng(&mut self) -> Trng<'_, M, W> {
        Trng::new(self)
    }

    pub fn soc_ifc(&mut self) -> SocIfc<'_, M, W> {
        SocIfc::new(self)
    }

    pub(crate) fn read(&mut self, offset: u32) -> u32 {
        self.mmio.read(offset)
    }

    pub(crate) fn write(&mut self, offset: u32, val: u32) {
        self.mmio.write(offset, val)
    }

    /// Poll `predicate` against the register window using the configured
    /// wait strategy.
    pub(crate) fn wait_until<F>(&mut self, mut predicate: F) -> ProdResult<()>
    where
        F: FnMut(&mut M) -> bool,
    {
        let mmio = &mut self.mmio;
        self.wait.until(|| predicate(mmio))
    }

    pub(crate) fn lock_aes(&self) -> ProdResult<()> {
        self.aes_mutex.lock()
    }

    pub(crate) fn unlock_aes(&self) {
        self.aes_mutex.unlock()
    }
}
