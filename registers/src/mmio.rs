// Licensed under the Apache-2.0 license

//! Access to the register window.

/// A 32-bit register window addressed by byte offset.
///
/// Drivers only ever touch hardware through this trait, so the same driver
/// code runs against memory-mapped silicon (`RealMmio`) and the software
/// emulator.
pub trait CcMmio {
    fn read(&mut self, offset: u32) -> u32;
    fn write(&mut self, offset: u32, val: u32);
}

impl<T: CcMmio + ?Sized> CcMmio for &mut T {
    fn read(&mut self, offset: u32) -> u32 {
        (**self).read(offset)
    }

    fn write(&mut self, offset: u32, val: u32) {
        (**self).write(offset, val)
    }
}

/// Memory-mapped register window at a fixed base address.
pub struct RealMmio {
    base: *mut u32,
}

impl RealMmio {
    /// # Safety
    ///
    /// `base` must be the address of the CryptoCell host register window,
    /// mapped for the lifetime of this value, and nothing else may drive the
    /// window concurrently.
    pub unsafe fn new(base: usize) -> Self {
        Self {
            base: base as *mut u32,
        }
    }
}

impl CcMmio for RealMmio {
    fn read(&mut self, offset: u32) -> u32 {
        // SAFETY: the window is mapped per the contract of `new`.
        unsafe { core::ptr::read_volatile(self.base.add(offset as usize / 4)) }
    }

    fn write(&mut self, offset: u32, val: u32) {
        // SAFETY: the window is mapped per the contract of `new`.
        unsafe { core::ptr::write_volatile(self.base.add(offset as usize / 4), val) }
    }
}
