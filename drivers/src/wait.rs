/*++

Licensed under the Apache-2.0 license.

File Name:

    wait.rs

Abstract:

    File contains the strategies used to poll hardware status bits.

--*/

use crate::{ProdError, ProdResult};

/// How a driver waits for a hardware status condition.
pub trait WaitStrategy {
    /// Poll `predicate` until it returns true.
    fn until<F>(&self, predicate: F) -> ProdResult<()>
    where
        F: FnMut() -> bool;
}

/// Busy-poll with no timeout. An unresponsive engine hangs the caller,
/// which is treated as a hardware fault.
#[derive(Default, Debug, Clone, Copy)]
pub struct SpinWait;

impl WaitStrategy for SpinWait {
    fn until<F>(&self, mut predicate: F) -> ProdResult<()>
    where
        F: FnMut() -> bool,
    {
        while !predicate() {}
        Ok(())
    }
}

/// Busy-poll at most `max_polls` times.
#[derive(Debug, Clone, Copy)]
pub struct BoundedWait {
    pub max_polls: u32,
}

impl BoundedWait {
    pub const fn new(max_polls: u32) -> Self {
        Self { max_polls }
    }
}

impl WaitStrategy for BoundedWait {
    fn until<F>(&self, mut predicate: F) -> ProdResult<()>
    where
        F: FnMut() -> bool,
    {
        for _ in 0..self.max_polls {
            if predicate() {
                return Ok(());
            }
        }
        Err(ProdError::DRIVER_WAIT_TIMEOUT)
    }
}
