/*++

Licensed under the Apache-2.0 license.

File Name:

    printer.rs

Abstract:

    File contains support routines and macros to print diagnostics.

--*/
use core::convert::Infallible;
use core::sync::atomic::{AtomicPtr, Ordering};
use ufmt::{uDisplay, uWrite};

/// Platform writer, e.g. a UART transmit routine. Null until installed.
static OUTPUT_HOOK: AtomicPtr<()> = AtomicPtr::new(core::ptr::null_mut());

/// Route diagnostics to `hook` in addition to stdout (feature `std`).
pub fn set_output_hook(hook: fn(&str)) {
    OUTPUT_HOOK.store(hook as *mut (), Ordering::Release);
}

pub fn clear_output_hook() {
    OUTPUT_HOOK.store(core::ptr::null_mut(), Ordering::Release);
}

fn output_hook() -> Option<fn(&str)> {
    let ptr = OUTPUT_HOOK.load(Ordering::Acquire);
    if ptr.is_null() {
        return None;
    }
    // SAFETY: only `set_output_hook` stores a non-null value, and it always
    // stores a `fn(&str)`.
    Some(unsafe { core::mem::transmute::<*mut (), fn(&str)>(ptr) })
}

#[derive(Default)]
pub struct Printer;

impl uWrite for Printer {
    type Error = Infallible;

    /// Writes a string slice into this writer, returning whether the write succeeded.
    #[inline(never)]
    fn write_str(&mut self, str: &str) -> Result<(), Self::Error> {
        if let Some(hook) = output_hook() {
            hook(str);
        }
        cfg_if::cfg_if! {
            if #[cfg(feature = "std")] {
                print!("{str}");
            }
        }
        Ok(())
    }
}

#[macro_export]
macro_rules! cprint {
    ($($tt:tt)*) => {{
        let _ = ufmt::uwrite!(&mut $crate::printer::Printer::default(), $($tt)*);
    }}
}

#[macro_export]
macro_rules! cprintln {
    ($($tt:tt)*) => {{
        let _ = ufmt::uwriteln!(&mut $crate::printer::Printer::default(), $($tt)*);
    }}
}

/// Prints a status word as `0x%08X`.
pub struct HexWord(pub u32);
impl uDisplay for HexWord {
    fn fmt<W>(&self, f: &mut ufmt::Formatter<'_, W>) -> Result<(), W::Error>
    where
        W: uWrite + ?Sized,
    {
        f.write_str("0x")?;
        for shift in (0..8).rev() {
            let c = ((self.0 >> (shift * 4)) & 0xf) as u8;
            if c < 10 {
                f.write_char((c + b'0') as char)?;
            } else {
                f.write_char((c - 10 + b'A') as char)?;
            }
        }
        Ok(())
    }
}
