// Licensed under the Apache-2.0 license

use crate::helpers::{canned_entropy, cm_device, cmpu_request, Workspace, CANNED_HUK};
use cc_prod::{cc_prod_cmpu, BoundedWait, CcHal, ProdError};
use cc_prod_emu_periph::{CryptoCell, CryptoCellArgs};
use cc_prod_registers::otp::{self, IcvManufactureFlags};

#[test]
fn test_stuck_bit_aborts_after_flags() {
    let mut hal = cm_device();
    // Bit 0 of the first HUK word is set in the canned HUK.
    assert_eq!(CANNED_HUK[0] & 1, 1);
    hal.mmio_mut().inject_stuck_at_zero(otp::HUK, 0x1);
    let mut ws = Workspace::new();

    assert_eq!(
        cc_prod_cmpu(&mut hal, &cmpu_request(), &mut ws.0),
        Err(ProdError::PROD_HAL_FATAL)
    );

    let cc = hal.mmio();
    let flags = IcvManufactureFlags::from(cc.otp_word(otp::ICV_MANUFACTURE_FLAGS));
    assert!(flags.hbk0_not_in_use());
    assert_eq!(cc.otp_word(otp::HUK), CANNED_HUK[0] & !1);
    assert_eq!(cc.otp_write_count(), 2);
    assert_eq!(cc.otp_words(otp::HUK + 1, 7), vec![0; 7]);
    assert!(!hal.aes_mutex().is_locked());
    assert_eq!(ws.0, [0u8; 4096]);
}

#[test]
fn test_preburned_bit_fails_read_back() {
    let mut image = vec![0u32; otp::OTP_SIZE_WORDS as usize];
    // Bit 2 is clear in the second canned HUK word.
    assert_eq!(CANNED_HUK[1] & 0x4, 0);
    image[otp::HUK as usize + 1] = 0x4;
    let mut hal = CcHal::with_spin_wait(CryptoCell::new(CryptoCellArgs {
        entropy: Some(canned_entropy()),
        otp: Some(image),
        ..Default::default()
    }));
    let mut ws = Workspace::new();

    assert_eq!(
        cc_prod_cmpu(&mut hal, &cmpu_request(), &mut ws.0),
        Err(ProdError::PROD_HAL_FATAL)
    );
    let cc = hal.mmio();
    assert_eq!(cc.otp_word(otp::HUK), CANNED_HUK[0]);
    assert_eq!(cc.otp_word(otp::HUK + 1), CANNED_HUK[1] | 0x4);
    assert_eq!(cc.otp_write_count(), 3);
}

#[test]
fn test_burn_that_never_completes() {
    let cc = CryptoCell::new(CryptoCellArgs {
        entropy: Some(canned_entropy()),
        otp_burn_latency: 100,
        ..Default::default()
    });
    let mut hal = CcHal::new(cc, BoundedWait::new(4));
    let mut ws = Workspace::new();

    assert_eq!(
        cc_prod_cmpu(&mut hal, &cmpu_request(), &mut ws.0),
        Err(ProdError::PROD_HAL_FATAL)
    );
    assert_eq!(hal.mmio().otp_write_count(), 1);
    assert!(!hal.aes_mutex().is_locked());
}

#[test]
fn test_slow_burn_completes_within_bound() {
    let cc = CryptoCell::new(CryptoCellArgs {
        entropy: Some(canned_entropy()),
        otp_burn_latency: 3,
        ..Default::default()
    });
    let mut hal = CcHal::new(cc, BoundedWait::new(8));
    let mut ws = Workspace::new();

    cc_prod_cmpu(&mut hal, &cmpu_request(), &mut ws.0).unwrap();
    assert_eq!(hal.mmio().otp_words(otp::HUK, otp::HUK_WORDS), CANNED_HUK);
}
