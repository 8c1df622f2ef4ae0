// Licensed under the Apache-2.0 license

use crate::helpers::{
    cm_device, cmpu_request, device, package, Workspace, CANNED_HUK, HBK0, KPICV,
};
use cc_prod::config::{ICV_KEY_LABEL, KCEICV_ASSET_ID, KPICV_ASSET_ID};
use cc_prod::{cc_prod_cmpu, cc_prod_cmpu_status, Asset, CmpuData, ProdError, UniqueData};
use cc_prod_emu_periph::{CryptoCell, CryptoCellArgs};
use cc_prod_registers::host;
use cc_prod_registers::nvm::lcs;
use cc_prod_registers::otp::{self, IcvManufactureFlags};
use cc_prod_test::derive::derive_huk;
use cc_prod_test::words_le;

#[test]
fn test_cmpu_user_data_without_keys() {
    let mut hal = cm_device();
    let mut ws = Workspace::new();
    cc_prod_cmpu(&mut hal, &cmpu_request(), &mut ws.0).unwrap();

    let cc = hal.mmio();
    let flags = IcvManufactureFlags::from(cc.otp_word(otp::ICV_MANUFACTURE_FLAGS));
    assert!(flags.hbk0_not_in_use());
    assert!(flags.kpicv_not_in_use());
    assert!(flags.kceicv_not_in_use());

    let huk = cc.otp_words(otp::HUK, otp::HUK_WORDS);
    assert_eq!(huk, CANNED_HUK);
    assert_eq!(huk, words_le(&derive_huk(&crate::helpers::canned_entropy())));
    let zeros: u32 = huk.iter().map(|w| w.count_zeros()).sum();
    assert_eq!(u32::from(flags.huk_zero_count()), zeros);
    assert_eq!(u32::from(flags) & 0x0000_FF00, 0x0000_8000);

    assert_eq!(cc.otp_words(otp::HBK0, 4), vec![0; 4]);
    assert_eq!(cc.otp_words(otp::KPICV, 8), vec![0; 8]);
    assert_eq!(cc.otp_words(otp::DCU_LOCK, 4), vec![0; 4]);
    assert_eq!(cc.otp_words(otp::ICV_MIN_VERSION, 2), vec![0; 2]);

    assert!(!cc.aes_clock_enabled());
    assert!(cc.aes_key_cleared());
    assert!(!cc.trng_enabled());
    assert_eq!(ws.0, [0u8; 4096]);
}

#[test]
fn test_cmpu_hbk0_packaged_and_plain_keys() {
    let mut hal = cm_device();
    let mut ws = Workspace::new();
    let kceicv = [0x5A; 16];
    let data = CmpuData {
        unique_data: UniqueData::Hbk0(HBK0),
        kpicv: Asset::Package(package(ICV_KEY_LABEL, &HBK0, &KPICV_ASSET_ID, &KPICV)),
        kceicv: Asset::Plain(kceicv),
        icv_min_version: 40,
        icv_config_word: 0x1234_5678,
        icv_dcu_default_lock: [u32::MAX; 4],
    };
    cc_prod_cmpu(&mut hal, &data, &mut ws.0).unwrap();

    let cc = hal.mmio();
    let flags = IcvManufactureFlags::from(cc.otp_word(otp::ICV_MANUFACTURE_FLAGS));
    assert!(!flags.hbk0_not_in_use());
    assert!(!flags.kpicv_not_in_use());
    assert!(!flags.kceicv_not_in_use());
    assert_eq!(
        u32::from(flags.hbk0_zero_count()),
        words_le(&HBK0).iter().map(|w| w.count_zeros()).sum::<u32>()
    );
    assert_eq!(
        u32::from(flags.kpicv_zero_count()),
        KPICV.iter().map(|b| b.count_zeros()).sum::<u32>()
    );
    assert_eq!(flags.kceicv_zero_count(), 64);

    assert_eq!(cc.otp_words(otp::HBK0, 4), words_le(&HBK0));
    assert_eq!(cc.otp_words(otp::KPICV, 4), words_le(&KPICV));
    assert_eq!(cc.otp_words(otp::KCEICV, 4), words_le(&kceicv));
    assert_eq!(cc.otp_words(otp::DCU_LOCK, 4), vec![0xFF, 0xFF, 0, 0]);
    assert_eq!(
        cc.otp_words(otp::ICV_MIN_VERSION, 2),
        vec![u32::MAX, 0x0000_00FF]
    );
    assert_eq!(cc.otp_word(otp::ICV_GENERAL_PURPOSE_CONFIG), 0x1234_5678);
    // HBK1 and the OEM area stay blank.
    assert_eq!(cc.otp_words(otp::HBK1, 4), vec![0; 4]);
    assert_eq!(cc.otp_word(otp::OEM_PROGRAMMED_FLAGS), 0);
}

#[test]
fn test_cmpu_wrong_lifecycle() {
    for state in [lcs::DEVICE_MANUFACTURE, lcs::SECURE, lcs::RMA] {
        let mut hal = device(state);
        let mut ws = Workspace::new();
        assert_eq!(
            cc_prod_cmpu(&mut hal, &cmpu_request(), &mut ws.0),
            Err(ProdError::PROD_ILLEGAL_LCS)
        );
        assert_eq!(hal.mmio().otp_write_count(), 0);
        assert_eq!(hal.mmio().trng_samples_taken(), 0);
    }
}

#[test]
fn test_cmpu_unexpected_peripheral_id() {
    let mut hal = cm_device();
    hal.mmio_mut().set_id_register(host::COMPONENT_ID_2, 0x06);
    let mut ws = Workspace::new();
    assert_eq!(
        cc_prod_cmpu(&mut hal, &cmpu_request(), &mut ws.0),
        Err(ProdError::PROD_HAL_FATAL)
    );
    assert_eq!(hal.mmio().otp_write_count(), 0);
}

#[test]
fn test_cmpu_package_for_other_device() {
    let mut hal = cm_device();
    let mut ws = Workspace::new();
    let mut other = HBK0;
    other[15] ^= 0x01;
    let data = CmpuData {
        unique_data: UniqueData::Hbk0(HBK0),
        kpicv: Asset::Package(package(ICV_KEY_LABEL, &other, &KPICV_ASSET_ID, &KPICV)),
        ..cmpu_request()
    };
    assert_eq!(
        cc_prod_cmpu(&mut hal, &data, &mut ws.0),
        Err(ProdError::PROD_ASSET_PKG_VERIFY)
    );
    assert_eq!(hal.mmio().otp_write_count(), 0);
    assert!(hal.mmio().aes_key_cleared());
}

#[test]
fn test_cmpu_package_in_wrong_slot() {
    let mut hal = cm_device();
    let mut ws = Workspace::new();
    let data = CmpuData {
        unique_data: UniqueData::Hbk0(HBK0),
        kceicv: Asset::Package(package(ICV_KEY_LABEL, &HBK0, &KPICV_ASSET_ID, &KPICV)),
        ..cmpu_request()
    };
    assert_eq!(
        cc_prod_cmpu(&mut hal, &data, &mut ws.0),
        Err(ProdError::PROD_ASSET_PKG_VERIFY)
    );

    let mut hal = cm_device();
    let data = CmpuData {
        kceicv: Asset::Package(package(
            ICV_KEY_LABEL,
            &[0x5A; 16],
            &KCEICV_ASSET_ID,
            &KPICV,
        )),
        ..cmpu_request()
    };
    cc_prod_cmpu(&mut hal, &data, &mut ws.0).unwrap();
    assert_eq!(hal.mmio().otp_words(otp::KCEICV, 4), words_le(&KPICV));
}

#[test]
fn test_cmpu_degenerate_plain_key() {
    for key in [[0u8; 16], [0xFF; 16]] {
        let mut hal = cm_device();
        let mut ws = Workspace::new();
        let data = CmpuData {
            kpicv: Asset::Plain(key),
            ..cmpu_request()
        };
        assert_eq!(
            cc_prod_cmpu(&mut hal, &data, &mut ws.0),
            Err(ProdError::PROD_ILLEGAL_ZERO_COUNT)
        );
        assert_eq!(hal.mmio().otp_write_count(), 0);
    }
}

#[test]
fn test_cmpu_stuck_entropy_source() {
    let mut hal = cc_prod::CcHal::with_spin_wait(CryptoCell::new(CryptoCellArgs {
        entropy: Some(vec![0x42; 24]),
        ..Default::default()
    }));
    let mut ws = Workspace::new();
    assert_eq!(
        cc_prod_cmpu(&mut hal, &cmpu_request(), &mut ws.0),
        Err(ProdError::DRIVER_TRNG_REPETITION_FAILURE)
    );
    assert_eq!(hal.mmio().otp_write_count(), 0);
    assert!(!hal.mmio().trng_enabled());
}

#[test]
fn test_cmpu_status_misaligned_workspace() {
    let mut cc = CryptoCell::new(CryptoCellArgs::default());
    let mut ws = Workspace::new();
    let status = cc_prod_cmpu_status(&mut cc, &cmpu_request(), &mut ws.0[2..]);
    assert_eq!(status, u32::from(ProdError::PROD_INVALID_PARAM));
    assert_eq!(cc.access_count(), 0);
}
