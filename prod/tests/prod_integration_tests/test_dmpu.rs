// Licensed under the Apache-2.0 license

use crate::helpers::{cm_device, cmpu_request, device, package, Workspace, HBK0, KPICV};
use cc_prod::config::{
    DMPU_WORKSPACE_MINIMUM_SIZE, KCE_ASSET_ID, KCP_ASSET_ID, OEM_KEY_LABEL,
};
use cc_prod::{
    cc_prod_cmpu, cc_prod_dmpu, cc_prod_dmpu_status, Asset, CmpuData, DmpuData, Hbk, ProdError,
    UniqueData,
};
use cc_prod_emu_periph::{CryptoCell, CryptoCellArgs};
use cc_prod_registers::nvm::lcs;
use cc_prod_registers::otp::{self, IcvManufactureFlags, OemProgrammedFlags};
use cc_prod_test::words_le;

const HBK1: [u8; 16] = [
    0xb0, 0xb1, 0xb2, 0xb3, 0xb4, 0xb5, 0xb6, 0xb7, 0xb8, 0xb9, 0xba, 0xbb, 0xbc, 0xbd, 0xbe, 0xbf,
];

const KCE: [u8; 16] = [0x3C; 16];

fn dmpu_request(hbk: Hbk) -> DmpuData {
    DmpuData {
        hbk,
        kcp: Asset::NoKey,
        kce: Asset::NoKey,
        oem_min_version: 0,
        oem_dcu_default_lock: [0; 4],
    }
}

#[test]
fn test_dmpu_workspace_one_byte_short() {
    let mut hal = device(lcs::DEVICE_MANUFACTURE);
    let mut ws = Workspace::new();
    assert_eq!(
        cc_prod_dmpu(
            &mut hal,
            &dmpu_request(Hbk::Hbk1(HBK1)),
            &mut ws.0[..DMPU_WORKSPACE_MINIMUM_SIZE - 1]
        ),
        Err(ProdError::PROD_INVALID_PARAM)
    );
    assert_eq!(hal.mmio().access_count(), 0);
    assert!(!hal.aes_mutex().is_locked());
}

#[test]
fn test_dmpu_wrong_lifecycle() {
    let mut cc = CryptoCell::new(CryptoCellArgs::default());
    let mut ws = Workspace::new();
    let status = cc_prod_dmpu_status(&mut cc, &dmpu_request(Hbk::Hbk1(HBK1)), &mut ws.0);
    assert_eq!(status, u32::from(ProdError::PROD_ILLEGAL_LCS));
    assert_eq!(cc.otp_write_count(), 0);
}

#[test]
fn test_cmpu_power_cycle_dmpu() {
    let mut hal = cm_device();
    let mut ws = Workspace::new();
    let cmpu = CmpuData {
        unique_data: UniqueData::Hbk0(HBK0),
        icv_dcu_default_lock: [0x0000_0001, 0, 0, 0],
        ..cmpu_request()
    };
    cc_prod_cmpu(&mut hal, &cmpu, &mut ws.0).unwrap();

    // DMPU is refused until the lifecycle advances.
    assert_eq!(
        cc_prod_dmpu(&mut hal, &dmpu_request(Hbk::Hbk1(HBK1)), &mut ws.0),
        Err(ProdError::PROD_ILLEGAL_LCS)
    );
    hal.mmio_mut().power_cycle();
    assert_eq!(hal.mmio().lcs(), lcs::DEVICE_MANUFACTURE);

    let dmpu = DmpuData {
        hbk: Hbk::Hbk1(HBK1),
        kcp: Asset::Package(package(OEM_KEY_LABEL, &HBK1, &KCP_ASSET_ID, &KPICV)),
        kce: Asset::Plain(KCE),
        oem_min_version: 96,
        oem_dcu_default_lock: [u32::MAX; 4],
    };
    cc_prod_dmpu(&mut hal, &dmpu, &mut ws.0).unwrap();

    let cc = hal.mmio();
    let flags = OemProgrammedFlags::from(cc.otp_word(otp::OEM_PROGRAMMED_FLAGS));
    assert!(!flags.kcp_not_in_use());
    assert!(!flags.kce_not_in_use());
    assert_eq!(flags.kce_zero_count(), 64);
    assert_eq!(cc.otp_words(otp::HBK0, 4), words_le(&HBK0));
    assert_eq!(cc.otp_words(otp::HBK1, 4), words_le(&HBK1));
    assert_eq!(cc.otp_words(otp::KCP, 4), words_le(&KPICV));
    assert_eq!(cc.otp_words(otp::KCE, 4), words_le(&KCE));
    assert_eq!(
        cc.otp_words(otp::DCU_LOCK, 4),
        vec![0xFFFF_FF01, 0xFFFF_FF00, u32::MAX, u32::MAX]
    );
    assert_eq!(cc.otp_words(otp::OEM_MIN_VERSION, 3), vec![u32::MAX; 3]);

    hal.mmio_mut().power_cycle();
    assert_eq!(hal.mmio().lcs(), lcs::SECURE);
    assert_eq!(
        cc_prod_dmpu(&mut hal, &dmpu_request(Hbk::Hbk1(HBK1)), &mut ws.0),
        Err(ProdError::PROD_ILLEGAL_LCS)
    );
}

#[test]
fn test_dmpu_full_hbk_after_user_data() {
    let mut hal = cm_device();
    let mut ws = Workspace::new();
    cc_prod_cmpu(&mut hal, &cmpu_request(), &mut ws.0).unwrap();
    hal.mmio_mut().power_cycle();

    let hbk: [u8; 32] = core::array::from_fn(|i| 0xc0 + i as u8);
    let context = &hbk[..16];
    let dmpu = DmpuData {
        kce: Asset::Package(package(OEM_KEY_LABEL, context, &KCE_ASSET_ID, &KCE)),
        ..dmpu_request(Hbk::Hbk(hbk))
    };
    cc_prod_dmpu(&mut hal, &dmpu, &mut ws.0).unwrap();

    let cc = hal.mmio();
    let icv = IcvManufactureFlags::from(cc.otp_word(otp::ICV_MANUFACTURE_FLAGS));
    assert!(icv.hbk0_not_in_use());
    let flags = OemProgrammedFlags::from(cc.otp_word(otp::OEM_PROGRAMMED_FLAGS));
    assert!(flags.kcp_not_in_use());
    assert_eq!(
        u32::from(flags.hbk_zero_count()),
        hbk.iter().map(|b| b.count_zeros()).sum::<u32>()
    );
    assert_eq!(cc.otp_words(otp::HBK, otp::HBK_WORDS), words_le(&hbk));
    assert_eq!(cc.otp_words(otp::KCE, 4), words_le(&KCE));
    assert_eq!(cc.otp_words(otp::KCP, 4), vec![0; 4]);
}

#[test]
fn test_dmpu_hbk_mode_must_match_icv() {
    let mut hal = cm_device();
    let mut ws = Workspace::new();
    cc_prod_cmpu(&mut hal, &cmpu_request(), &mut ws.0).unwrap();
    hal.mmio_mut().power_cycle();

    // HBK0 unused: HBK1 alone would leave the first half blank.
    assert_eq!(
        cc_prod_dmpu(&mut hal, &dmpu_request(Hbk::Hbk1(HBK1)), &mut ws.0),
        Err(ProdError::PROD_INVALID_PARAM)
    );
    assert_eq!(hal.mmio().otp_word(otp::OEM_PROGRAMMED_FLAGS), 0);
}

#[test]
fn test_dmpu_rejects_package_for_other_hbk() {
    let mut hal = cm_device();
    let mut ws = Workspace::new();
    let cmpu = CmpuData {
        unique_data: UniqueData::Hbk0(HBK0),
        ..cmpu_request()
    };
    cc_prod_cmpu(&mut hal, &cmpu, &mut ws.0).unwrap();
    hal.mmio_mut().power_cycle();
    let writes = hal.mmio().otp_write_count();

    let dmpu = DmpuData {
        kcp: Asset::Package(package(OEM_KEY_LABEL, &HBK0, &KCP_ASSET_ID, &KPICV)),
        ..dmpu_request(Hbk::Hbk1(HBK1))
    };
    assert_eq!(
        cc_prod_dmpu(&mut hal, &dmpu, &mut ws.0),
        Err(ProdError::PROD_ASSET_PKG_VERIFY)
    );
    assert_eq!(hal.mmio().otp_write_count(), writes);
}
