/*++

Licensed under the Apache-2.0 license.

File Name:

    dmpu.rs

Abstract:

    File contains the OEM provisioning flow (DMPU). Runs once in the device
    manufacture lifecycle state and burns the OEM HBK, the OEM keys, the
    OEM debug lock bits and the OEM minimum version into OTP.

--*/

use crate::config::{
    DMPU_WORKSPACE_MINIMUM_SIZE, KCE_ASSET_ID, KCP_ASSET_ID, OEM_KEY_LABEL, OEM_MAX_VERSION,
    PROD_UNIQUE_BUFF_SIZE,
};
use crate::pkg_verify::{resolve_asset, Asset};
use crate::util::{
    get_zero_count, merge_dcu_lock, otp_write_verify, stage_asset, thermometer_encode,
};
use crate::workspace::{Region, Workspace};
use cc_prod_drivers::printer::HexWord;
use cc_prod_drivers::{cprintln, CcHal, CcMmio, Lifecycle, ProdError, ProdResult, WaitStrategy};
use cc_prod_error::status_code;
use cc_prod_registers::host::DCU_WORDS;
use cc_prod_registers::otp::{self, IcvManufactureFlags, OemProgrammedFlags};

/// Hash of the OEM public key.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Hbk {
    /// 128-bit HBK1, next to the ICV's HBK0.
    Hbk1([u8; 16]),
    /// 256-bit HBK, only when the ICV left HBK0 unused.
    Hbk([u8; 32]),
}

impl Hbk {
    fn bytes(&self) -> &[u8] {
        match self {
            Self::Hbk1(bytes) => bytes,
            Self::Hbk(bytes) => bytes,
        }
    }

    fn otp_word(&self) -> u32 {
        match self {
            Self::Hbk1(_) => otp::HBK1,
            Self::Hbk(_) => otp::HBK,
        }
    }

    fn region(&self) -> Region {
        match self {
            Self::Hbk1(_) => Region::new(HBK.offset, otp::HBK1_WORDS),
            Self::Hbk(_) => HBK,
        }
    }

    /// Package context for the OEM keys.
    pub fn context(&self) -> &[u8] {
        &self.bytes()[..PROD_UNIQUE_BUFF_SIZE]
    }
}

/// DMPU request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct DmpuData {
    pub hbk: Hbk,
    pub kcp: Asset,
    pub kce: Asset,
    /// Minimum OEM software version, at most `OEM_MAX_VERSION`.
    pub oem_min_version: u32,
    /// Requested debug lock bits. Bits the ICV owns are dropped.
    pub oem_dcu_default_lock: [u32; DCU_WORDS],
}

const HBK: Region = Region::new(0, otp::HBK_WORDS);
const KCP: Region = HBK.next(otp::KEY_WORDS);
const KCE: Region = KCP.next(otp::KEY_WORDS);
const DCU_LOCK: Region = KCE.next(otp::DCU_LOCK_WORDS);
const MIN_VERSION: Region = DCU_LOCK.next(otp::OEM_MIN_VERSION_WORDS);

/// Run the DMPU flow.
///
/// # Arguments
///
/// * `hal` - Hardware abstraction over the CryptoCell register window
/// * `data` - Provisioning request
/// * `workspace` - Word aligned scratch buffer of at least
///   `DMPU_WORKSPACE_MINIMUM_SIZE` bytes. Wiped before returning.
pub fn cc_prod_dmpu<M: CcMmio, W: WaitStrategy>(
    hal: &mut CcHal<M, W>,
    data: &DmpuData,
    workspace: &mut [u8],
) -> ProdResult<()> {
    cprintln!("[dmpu] ++");
    let result = dmpu(hal, data, workspace);
    if let Err(err) = result {
        cprintln!("[dmpu] failed {}", HexWord(err.into()));
    }
    cprintln!("[dmpu] --");
    result
}

/// `cc_prod_dmpu` over a spin-waiting HAL, returning the raw status word
/// (0 on success).
pub fn cc_prod_dmpu_status<M: CcMmio>(mmio: M, data: &DmpuData, workspace: &mut [u8]) -> u32 {
    let mut hal = CcHal::with_spin_wait(mmio);
    status_code(cc_prod_dmpu(&mut hal, data, workspace))
}

fn dmpu<M: CcMmio, W: WaitStrategy>(
    hal: &mut CcHal<M, W>,
    data: &DmpuData,
    workspace: &mut [u8],
) -> ProdResult<()> {
    if data.oem_min_version > OEM_MAX_VERSION {
        return Err(ProdError::PROD_INVALID_PARAM);
    }
    let mut ws = Workspace::new(workspace, DMPU_WORKSPACE_MINIMUM_SIZE)?;

    if !hal.soc_ifc().ids_match() {
        return Err(ProdError::PROD_HAL_FATAL);
    }
    let lcs = hal.soc_ifc().lifecycle()?;
    if lcs != Lifecycle::DeviceManufacture {
        cprintln!("[dmpu] illegal lifecycle");
        return Err(ProdError::PROD_ILLEGAL_LCS);
    }

    let icv_flags = IcvManufactureFlags::from(hal.otp().read_word(otp::ICV_MANUFACTURE_FLAGS)?);
    let hbk_allowed = match data.hbk {
        Hbk::Hbk1(_) => !icv_flags.hbk0_not_in_use(),
        Hbk::Hbk(_) => icv_flags.hbk0_not_in_use(),
    };
    if !hbk_allowed {
        cprintln!("[dmpu] HBK mode conflicts with ICV flags {}", HexWord(icv_flags.into()));
        return Err(ProdError::PROD_INVALID_PARAM);
    }

    let mut flags = OemProgrammedFlags::default();

    let hbk_region = data.hbk.region();
    ws.store_le(hbk_region, data.hbk.bytes())?;
    flags.set_hbk_zero_count(get_zero_count(ws.words(hbk_region)?)? as u8);

    let icv_mask = hal.soc_ifc().icv_dcu_restriction_mask();
    let mut current = [0u32; DCU_WORDS];
    hal.otp().read_words(otp::DCU_LOCK, &mut current)?;
    let oem_mask: [u32; DCU_WORDS] = core::array::from_fn(|i| !icv_mask[i]);
    ws.words_mut(DCU_LOCK)?.copy_from_slice(&merge_dcu_lock(
        &current,
        &data.oem_dcu_default_lock,
        &oem_mask,
    ));

    cprintln!("[dmpu] keys");
    {
        let mut aes = hal.aes()?;
        let context = data.hbk.context();
        let kcp = resolve_asset(&mut aes, &data.kcp, OEM_KEY_LABEL, context, &KCP_ASSET_ID)?;
        match stage_asset(&mut ws, KCP, kcp)? {
            Some(zeros) => flags.set_kcp_zero_count(zeros),
            None => flags.set_kcp_not_in_use(true),
        }
        let kce = resolve_asset(&mut aes, &data.kce, OEM_KEY_LABEL, context, &KCE_ASSET_ID)?;
        match stage_asset(&mut ws, KCE, kce)? {
            Some(zeros) => flags.set_kce_zero_count(zeros),
            None => flags.set_kce_not_in_use(true),
        }
    }

    thermometer_encode(
        data.oem_min_version,
        OEM_MAX_VERSION,
        ws.words_mut(MIN_VERSION)?,
    )?;

    let flag_word = u32::from(flags);
    cprintln!("[dmpu] commit flags {}", HexWord(flag_word));
    otp_write_verify(hal, otp::OEM_PROGRAMMED_FLAGS, &[flag_word])?;
    otp_write_verify(hal, data.hbk.otp_word(), ws.words(hbk_region)?)?;
    if !flags.kcp_not_in_use() {
        otp_write_verify(hal, otp::KCP, ws.words(KCP)?)?;
    }
    if !flags.kce_not_in_use() {
        otp_write_verify(hal, otp::KCE, ws.words(KCE)?)?;
    }
    otp_write_verify(hal, otp::DCU_LOCK, ws.words(DCU_LOCK)?)?;
    otp_write_verify(hal, otp::OEM_MIN_VERSION, ws.words(MIN_VERSION)?)?;
    Ok(())
}
