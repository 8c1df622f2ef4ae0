/*++

Licensed under the Apache-2.0 license.

File Name:

    cmpu.rs

Abstract:

    File contains the ICV manufacturing provisioning flow (CMPU). Runs
    once in the chip manufacture lifecycle state and burns the HUK, HBK0,
    the ICV keys, the ICV debug lock, the ICV minimum version and the ICV
    configuration word into OTP.

--*/

use crate::config::{
    CMPU_WORKSPACE_MINIMUM_SIZE, HUK_ENTROPY_SIZE, ICV_KEY_LABEL, ICV_MAX_VERSION,
    KCEICV_ASSET_ID, KPICV_ASSET_ID, PROD_UNIQUE_BUFF_SIZE,
};
use crate::derivation::{generate, instantiate};
use crate::pkg_verify::{resolve_asset, Asset};
use crate::util::{
    get_zero_count, merge_dcu_lock, otp_write_verify, stage_asset, thermometer_encode,
};
use crate::workspace::{Region, Workspace};
use cc_prod_drivers::printer::HexWord;
use cc_prod_drivers::{cprintln, CcHal, CcMmio, Lifecycle, ProdError, ProdResult, WaitStrategy};
use cc_prod_error::status_code;
use cc_prod_registers::host::DCU_WORDS;
use cc_prod_registers::otp::{self, IcvManufactureFlags};
use zeroize::Zeroizing;

/// Per-device value that binds ICV packages to this chip.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum UniqueData {
    /// 128-bit hash of the ICV public key, burned as HBK0.
    Hbk0([u8; PROD_UNIQUE_BUFF_SIZE]),
    /// Opaque bytes used only as package context. HBK0 stays unused.
    UserData([u8; PROD_UNIQUE_BUFF_SIZE]),
}

impl UniqueData {
    pub fn bytes(&self) -> &[u8; PROD_UNIQUE_BUFF_SIZE] {
        match self {
            Self::Hbk0(bytes) | Self::UserData(bytes) => bytes,
        }
    }
}

/// CMPU request.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CmpuData {
    pub unique_data: UniqueData,
    pub kpicv: Asset,
    pub kceicv: Asset,
    /// Minimum ICV software version, at most `ICV_MAX_VERSION`.
    pub icv_min_version: u32,
    pub icv_config_word: u32,
    /// Requested debug lock bits. Bits outside the ICV restriction mask are
    /// dropped.
    pub icv_dcu_default_lock: [u32; DCU_WORDS],
}

const ENTROPY: Region = Region::new(0, HUK_ENTROPY_SIZE / 4);
const HUK: Region = ENTROPY.next(otp::HUK_WORDS);
const HBK0: Region = HUK.next(otp::HBK0_WORDS);
const KPICV: Region = HBK0.next(otp::KEY_WORDS);
const KCEICV: Region = KPICV.next(otp::KEY_WORDS);
const DCU_LOCK: Region = KCEICV.next(otp::DCU_LOCK_WORDS);
const MIN_VERSION: Region = DCU_LOCK.next(otp::ICV_MIN_VERSION_WORDS);

/// Run the CMPU flow.
///
/// # Arguments
///
/// * `hal` - Hardware abstraction over the CryptoCell register window
/// * `data` - Provisioning request
/// * `workspace` - Word aligned scratch buffer of at least
///   `CMPU_WORKSPACE_MINIMUM_SIZE` bytes. Wiped before returning.
pub fn cc_prod_cmpu<M: CcMmio, W: WaitStrategy>(
    hal: &mut CcHal<M, W>,
    data: &CmpuData,
    workspace: &mut [u8],
) -> ProdResult<()> {
    cprintln!("[cmpu] ++");
    let result = cmpu(hal, data, workspace);
    if let Err(err) = result {
        cprintln!("[cmpu] failed {}", HexWord(err.into()));
    }
    cprintln!("[cmpu] --");
    result
}

/// `cc_prod_cmpu` over a spin-waiting HAL, returning the raw status word
/// (0 on success).
pub fn cc_prod_cmpu_status<M: CcMmio>(mmio: M, data: &CmpuData, workspace: &mut [u8]) -> u32 {
    let mut hal = CcHal::with_spin_wait(mmio);
    status_code(cc_prod_cmpu(&mut hal, data, workspace))
}

fn cmpu<M: CcMmio, W: WaitStrategy>(
    hal: &mut CcHal<M, W>,
    data: &CmpuData,
    workspace: &mut [u8],
) -> ProdResult<()> {
    if data.icv_min_version > ICV_MAX_VERSION {
        return Err(ProdError::PROD_INVALID_PARAM);
    }
    let mut ws = Workspace::new(workspace, CMPU_WORKSPACE_MINIMUM_SIZE)?;

    if !hal.soc_ifc().ids_match() {
        return Err(ProdError::PROD_HAL_FATAL);
    }
    let lcs = hal.soc_ifc().lifecycle()?;
    if lcs != Lifecycle::ChipManufacture {
        cprintln!("[cmpu] illegal lifecycle");
        return Err(ProdError::PROD_ILLEGAL_LCS);
    }

    let mut flags = IcvManufactureFlags::default();

    cprintln!("[cmpu] HUK");
    hal.trng().collect(ws.bytes_mut(ENTROPY)?)?;
    {
        let mut aes = hal.aes()?;
        let mut state = instantiate(&mut aes, ws.bytes(ENTROPY)?)?;
        let mut huk = Zeroizing::new([0u8; otp::HUK_WORDS * 4]);
        generate(&mut aes, &mut state, &mut huk[..])?;
        ws.store_le(HUK, &huk[..])?;
    }
    flags.set_huk_zero_count(get_zero_count(ws.words(HUK)?)? as u8);

    match &data.unique_data {
        UniqueData::Hbk0(hbk0) => {
            ws.store_le(HBK0, hbk0)?;
            flags.set_hbk0_zero_count(get_zero_count(ws.words(HBK0)?)? as u8);
        }
        UniqueData::UserData(_) => flags.set_hbk0_not_in_use(true),
    }
    let icv_mask = hal.soc_ifc().icv_dcu_restriction_mask();
    ws.words_mut(DCU_LOCK)?.copy_from_slice(&merge_dcu_lock(
        &[0; DCU_WORDS],
        &data.icv_dcu_default_lock,
        &icv_mask,
    ));

    cprintln!("[cmpu] keys");
    {
        let mut aes = hal.aes()?;
        let context = data.unique_data.bytes();
        let kpicv = resolve_asset(&mut aes, &data.kpicv, ICV_KEY_LABEL, context, &KPICV_ASSET_ID)?;
        match stage_asset(&mut ws, KPICV, kpicv)? {
            Some(zeros) => flags.set_kpicv_zero_count(zeros),
            None => flags.set_kpicv_not_in_use(true),
        }
        let kceicv =
            resolve_asset(&mut aes, &data.kceicv, ICV_KEY_LABEL, context, &KCEICV_ASSET_ID)?;
        match stage_asset(&mut ws, KCEICV, kceicv)? {
            Some(zeros) => flags.set_kceicv_zero_count(zeros),
            None => flags.set_kceicv_not_in_use(true),
        }
    }

    thermometer_encode(
        data.icv_min_version,
        ICV_MAX_VERSION,
        ws.words_mut(MIN_VERSION)?,
    )?;

    let flag_word = u32::from(flags);
    cprintln!("[cmpu] commit flags {}", HexWord(flag_word));
    otp_write_verify(hal, otp::ICV_MANUFACTURE_FLAGS, &[flag_word])?;
    otp_write_verify(hal, otp::HUK, ws.words(HUK)?)?;
    if !flags.hbk0_not_in_use() {
        otp_write_verify(hal, otp::HBK0, ws.words(HBK0)?)?;
    }
    if !flags.kpicv_not_in_use() {
        otp_write_verify(hal, otp::KPICV, ws.words(KPICV)?)?;
    }
    if !flags.kceicv_not_in_use() {
        otp_write_verify(hal, otp::KCEICV, ws.words(KCEICV)?)?;
    }
    otp_write_verify(hal, otp::DCU_LOCK, ws.words(DCU_LOCK)?)?;
    otp_write_verify(hal, otp::ICV_MIN_VERSION, ws.words(MIN_VERSION)?)?;
    otp_write_verify(hal, otp::ICV_GENERAL_PURPOSE_CONFIG, &[data.icv_config_word])?;
    Ok(())
}
