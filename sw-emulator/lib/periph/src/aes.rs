/*++

Licensed under the Apache-2.0 license.

File Name:

    aes.rs

Abstract:

    File contains the emulated AES engine: ECB, CBC, CTR, OFB, CBC-MAC and
    CMAC with software or RTL keys. Blocks are processed when the last
    DIN word is written; the engine is never observed busy.

--*/

use crate::helpers::{block_from_words_le, words_from_block_le};
use cc_prod_emu_crypto::{cmac_subkeys, xor_block, AesBlockCipher, AES_BLOCK_SIZE};
use cc_prod_registers::aes as regs;
use tock_registers::{register_bitfields, LocalRegisterCopy};

register_bitfields! [
    u32,
    Control [
        DEC_KEY0 OFFSET(0) NUMBITS(1) [],
        MODE OFFSET(2) NUMBITS(3) [
            ECB = 0,
            CBC = 1,
            CBC_MAC = 2,
            CTR = 3,
            OFB = 5,
            CMAC = 7,
        ],
        NK_KEY0 OFFSET(12) NUMBITS(2) [
            KEY_128 = 0,
            KEY_192 = 1,
            KEY_256 = 2,
        ],
    ],
];

const BLOCK_WORDS: usize = regs::BLOCK_WORDS;

/// AES peripheral implementation
pub struct Aes {
    key: [u32; regs::KEY_WORDS],
    iv: [u32; BLOCK_WORDS],
    ctr: [u32; BLOCK_WORDS],
    data_in: [u32; BLOCK_WORDS],
    data_out: [u32; BLOCK_WORDS],
    control: LocalRegisterCopy<u32, Control::Register>,
    sideload: bool,
    remaining: u32,
    cmac_subkeys: Option<([u8; AES_BLOCK_SIZE], [u8; AES_BLOCK_SIZE])>,
    rtl_key: [u8; 16],
    blocks_processed: u64,
}

impl Aes {
    pub fn new(rtl_key: [u8; 16]) -> Self {
        Self {
            key: [0; regs::KEY_WORDS],
            iv: [0; BLOCK_WORDS],
            ctr: [0; BLOCK_WORDS],
            data_in: [0; BLOCK_WORDS],
            data_out: [0; BLOCK_WORDS],
            control: LocalRegisterCopy::new(0),
            sideload: false,
            remaining: 0,
            cmac_subkeys: None,
            rtl_key,
            blocks_processed: 0,
        }
    }

    pub fn handles(offset: u32) -> bool {
        (regs::AES_KEY_0..=regs::AES_CMAC_SIZE0_KICK).contains(&offset)
            || (regs::DIN_BUFFER..regs::DIN_BUFFER + 16).contains(&offset)
            || (regs::DOUT_BUFFER..regs::DOUT_BUFFER + 16).contains(&offset)
    }

    pub fn read(&self, offset: u32) -> u32 {
        match offset {
            o if Self::in_array(o, regs::AES_KEY_0, regs::KEY_WORDS) => {
                self.key[Self::index(o, regs::AES_KEY_0)]
            }
            o if Self::in_array(o, regs::AES_IV_0, BLOCK_WORDS) => {
                self.iv[Self::index(o, regs::AES_IV_0)]
            }
            o if Self::in_array(o, regs::AES_CTR_0, BLOCK_WORDS) => {
                self.ctr[Self::index(o, regs::AES_CTR_0)]
            }
            o if Self::in_array(o, regs::DOUT_BUFFER, BLOCK_WORDS) => {
                self.data_out[Self::index(o, regs::DOUT_BUFFER)]
            }
            regs::AES_CONTROL => self.control.get(),
            regs::AES_SK => self.sideload as u32,
            regs::AES_REMAINING_BYTES => self.remaining,
            // AES_BUSY reads 0: operations complete synchronously.
            _ => 0,
        }
    }

    /// `enabled` is false while the engine clock is gated or the data path
    /// is routed elsewhere; data writes are then dropped.
    pub fn write(&mut self, offset: u32, val: u32, enabled: bool) {
        match offset {
            o if Self::in_array(o, regs::AES_KEY_0, regs::KEY_WORDS) => {
                self.key[Self::index(o, regs::AES_KEY_0)] = val
            }
            o if Self::in_array(o, regs::AES_IV_0, BLOCK_WORDS) => {
                self.iv[Self::index(o, regs::AES_IV_0)] = val
            }
            o if Self::in_array(o, regs::AES_CTR_0, BLOCK_WORDS) => {
                self.ctr[Self::index(o, regs::AES_CTR_0)] = val
            }
            o if Self::in_array(o, regs::DIN_BUFFER, BLOCK_WORDS) => {
                let index = Self::index(o, regs::DIN_BUFFER);
                self.data_in[index] = val;
                if enabled && index == BLOCK_WORDS - 1 {
                    self.process_block();
                }
            }
            regs::AES_CONTROL => {
                self.control.set(val);
                self.cmac_subkeys = None;
            }
            regs::AES_SK => self.sideload = val & 1 != 0,
            regs::AES_REMAINING_BYTES => self.remaining = val,
            regs::AES_CMAC_INIT if val & 1 != 0 && enabled => self.cmac_init(),
            regs::AES_CMAC_SIZE0_KICK if val & 1 != 0 && enabled => self.cmac_empty(),
            regs::AES_SW_RESET if val & 1 != 0 => *self = Self::new(self.rtl_key),
            _ => {}
        }
    }

    /// True when no key, IV or counter material is left in the registers.
    pub fn key_material_cleared(&self) -> bool {
        self.key.iter().chain(self.iv.iter()).chain(self.ctr.iter()).all(|w| *w == 0)
            && !self.sideload
    }

    pub fn blocks_processed(&self) -> u64 {
        self.blocks_processed
    }

    fn in_array(offset: u32, base: u32, words: usize) -> bool {
        offset >= base && offset < base + (words as u32) * 4
    }

    fn index(offset: u32, base: u32) -> usize {
        ((offset - base) / 4) as usize
    }

    fn cipher(&self) -> Option<AesBlockCipher> {
        if self.sideload {
            return AesBlockCipher::new(&self.rtl_key);
        }
        let key_words = match self.control.read_as_enum(Control::NK_KEY0) {
            Some(Control::NK_KEY0::Value::KEY_128) => 4,
            Some(Control::NK_KEY0::Value::KEY_192) => 6,
            Some(Control::NK_KEY0::Value::KEY_256) => 8,
            None => return None,
        };
        let key: Vec<u8> = self.key[..key_words]
            .iter()
            .flat_map(|w| w.to_le_bytes())
            .collect();
        AesBlockCipher::new(&key)
    }

    fn cmac_init(&mut self) {
        if let Some(cipher) = self.cipher() {
            self.cmac_subkeys = Some(cmac_subkeys(&cipher));
        }
    }

    fn cmac_empty(&mut self) {
        let (Some(cipher), Some((_, k2))) = (self.cipher(), self.cmac_subkeys) else {
            return;
        };
        let mut block = [0u8; AES_BLOCK_SIZE];
        block[0] = 0x80;
        xor_block(&mut block, &k2);
        let mut mac = block_from_words_le(&self.iv);
        xor_block(&mut mac, &block);
        cipher.encrypt_block(&mut mac);
        self.iv = words_from_block_le(&mac);
        self.blocks_processed += 1;
    }

    fn process_block(&mut self) {
        let Some(cipher) = self.cipher() else {
            return;
        };
        let decrypt = self.control.is_set(Control::DEC_KEY0);
        let input = block_from_words_le(&self.data_in);
        let valid = self.remaining.min(AES_BLOCK_SIZE as u32) as usize;
        self.remaining -= valid as u32;

        match self.control.read_as_enum(Control::MODE) {
            Some(Control::MODE::Value::ECB) => {
                let mut block = input;
                if decrypt {
                    cipher.decrypt_block(&mut block);
                } else {
                    cipher.encrypt_block(&mut block);
                }
                self.data_out = words_from_block_le(&block);
            }
            Some(Control::MODE::Value::CBC) => {
                let mut chain = block_from_words_le(&self.iv);
                let mut block = input;
                if decrypt {
                    cipher.decrypt_block(&mut block);
                    xor_block(&mut block, &chain);
                    chain = input;
                } else {
                    xor_block(&mut block, &chain);
                    cipher.encrypt_block(&mut block);
                    chain = block;
                }
                self.iv = words_from_block_le(&chain);
                self.data_out = words_from_block_le(&block);
            }
            Some(Control::MODE::Value::CBC_MAC) => {
                let mut mac = block_from_words_le(&self.iv);
                xor_block(&mut mac, &input);
                cipher.encrypt_block(&mut mac);
                self.iv = words_from_block_le(&mac);
            }
            Some(Control::MODE::Value::CMAC) => {
                let Some((k1, k2)) = self.cmac_subkeys else {
                    return;
                };
                let mut block = input;
                if self.remaining == 0 {
                    if valid == AES_BLOCK_SIZE {
                        xor_block(&mut block, &k1);
                    } else {
                        block[valid] = 0x80;
                        block[valid + 1..].fill(0);
                        xor_block(&mut block, &k2);
                    }
                }
                let mut mac = block_from_words_le(&self.iv);
                xor_block(&mut mac, &block);
                cipher.encrypt_block(&mut mac);
                self.iv = words_from_block_le(&mac);
            }
            Some(Control::MODE::Value::CTR) => {
                let counter = block_from_words_le(&self.ctr);
                let mut keystream = counter;
                cipher.encrypt_block(&mut keystream);
                let mut block = input;
                xor_block(&mut block, &keystream);
                let next = u128::from_be_bytes(counter).wrapping_add(1);
                self.ctr = words_from_block_le(&next.to_be_bytes());
                self.data_out = words_from_block_le(&block);
            }
            Some(Control::MODE::Value::OFB) => {
                let mut keystream = block_from_words_le(&self.iv);
                cipher.encrypt_block(&mut keystream);
                let mut block = input;
                xor_block(&mut block, &keystream);
                self.iv = words_from_block_le(&keystream);
                self.data_out = words_from_block_le(&block);
            }
            None => return,
        }
        self.blocks_processed += 1;
    }
}
