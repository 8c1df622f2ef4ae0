// Licensed under the Apache-2.0 license

use cc_prod_emu_crypto::AES_BLOCK_SIZE;

pub fn block_from_words_le(words: &[u32; 4]) -> [u8; AES_BLOCK_SIZE] {
    let mut result = [0u8; AES_BLOCK_SIZE];
    for (chunk, word) in result.chunks_exact_mut(4).zip(words) {
        chunk.copy_from_slice(&word.to_le_bytes());
    }
    result
}

pub fn words_from_block_le(bytes: &[u8; AES_BLOCK_SIZE]) -> [u32; 4] {
    let mut result = [0u32; 4];
    for (word, chunk) in result.iter_mut().zip(bytes.chunks_exact(4)) {
        *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    result
}
