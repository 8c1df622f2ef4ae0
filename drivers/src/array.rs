/*++

Licensed under the Apache-2.0 license.

File Name:

    array.rs

Abstract:

    File contains word arrays holding key material in register (little
    endian) order.

--*/

use zeroize::Zeroize;

macro_rules! le_array4 {
    ($name:ident, $words:literal) => {
        #[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Zeroize)]
        pub struct $name(pub [u32; $words]);

        impl $name {
            pub const WORDS: usize = $words;
            pub const BYTES: usize = $words * 4;

            pub const fn new(val: [u32; $words]) -> Self {
                Self(val)
            }

            pub fn from_le_bytes(bytes: &[u8; $words * 4]) -> Self {
                let mut result = Self::default();
                for (word, chunk) in result.0.iter_mut().zip(bytes.chunks_exact(4)) {
                    *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                }
                result
            }

            pub fn to_le_bytes(&self) -> [u8; $words * 4] {
                let mut result = [0u8; $words * 4];
                for (chunk, word) in result.chunks_exact_mut(4).zip(self.0.iter()) {
                    chunk.copy_from_slice(&word.to_le_bytes());
                }
                result
            }

            pub fn as_words(&self) -> &[u32] {
                &self.0
            }
        }

        impl From<[u8; $words * 4]> for $name {
            fn from(value: [u8; $words * 4]) -> Self {
                Self::from_le_bytes(&value)
            }
        }

        impl From<$name> for [u32; $words] {
            fn from(value: $name) -> Self {
                value.0
            }
        }
    };
}

le_array4!(LEArray4x4, 4);
le_array4!(LEArray4x8, 8);
