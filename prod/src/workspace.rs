/*++

Licensed under the Apache-2.0 license.

File Name:

    workspace.rs

Abstract:

    File contains the caller supplied scratch buffer that stages key
    material between derivation and OTP commit.

--*/

use crate::config::WORKSPACE_ALIGNMENT;
use cc_prod_error::{ProdError, ProdResult};
use zerocopy::FromBytes;
use zeroize::Zeroize;

/// Word range inside the workspace.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Region {
    pub offset: usize,
    pub words: usize,
}

impl Region {
    pub const fn new(offset: usize, words: usize) -> Self {
        Self { offset, words }
    }

    /// Region that starts right after this one.
    pub const fn next(self, words: usize) -> Self {
        Self::new(self.offset + self.words * 4, words)
    }

    const fn end(self) -> usize {
        self.offset + self.words * 4
    }
}

/// Scratch buffer borrowed for one provisioning pass. The whole buffer is
/// wiped when the workspace is dropped, whatever the outcome of the flow.
pub struct Workspace<'a> {
    buf: &'a mut [u8],
}

impl<'a> Workspace<'a> {
    /// Accept `buf` if it is word aligned and at least `min_size` bytes.
    pub fn new(buf: &'a mut [u8], min_size: usize) -> ProdResult<Self> {
        if buf.len() < min_size || buf.as_ptr() as usize % WORKSPACE_ALIGNMENT != 0 {
            return Err(ProdError::PROD_INVALID_PARAM);
        }
        buf.zeroize();
        Ok(Self { buf })
    }

    pub fn bytes(&self, region: Region) -> ProdResult<&[u8]> {
        self.buf
            .get(region.offset..region.end())
            .ok_or(ProdError::PROD_INVALID_PARAM)
    }

    pub fn bytes_mut(&mut self, region: Region) -> ProdResult<&mut [u8]> {
        self.buf
            .get_mut(region.offset..region.end())
            .ok_or(ProdError::PROD_INVALID_PARAM)
    }

    pub fn words(&self, region: Region) -> ProdResult<&[u32]> {
        <[u32]>::ref_from_bytes(self.bytes(region)?).map_err(|_| ProdError::PROD_INVALID_PARAM)
    }

    pub fn words_mut(&mut self, region: Region) -> ProdResult<&mut [u32]> {
        <[u32]>::mut_from_bytes(self.bytes_mut(region)?).map_err(|_| ProdError::PROD_INVALID_PARAM)
    }

    /// Store `bytes` into `region` as little-endian words.
    pub fn store_le(&mut self, region: Region, bytes: &[u8]) -> ProdResult<()> {
        if bytes.len() != region.words * 4 {
            return Err(ProdError::PROD_INVALID_PARAM);
        }
        let words = self.words_mut(region)?;
        for (word, chunk) in words.iter_mut().zip(bytes.chunks_exact(4)) {
            *word = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
        }
        Ok(())
    }
}

impl Drop for Workspace<'_> {
    fn drop(&mut self) {
        self.buf.zeroize();
    }
}
