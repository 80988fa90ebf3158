use super::*;
use crate::{Error, Result};

/// Incremental MD4 hasher
///
/// Can be seeded from any chaining state, which the collision search uses to
/// hash blocks appended to a known prefix.
#[derive(Clone, Debug)]
pub struct Md4 {
    h: State,
    block: [u8; BLOCK_LEN],
    index: usize,
    total_len: u64,
    endian: Endian,
}

impl Md4 {
    /// Create a new MD4 instance from the standard IV
    pub fn new(endian: Endian) -> Self {
        Self::from_state(INIT_STATE, endian)
    }

    /// Initialize MD4 from the given chaining state
    pub fn from_state(state: State, endian: Endian) -> Self {
        Self::resume(state, 0, endian)
    }

    /// Continue a hash from the chaining state left by a block-aligned prefix
    ///
    /// `prefix_len` is the bit-length of the prefix, counted in the final padding.
    pub fn resume(state: State, prefix_len: u64, endian: Endian) -> Self {
        Self {
            h: state,
            block: [0_u8; BLOCK_LEN],
            index: 0,
            total_len: prefix_len,
            endian,
        }
    }

    /// Provide input to MD4
    pub fn input(&mut self, msg: &[u8]) -> Result<()> {
        let msg_bits = bit_length(msg.len())?;
        self.total_len = self
            .total_len
            .checked_add(msg_bits)
            .ok_or(Error::PaddingOverflow)?;

        for chunk in msg.chunks(BLOCK_LEN) {
            let chunk_len = chunk.len();
            if self.index + chunk_len > BLOCK_LEN {
                let head = BLOCK_LEN - self.index;
                self.block[self.index..].copy_from_slice(&chunk[..head]);
                self.process_block()?;
                self.index = chunk_len - head;
                self.block[..self.index].copy_from_slice(&chunk[head..]);
            } else {
                self.block[self.index..self.index + chunk_len].copy_from_slice(chunk);
                self.index += chunk_len;
            }
            if self.index == BLOCK_LEN {
                self.process_block()?;
            }
        }

        Ok(())
    }

    fn process_block(&mut self) -> Result<()> {
        let words = decode_words(&self.block, self.endian)?;
        let (next, _) = compress(&self.h, &words);
        self.h = next;
        self.index = 0;
        self.block = [0_u8; BLOCK_LEN];
        Ok(())
    }

    /// Finalize the MD4 digest
    pub fn finalize(self) -> Result<[u8; DIGEST_LEN]> {
        let total_len = self.total_len;
        self.finalize_with_len(total_len)
    }

    /// Finalize the digest encoding the supplied bit-length in the padding
    ///
    /// Used to continue a hash from a chaining state whose prefix length is known
    /// to the caller but was not fed through this instance.
    pub fn finalize_with_len(mut self, total_len: u64) -> Result<[u8; DIGEST_LEN]> {
        self.block[self.index] = 0x80;
        // bytes past the index are already zero
        if self.index >= BLOCK_LEN - 8 {
            self.process_block()?;
        }
        self.block[BLOCK_LEN - 8..].copy_from_slice(&length_bytes(total_len, self.endian));
        self.process_block()?;

        Ok(self.h.to_bytes(self.endian))
    }

    /// Get the current chaining state
    pub fn state(&self) -> State {
        self.h
    }

    /// Get the total bit-length of the hashed message
    pub fn total_len(&self) -> u64 {
        self.total_len
    }

    /// Convenience function to calculate an MD4 digest
    pub fn digest(msg: &[u8], endian: Endian) -> Result<[u8; DIGEST_LEN]> {
        let mut hash = Self::new(endian);
        hash.input(msg)?;
        hash.finalize()
    }
}
