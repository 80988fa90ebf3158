use alloc::vec::Vec;

use super::{Endian, BLOCK_LEN, BLOCK_WORDS};
use crate::{Error, Result};

// Offset of the length field inside the final padded block
const LEN_OFFSET: usize = BLOCK_LEN - 8;

/// Pad a message to a whole number of blocks
///
/// Appends a single one-bit (0x80), zero-fill to 56 mod 64,
/// then the 64-bit message bit-length in the given byte order.
///
/// Padding is not idempotent: padding an already padded message appends another block.
pub fn pad(msg: &[u8], endian: Endian) -> Result<Vec<u8>> {
    let bit_len = bit_length(msg.len())?;

    let zero_len = (LEN_OFFSET + BLOCK_LEN - (msg.len() + 1) % BLOCK_LEN) % BLOCK_LEN;
    let mut res = Vec::with_capacity(msg.len() + 1 + zero_len + 8);

    res.extend_from_slice(msg);
    res.push(0x80);
    res.resize(res.len() + zero_len, 0);
    res.extend_from_slice(&length_bytes(bit_len, endian));

    Ok(res)
}

/// Bit-length of a byte-length, failing when it does not fit the length field
pub fn bit_length(len: usize) -> Result<u64> {
    (len as u64).checked_mul(8).ok_or(Error::PaddingOverflow)
}

/// Encode a bit-length into the 8-byte length field
pub fn length_bytes(bit_len: u64, endian: Endian) -> [u8; 8] {
    match endian {
        Endian::Little => bit_len.to_le_bytes(),
        Endian::Big => bit_len.to_be_bytes(),
    }
}

/// Decode a 64-byte block into sixteen 32-bit words
pub fn decode_words(block: &[u8], endian: Endian) -> Result<[u32; BLOCK_WORDS]> {
    if block.len() != BLOCK_LEN {
        return Err(Error::InvalidBlockLength { len: block.len() });
    }

    let mut res = [0_u32; BLOCK_WORDS];
    for (word, chunk) in res.iter_mut().zip(block.chunks_exact(4)) {
        *word = word_from_bytes(chunk, endian);
    }

    Ok(res)
}

/// Encode sixteen 32-bit words into a 64-byte block
pub fn encode_words(words: &[u32; BLOCK_WORDS], endian: Endian) -> [u8; BLOCK_LEN] {
    let mut res = [0_u8; BLOCK_LEN];
    for (chunk, word) in res.chunks_exact_mut(4).zip(words.iter()) {
        chunk.copy_from_slice(&word_to_bytes(*word, endian));
    }
    res
}

/// Read a word from a 4-byte slice
///
/// Callers guarantee the slice length (chunks_exact)
pub(crate) fn word_from_bytes(bytes: &[u8], endian: Endian) -> u32 {
    let mut word = [0_u8; 4];
    word.copy_from_slice(&bytes[..4]);
    match endian {
        Endian::Little => u32::from_le_bytes(word),
        Endian::Big => u32::from_be_bytes(word),
    }
}

pub(crate) fn word_to_bytes(word: u32, endian: Endian) -> [u8; 4] {
    match endian {
        Endian::Little => word.to_le_bytes(),
        Endian::Big => word.to_be_bytes(),
    }
}

/// Zero-extend a short block to a full MD4 block
pub fn zero_extend(block: &[u8]) -> Result<[u8; BLOCK_LEN]> {
    if block.len() > BLOCK_LEN {
        return Err(Error::InvalidBlockLength { len: block.len() });
    }

    let mut res = [0_u8; BLOCK_LEN];
    res[..block.len()].copy_from_slice(block);

    Ok(res)
}

/// Split a padded message into blocks of decoded words
pub fn message_words(padded: &[u8], endian: Endian) -> Result<Vec<[u32; BLOCK_WORDS]>> {
    if padded.len() % BLOCK_LEN != 0 {
        return Err(Error::InvalidBlockLength { len: padded.len() });
    }

    padded
        .chunks_exact(BLOCK_LEN)
        .map(|block| decode_words(block, endian))
        .collect()
}
