use super::ChainingFunction;
use crate::md4::{self, decode_words, zero_extend, Endian, State, INIT_STATE};
use crate::Result;

/// Full MD4 compression over zero-extended blocks
///
/// The 128-bit state makes brute-force collisions infeasible; this is the reference
/// chaining function for verifying multi-block constructions.
#[derive(Clone, Copy, Debug, Default)]
pub struct Md4Chain {
    endian: Endian,
}

impl Md4Chain {
    pub fn new(endian: Endian) -> Self {
        Self { endian }
    }
}

impl ChainingFunction for Md4Chain {
    type State = State;

    fn initial(&self) -> State {
        INIT_STATE
    }

    fn compress(&self, state: &State, block: &[u8]) -> Result<State> {
        let words = decode_words(&zero_extend(block)?, self.endian)?;
        Ok(md4::compress(state, &words).0)
    }
}

/// MD4 compression with a truncated chaining value
///
/// The chaining value is folded into register A of the IV, and the output is
/// register A of the compressed state truncated to `bits` bits. Small widths make
/// birthday searches tractable.
#[derive(Clone, Copy, Debug)]
pub struct TruncatedMd4 {
    bits: u32,
    mask: u32,
}

impl TruncatedMd4 {
    /// Create a truncated MD4 chaining function with a `bits`-wide state
    ///
    /// Widths above 32 are clamped to 32.
    pub fn new(bits: u32) -> Self {
        let bits = core::cmp::min(bits, 32);
        let mask = match bits {
            32 => u32::MAX,
            _ => (1_u32 << bits) - 1,
        };
        Self { bits, mask }
    }

    /// Width of the chaining state in bits
    pub fn bits(&self) -> u32 {
        self.bits
    }
}

impl ChainingFunction for TruncatedMd4 {
    type State = u32;

    fn initial(&self) -> u32 {
        INIT_STATE.a & self.mask
    }

    fn compress(&self, state: &u32, block: &[u8]) -> Result<u32> {
        let words = decode_words(&zero_extend(block)?, Endian::Little)?;
        let seed = State {
            a: INIT_STATE.a ^ state,
            ..INIT_STATE
        };
        Ok(md4::compress(&seed, &words).0.a & self.mask)
    }
}
