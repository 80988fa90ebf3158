use alloc::vec::Vec;
use core::hash::Hash;

use crate::{Error, Result};

/// Chaining functions searched for collisions
mod chain;

/// Birthday search for single-block collisions
mod single;

/// N-to-1 collisions and expandable messages
mod multi;

/// Multi-threaded single-block search
#[cfg(feature = "std")]
pub mod parallel;

pub use chain::*;
pub use multi::*;
pub use single::*;

/// Largest searchable block, in bytes
///
/// The digest map of a single-block search holds up to 2^(8 * block_size) entries.
pub const MAX_BLOCK_SIZE: usize = 3;

/// Compression function with a chaining state small enough to collide by search
pub trait ChainingFunction {
    type State: Copy + Eq + Hash + core::fmt::Debug;

    /// Chaining state used when no prefix has been hashed
    fn initial(&self) -> Self::State;

    /// Compress one block into the chaining state
    fn compress(&self, state: &Self::State, block: &[u8]) -> Result<Self::State>;
}

/// Hash a whole message block-by-block through a chaining function
pub fn run_chain<C: ChainingFunction>(
    chain: &C,
    initial: &C::State,
    msg: &[u8],
    block_size: usize,
) -> Result<C::State> {
    if block_size == 0 || msg.len() % block_size != 0 {
        return Err(Error::InvalidBlockLength { len: msg.len() });
    }

    msg.chunks_exact(block_size)
        .try_fold(*initial, |state, block| chain.compress(&state, block))
}

/// Configuration of a brute-force collision search
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SearchConfig {
    block_size: usize,
    max_tries: u64,
}

impl SearchConfig {
    /// Create a validated search configuration
    ///
    /// `block_size` must be in 1..=MAX_BLOCK_SIZE bytes, `max_tries` bounds the number
    /// of compression probes.
    pub fn new(block_size: usize, max_tries: u64) -> Result<Self> {
        if block_size == 0 || block_size > MAX_BLOCK_SIZE {
            return Err(Error::InvalidBlockLength { len: block_size });
        }

        Ok(Self {
            block_size,
            max_tries,
        })
    }

    /// Create a configuration whose budget covers an exhaustive search
    pub fn exhaustive(block_size: usize) -> Result<Self> {
        let config = Self::new(block_size, 0)?;
        Ok(Self {
            max_tries: config.candidates(),
            ..config
        })
    }

    /// Byte-length of a candidate block
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Probe budget
    pub fn max_tries(&self) -> u64 {
        self.max_tries
    }

    /// Number of distinct candidate blocks: 2^(8 * block_size)
    pub fn candidates(&self) -> u64 {
        1_u64 << (8 * self.block_size)
    }

    /// Encode candidate `n` as a big-endian block of `block_size` bytes
    pub fn block(&self, n: u64) -> Vec<u8> {
        n.to_be_bytes()[8 - self.block_size..].to_vec()
    }

    /// Zero-filled buffer of `blocks` blocks
    ///
    /// Fails with `InvalidBlockLength` when the byte-length overflows or cannot be
    /// allocated.
    pub(crate) fn buffer(&self, blocks: usize) -> Result<Vec<u8>> {
        let len = blocks
            .checked_mul(self.block_size)
            .ok_or(Error::InvalidBlockLength { len: blocks })?;

        let mut res = Vec::new();
        res.try_reserve_exact(len)
            .map_err(|_| Error::InvalidBlockLength { len: blocks })?;
        res.resize(len, 0);

        Ok(res)
    }
}

// Progress of a collision search
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum SearchState {
    Searching,
    Found,
}

/// Probe counter enforcing the search budget
#[derive(Debug)]
pub(crate) struct ProbeBudget {
    max: u64,
    used: u64,
    state: SearchState,
}

impl ProbeBudget {
    pub(crate) fn new(max: u64) -> Self {
        Self {
            max,
            used: 0,
            state: SearchState::Searching,
        }
    }

    /// Account for one probe, failing once the budget is spent
    pub(crate) fn spend(&mut self) -> Result<()> {
        if self.used >= self.max {
            return Err(Error::SearchExhausted { tries: self.used });
        }
        self.used += 1;
        Ok(())
    }

    pub(crate) fn found(&mut self) {
        self.state = SearchState::Found;
    }

    pub(crate) fn used(&self) -> u64 {
        self.used
    }

    pub(crate) fn state(&self) -> SearchState {
        self.state
    }
}

/// Two distinct messages reaching the same digest or chaining state
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CollisionRecord<D> {
    pub message_a: Vec<u8>,
    pub message_b: Vec<u8>,
    pub digest: D,
}

impl<D> CollisionRecord<D> {
    pub fn new(message_a: Vec<u8>, message_b: Vec<u8>, digest: D) -> Self {
        Self {
            message_a,
            message_b,
            digest,
        }
    }
}
