use alloc::vec::Vec;
use rand::RngCore;
use tracing::debug;

use super::{run_chain, ChainingFunction, CollisionRecord, ProbeBudget, SearchConfig};
use crate::{Error, Result};

/// Find a single block and an `n`-block message reaching the same chaining state
///
/// `message_a` is the single block, `message_b` is a random (n - 1)-block prefix
/// followed by a searched final block. Single-block candidates are taken in
/// increasing numeric order; each candidate gets a fresh random prefix, after which
/// every final block is tried. Prefix hashing is not counted against the budget.
///
/// `n` must be at least 2, and the (n - 1)-block prefix must fit in memory.
pub fn find_n_to_one_collision<C, R>(
    chain: &C,
    initial: &C::State,
    n: usize,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<CollisionRecord<C::State>>
where
    C: ChainingFunction,
    R: RngCore,
{
    if n < 2 {
        return Err(Error::InvalidBlockLength { len: n });
    }

    let mut long = config.buffer(n - 1)?;
    let mut budget = ProbeBudget::new(config.max_tries());

    for candidate in 0..config.candidates() {
        budget.spend()?;
        let single = config.block(candidate);
        let target = chain.compress(initial, &single)?;

        rng.fill_bytes(&mut long);
        let prefix_state = run_chain(chain, initial, &long, config.block_size())?;

        for last in 0..config.candidates() {
            budget.spend()?;
            let block = config.block(last);
            if chain.compress(&prefix_state, &block)? == target {
                long.extend_from_slice(&block);
                budget.found();
                debug!(n, tries = budget.used(), "n-to-1 collision");
                return Ok(CollisionRecord::new(single, long, target));
            }
        }
    }

    Err(Error::SearchExhausted {
        tries: budget.used(),
    })
}

/// Set of messages of varying block counts that all reach one chaining state
///
/// Level `i` (1-based) pairs a one-block message with a (2^(k - i) + 1)-block
/// message, so any choice of branches reaches the final state while the total
/// length ranges over k..=k + 2^k - 1 blocks.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ExpandableMessage<S> {
    levels: Vec<CollisionRecord<S>>,
    final_state: S,
    block_size: usize,
}

impl<S: Copy> ExpandableMessage<S> {
    /// Collision records of every level, first level first
    pub fn levels(&self) -> &[CollisionRecord<S>] {
        &self.levels
    }

    /// Chaining state reached by every branch choice
    pub fn final_state(&self) -> S {
        self.final_state
    }

    /// Block size the message was built with
    pub fn block_size(&self) -> usize {
        self.block_size
    }

    /// Shortest producible length, in blocks
    pub fn min_blocks(&self) -> usize {
        self.levels.len()
    }

    /// Longest producible length, in blocks
    pub fn max_blocks(&self) -> usize {
        self.levels
            .iter()
            .map(|level| level.message_b.len() / self.block_size)
            .sum()
    }

    /// Assemble a message choosing the long branch where `long[i]` is set
    pub fn produce(&self, long: &[bool]) -> Result<Vec<u8>> {
        if long.len() != self.levels.len() {
            return Err(Error::InvalidBlockLength { len: long.len() });
        }

        let mut res = Vec::new();
        for (level, &pick_long) in self.levels.iter().zip(long.iter()) {
            if pick_long {
                res.extend_from_slice(&level.message_b);
            } else {
                res.extend_from_slice(&level.message_a);
            }
        }

        Ok(res)
    }

    /// Assemble a message of exactly `blocks` blocks
    pub fn produce_len(&self, blocks: usize) -> Result<Vec<u8>> {
        if blocks < self.min_blocks() || blocks > self.max_blocks() {
            return Err(Error::InvalidBlockLength { len: blocks });
        }

        // level i adds 2^(k - i) blocks when long: pick by the binary expansion
        let extra = blocks - self.min_blocks();
        let k = self.levels.len();
        let long: Vec<bool> = (1..=k).map(|i| extra & (1 << (k - i)) != 0).collect();

        self.produce(&long)
    }
}

/// Build an expandable message of `levels` levels
///
/// Level i (1..=levels) is an N-to-1 collision with N = 2^(levels - i) + 1, searched
/// from the state reached by the previous level. Every level gets its own budget.
///
/// `levels` must be below the pointer width, so the longest branch length is
/// representable.
pub fn generate_expandable_message<C, R>(
    chain: &C,
    levels: usize,
    initial: &C::State,
    config: &SearchConfig,
    rng: &mut R,
) -> Result<ExpandableMessage<C::State>>
where
    C: ChainingFunction,
    R: RngCore,
{
    if levels >= usize::BITS as usize {
        return Err(Error::InvalidBlockLength { len: levels });
    }

    let mut state = *initial;
    let mut res = Vec::with_capacity(levels);

    for i in 1..=levels {
        let n = (1_usize << (levels - i)) + 1;
        let record = find_n_to_one_collision(chain, &state, n, config, rng)?;
        state = record.digest;
        debug!(level = i, blocks = n, "expandable message level");
        res.push(record);
    }

    Ok(ExpandableMessage {
        levels: res,
        final_state: state,
        block_size: config.block_size(),
    })
}
