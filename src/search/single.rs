use hashbrown::HashMap;
use tracing::debug;

use super::{ChainingFunction, CollisionRecord, ProbeBudget, SearchConfig};
use crate::{Error, Result};

/// Find two blocks compressing to the same chaining state
///
/// Enumerates candidate blocks in increasing numeric order, keeping a map of every
/// state reached, and returns the first repeat. At most 2^(8 * block_size) probes
/// are made (expected around 2^(4 * block_size) by the birthday bound).
pub fn find_single_block_collision<C: ChainingFunction>(
    chain: &C,
    initial: &C::State,
    config: &SearchConfig,
) -> Result<CollisionRecord<C::State>> {
    let mut budget = ProbeBudget::new(config.max_tries());
    let mut seen: HashMap<C::State, u64> = HashMap::new();

    for candidate in 0..config.candidates() {
        budget.spend()?;

        let block = config.block(candidate);
        let state = chain.compress(initial, &block)?;

        if let Some(&prev) = seen.get(&state) {
            budget.found();
            debug!(tries = budget.used(), state = ?budget.state(), "single-block collision");
            return Ok(CollisionRecord::new(config.block(prev), block, state));
        }

        seen.insert(state, candidate);
    }

    Err(Error::SearchExhausted {
        tries: budget.used(),
    })
}
