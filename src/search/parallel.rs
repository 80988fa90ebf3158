use core::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard};
use std::thread;

use hashbrown::HashMap;
use tracing::debug;

use super::{ChainingFunction, CollisionRecord, SearchConfig};
use crate::{Error, Result};

// Shared state of the worker pool
struct Shared<S> {
    seen: Mutex<HashMap<S, u64>>,
    winner: Mutex<Option<(u64, u64, S)>>,
    failure: Mutex<Option<Error>>,
    done: AtomicBool,
    probes: AtomicU64,
}

// Poisoning only means another worker panicked; the map itself stays consistent
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}

/// Multi-threaded single-block collision search
///
/// The candidate space is split into `workers` disjoint contiguous ranges. Workers
/// share one digest map behind a mutex, a cancellation flag checked before each
/// candidate, and a probe counter bounded by `max_tries`. The first worker to see
/// a repeated state wins; no ordering between workers is guaranteed.
///
/// At most one worker per candidate block is spawned.
pub fn find_single_block_collision<C>(
    chain: &C,
    initial: &C::State,
    config: &SearchConfig,
    workers: usize,
) -> Result<CollisionRecord<C::State>>
where
    C: ChainingFunction + Sync,
    C::State: Send + Sync,
{
    let total = config.candidates();
    let workers = (core::cmp::max(workers, 1) as u64).min(total);
    let span = (total + workers - 1) / workers;

    let shared = Shared {
        seen: Mutex::new(HashMap::new()),
        winner: Mutex::new(None),
        failure: Mutex::new(None),
        done: AtomicBool::new(false),
        probes: AtomicU64::new(0),
    };

    thread::scope(|scope| {
        for worker in 0..workers {
            let lo = worker * span;
            let hi = core::cmp::min(lo + span, total);
            let shared = &shared;
            scope.spawn(move || search_range(chain, initial, config, lo..hi, shared));
        }
    });

    let failure = lock(&shared.failure).take();
    if let Some(err) = failure {
        return Err(err);
    }

    let winner = lock(&shared.winner).take();
    match winner {
        Some((prev, candidate, state)) => {
            debug!(workers, "parallel single-block collision");
            Ok(CollisionRecord::new(
                config.block(prev),
                config.block(candidate),
                state,
            ))
        }
        None => Err(Error::SearchExhausted {
            tries: core::cmp::min(shared.probes.load(Ordering::Acquire), config.max_tries()),
        }),
    }
}

fn search_range<C: ChainingFunction>(
    chain: &C,
    initial: &C::State,
    config: &SearchConfig,
    range: core::ops::Range<u64>,
    shared: &Shared<C::State>,
) {
    for candidate in range {
        if shared.done.load(Ordering::Acquire) {
            return;
        }
        if shared.probes.fetch_add(1, Ordering::AcqRel) >= config.max_tries() {
            return;
        }

        let state = match chain.compress(initial, &config.block(candidate)) {
            Ok(state) => state,
            Err(err) => {
                lock(&shared.failure).get_or_insert(err);
                shared.done.store(true, Ordering::Release);
                return;
            }
        };

        let mut seen = lock(&shared.seen);
        if let Some(&prev) = seen.get(&state) {
            lock(&shared.winner).get_or_insert((prev, candidate, state));
            shared.done.store(true, Ordering::Release);
            return;
        }
        seen.insert(state, candidate);
    }
}
