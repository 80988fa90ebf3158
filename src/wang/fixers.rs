use tracing::trace;

use super::{bit_of, check_rule, constrained_bits, verify, CORRECTIONS, ROUND_ONE_STEPS};
use crate::md4::{
    compress, forward_step, inverse_step, message_index, shift, Register, State, StepContext,
    Trace, BLOCK_WORDS,
};
use crate::Result;

/// Compression step computing a5
pub const A5_STEP: usize = 16;

/// Compression step computing d5
pub const D5_STEP: usize = 17;

/// Round-two steps corrected by multi-step modification, in processing order
pub const FIXED_STEPS: [usize; 2] = [A5_STEP, D5_STEP];

/// Correct the a5 conditions by modifying m0 and re-deriving m1..m4
pub fn fix_a5(initial: &State, words: &[u32; BLOCK_WORDS]) -> Result<[u32; BLOCK_WORDS]> {
    fix_step(initial, words, A5_STEP)
}

/// Correct the d5 conditions by modifying m4 and re-deriving m5..m8
pub fn fix_d5(initial: &State, words: &[u32; BLOCK_WORDS]) -> Result<[u32; BLOCK_WORDS]> {
    fix_step(initial, words, D5_STEP)
}

/// Multi-step modification of a round-two step
///
/// For each constrained bit (ascending order) that does not hold, the message word
/// of `step` is moved by +/-2^(bit - shift), which flips exactly that bit of the
/// step output. The same word feeds a round-one step, whose output changes; the
/// next four round-one words are re-derived so every later round-one state is kept.
///
/// After each bit the trace is recomputed and all earlier steps plus the bits fixed
/// so far are re-verified. A violation is returned as `CorrectionConflict`.
pub fn fix_step(
    initial: &State,
    words: &[u32; BLOCK_WORDS],
    step: usize,
) -> Result<[u32; BLOCK_WORDS]> {
    let mut words = *words;
    let index = message_index(step);
    let row = &CORRECTIONS[step];

    for (bit, rule) in constrained_bits(row) {
        let (_, trace) = compress(initial, &words);
        let value = trace.output(step);

        if let Some(want) = rule.expected(bit, trace.before(step)) {
            if bit_of(value, bit) != want {
                let delta = 1_u32 << ((bit + 32 - shift(step)) % 32);
                words[index] = if want {
                    words[index].wrapping_add(delta)
                } else {
                    words[index].wrapping_sub(delta)
                };
                cascade(&trace, &mut words, index);
            }
        }

        let (_, trace) = compress(initial, &words);
        let checked = verify(&trace, 0..step).and_then(|_| {
            constrained_bits(row)
                .take_while(|(fixed, _)| *fixed <= bit)
                .try_for_each(|(fixed, _)| check_rule(&trace, step, fixed))
        });
        if let Err(err) = checked {
            trace!(step, bit, "multi-step modification conflict");
            return Err(err);
        }
    }

    Ok(words)
}

// Recompute the round-one step consuming `words[index]`, then re-derive the words of
// the following four steps so their outputs match the original trace
fn cascade(original: &Trace, words: &mut [u32; BLOCK_WORDS], index: usize) {
    let mut state = *original.before(index);
    let ctx = StepContext::from_state(&state, index);
    state.set(
        Register::for_step(index),
        forward_step(&ctx, words[message_index(index)], index),
    );

    let last = core::cmp::min(index + 4, ROUND_ONE_STEPS - 1);
    for step in index + 1..=last {
        let ctx = StepContext::from_state(&state, step);
        let target = original.output(step);
        words[message_index(step)] = inverse_step(target, &ctx, step);
        state.set(Register::for_step(step), target);
    }
}

/// Apply round-one correction followed by every round-two fixer
pub fn satisfy_conditions(
    initial: &State,
    words: &[u32; BLOCK_WORDS],
) -> Result<[u32; BLOCK_WORDS]> {
    let mut words = super::correct_round_one(initial, words)?;
    for &step in FIXED_STEPS.iter() {
        words = fix_step(initial, &words, step)?;
    }
    Ok(words)
}
