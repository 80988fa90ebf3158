use core::ops::Range;

use super::{CorrectionRow, Rule, CORRECTIONS, ROUND_ONE_STEPS, WORD_BITS};
use crate::md4::{
    compress, forward_step, inverse_step, message_index, Register, State, StepContext, Trace,
    BLOCK_WORDS,
};
use crate::{Error, Result};

/// Apply a correction row to a step output
///
/// Forces or copies every constrained bit, leaving the others untouched.
/// `reference` is the chaining state before the step executes.
pub fn apply_corrections(value: u32, reference: &State, row: &CorrectionRow) -> u32 {
    row.iter()
        .enumerate()
        .fold(value, |acc, (bit, rule)| rule.apply(acc, bit as u32, reference))
}

/// Single-step modification of round one
///
/// Walks the sixteen round-one steps, corrects each output, and back-derives the
/// message word producing the corrected output. The forward trace is then
/// recomputed from the adjusted words and every round-one condition re-verified.
pub fn correct_round_one(
    initial: &State,
    words: &[u32; BLOCK_WORDS],
) -> Result<[u32; BLOCK_WORDS]> {
    let mut words = *words;
    let mut state = *initial;

    for step in 0..ROUND_ONE_STEPS {
        let ctx = StepContext::from_state(&state, step);
        let index = message_index(step);
        let out = apply_corrections(
            forward_step(&ctx, words[index], step),
            &state,
            &CORRECTIONS[step],
        );
        words[index] = inverse_step(out, &ctx, step);
        state.set(Register::for_step(step), out);
    }

    let (_, trace) = compress(initial, &words);
    verify(&trace, 0..ROUND_ONE_STEPS)?;

    Ok(words)
}

// Check one bit condition of a step against a trace
//
// `step < CORRECTION_ROWS` and `bit < WORD_BITS`
pub(crate) fn check_rule(trace: &Trace, step: usize, bit: u32) -> Result<()> {
    let rule: Rule = CORRECTIONS[step][bit as usize];
    if rule.holds(trace.output(step), bit, trace.before(step)) {
        Ok(())
    } else {
        Err(Error::CorrectionConflict { step, bit })
    }
}

/// Verify every condition of the given steps, reporting the first violation
///
/// `steps` must lie within `0..CORRECTION_ROWS`.
pub fn verify(trace: &Trace, steps: Range<usize>) -> Result<()> {
    for step in steps {
        for bit in 0..WORD_BITS as u32 {
            check_rule(trace, step, bit)?;
        }
    }
    Ok(())
}
