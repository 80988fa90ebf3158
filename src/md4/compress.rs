use alloc::vec::Vec;

use super::*;
use crate::Result;

/// Ordered, append-only register trace of one compressed block
///
/// Holds the initial state followed by the state after each of the 48 steps.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Trace {
    states: Vec<State>,
}

impl Trace {
    fn with_initial(initial: State) -> Self {
        let mut states = Vec::with_capacity(STEPS + 1);
        states.push(initial);
        Self { states }
    }

    fn push(&mut self, state: State) {
        self.states.push(state);
    }

    /// All recorded states, initial state first
    pub fn states(&self) -> &[State] {
        &self.states
    }

    /// State before the first step
    pub fn initial(&self) -> &State {
        &self.states[0]
    }

    /// State before `step` executes
    ///
    /// Panics if `step >= STEPS`.
    pub fn before(&self, step: usize) -> &State {
        &self.states[step]
    }

    /// State after `step` executes
    ///
    /// Panics if `step >= STEPS`.
    pub fn after(&self, step: usize) -> &State {
        &self.states[step + 1]
    }

    /// Value written by `step`
    ///
    /// Panics if `step >= STEPS`.
    pub fn output(&self, step: usize) -> u32 {
        self.after(step).get(Register::for_step(step))
    }

    /// Register value in attack notation: `a_i`, `b_i`, `c_i`, `d_i`
    ///
    /// Index 0 is the initial value, index i (1..=12) the value after the i-th update
    /// of the register. Panics if `index > 12`.
    pub fn register(&self, reg: Register, index: usize) -> u32 {
        if index == 0 {
            return self.initial().get(reg);
        }
        let offset = match reg {
            Register::A => 0,
            Register::D => 1,
            Register::C => 2,
            Register::B => 3,
        };
        self.output(4 * (index - 1) + offset)
    }

    /// Chaining state after the feed-forward
    pub fn final_state(&self) -> State {
        self.initial().wrapping_add(&self.states[STEPS])
    }
}

/// Compress a single block of words from the given chaining state
///
/// Returns the chaining state after the feed-forward and the full step trace.
pub fn compress(initial: &State, words: &[u32; BLOCK_WORDS]) -> (State, Trace) {
    let mut trace = Trace::with_initial(*initial);
    let mut state = *initial;

    for step in 0..STEPS {
        let ctx = StepContext::from_state(&state, step);
        let out = forward_step(&ctx, words[message_index(step)], step);
        state.set(Register::for_step(step), out);
        trace.push(state);
    }

    (trace.final_state(), trace)
}

/// Compute the MD4 digest of a message, keeping the trace of every block
pub fn digest_with_trace(msg: &[u8], endian: Endian) -> Result<([u8; DIGEST_LEN], Vec<Trace>)> {
    let blocks = message_words(&pad(msg, endian)?, endian)?;
    let mut traces = Vec::with_capacity(blocks.len());
    let mut state = INIT_STATE;

    for words in blocks.iter() {
        let (next, trace) = compress(&state, words);
        traces.push(trace);
        state = next;
    }

    Ok((state.to_bytes(endian), traces))
}

/// Compute the MD4 digest of a message
pub fn digest(msg: &[u8], endian: Endian) -> Result<[u8; DIGEST_LEN]> {
    digest_with_trace(msg, endian).map(|(digest, _)| digest)
}

/// Compress a single block from the standard IV, without padding
///
/// Short blocks are zero-extended to 64 bytes.
pub fn digest_block(block: &[u8], endian: Endian) -> Result<[u8; DIGEST_LEN]> {
    let words = decode_words(&zero_extend(block)?, endian)?;
    let (state, _) = compress(&INIT_STATE, &words);
    Ok(state.to_bytes(endian))
}
