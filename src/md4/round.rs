use super::{Register, State};

/// Additive constant for round two
pub const ROUND_TWO_K: u32 = 0x5a82_7999;

/// Additive constant for round three
pub const ROUND_THREE_K: u32 = 0x6ed9_eba1;

/// Per-round additive constants
pub const ROUND_K: [u32; 3] = [0, ROUND_TWO_K, ROUND_THREE_K];

/// Message word consumed by each step, per round
pub const MSG_INDEX: [[usize; 16]; 3] = [
    [0, 1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14, 15],
    [0, 4, 8, 12, 1, 5, 9, 13, 2, 6, 10, 14, 3, 7, 11, 15],
    [0, 8, 4, 12, 2, 10, 6, 14, 1, 9, 5, 13, 3, 11, 7, 15],
];

/// Left-rotation amounts, per round, for the A, D, C, B updates
pub const SHIFTS: [[u32; 4]; 3] = [[3, 7, 11, 19], [3, 5, 9, 13], [3, 9, 11, 15]];

/// Round one boolean function: bitwise conditional
#[inline]
pub fn f(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (!x & z)
}

/// Round two boolean function: bitwise majority
#[inline]
pub fn g(x: u32, y: u32, z: u32) -> u32 {
    (x & y) | (x & z) | (y & z)
}

/// Round three boolean function: parity
#[inline]
pub fn h(x: u32, y: u32, z: u32) -> u32 {
    x ^ y ^ z
}

/// Round (0, 1, 2) a step belongs to
#[inline]
pub const fn round_of(step: usize) -> usize {
    step / 16
}

/// Index of the message word consumed at the given step
#[inline]
pub const fn message_index(step: usize) -> usize {
    MSG_INDEX[round_of(step)][step % 16]
}

/// Left-rotation applied at the given step
#[inline]
pub const fn shift(step: usize) -> u32 {
    SHIFTS[round_of(step)][step % 4]
}

/// Inputs of a single step, excluding the message word
///
/// `old` is the previous value of the register being updated,
/// `x`, `y` and `z` are the boolean function arguments in order.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct StepContext {
    pub old: u32,
    pub x: u32,
    pub y: u32,
    pub z: u32,
}

impl StepContext {
    /// Create a step context from explicit register values
    pub const fn new(old: u32, x: u32, y: u32, z: u32) -> Self {
        Self { old, x, y, z }
    }

    /// Build the context of `step` from the current chaining state
    ///
    /// A-steps use (B, C, D), D-steps (A, B, C), C-steps (D, A, B), B-steps (C, D, A)
    pub fn from_state(state: &State, step: usize) -> Self {
        let State { a, b, c, d } = *state;
        match Register::for_step(step) {
            Register::A => Self::new(a, b, c, d),
            Register::D => Self::new(d, a, b, c),
            Register::C => Self::new(c, d, a, b),
            Register::B => Self::new(b, c, d, a),
        }
    }

    // Boolean function plus round constant for the given step
    fn mix(&self, step: usize) -> u32 {
        let round = round_of(step);
        let out = match round {
            0 => f(self.x, self.y, self.z),
            1 => g(self.x, self.y, self.z),
            _ => h(self.x, self.y, self.z),
        };
        out.wrapping_add(ROUND_K[round])
    }
}

/// Compute the new register value produced at `step` by message word `word`
///
/// new = (old + phi(x, y, z) + word + K) <<< s
pub fn forward_step(ctx: &StepContext, word: u32, step: usize) -> u32 {
    ctx.old
        .wrapping_add(ctx.mix(step))
        .wrapping_add(word)
        .rotate_left(shift(step))
}

/// Compute the message word that makes `step` produce `target`
///
/// word = (target >>> s) - old - phi(x, y, z) - K
pub fn inverse_step(target: u32, ctx: &StepContext, step: usize) -> u32 {
    target
        .rotate_right(shift(step))
        .wrapping_sub(ctx.old)
        .wrapping_sub(ctx.mix(step))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{RngCore, SeedableRng};

    #[test]
    fn check_boolean_functions() {
        assert_eq!(f(0xffff_0000, 0x1234_5678, 0x9abc_def0), 0x1234_def0);
        assert_eq!(g(0b1100, 0b1010, 0b0110), 0b1110);
        assert_eq!(h(0b1100, 0b1010, 0b0110), 0b0000);
    }

    #[test]
    fn check_shifts_and_indices() {
        assert_eq!(shift(0), 3);
        assert_eq!(shift(3), 19);
        assert_eq!(shift(17), 5);
        assert_eq!(shift(47), 15);
        assert_eq!(message_index(16), 0);
        assert_eq!(message_index(17), 4);
        assert_eq!(message_index(33), 8);
    }

    #[test]
    fn check_inverse_step() {
        let mut rng = StdRng::seed_from_u64(0x4d44_3400);
        for step in 0..crate::md4::STEPS {
            for _ in 0..64 {
                let ctx = StepContext::new(
                    rng.next_u32(),
                    rng.next_u32(),
                    rng.next_u32(),
                    rng.next_u32(),
                );
                let word = rng.next_u32();
                let target = rng.next_u32();

                assert_eq!(inverse_step(forward_step(&ctx, word, step), &ctx, step), word);
                assert_eq!(forward_step(&ctx, inverse_step(target, &ctx, step), step), target);
            }
        }
    }
}
