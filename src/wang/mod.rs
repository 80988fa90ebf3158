//! Wang et al. differential collision attack on MD4
//!
//! "Cryptanalysis of the Hash Functions MD4 and RIPEMD", Wang, Lai, Feng, Chen, Yu (2005)
//!
//! A random block is first massaged until the sufficient conditions of round one
//! hold (single-step modification), then round-two registers `a5` and `d5` are
//! corrected by multi-step modification. Adding the fixed differential to the
//! resulting block yields a second block that collides with high probability.

use crate::md4::{Register, State};

/// Bit-level corrections enforced on step outputs
mod correct;

/// Fixed additive message differential
mod differential;

/// Round-two multi-step modification
mod fixers;

/// Randomized driver for the structural attack
mod attack;

pub use attack::*;
pub use correct::*;
pub use differential::*;
pub use fixers::*;

/// Bit-width of a register
pub const WORD_BITS: usize = 32;

/// Number of step rows in the correction table (rounds one and two)
pub const CORRECTION_ROWS: usize = 32;

/// Number of round-one steps
pub const ROUND_ONE_STEPS: usize = 16;

/// Constraint on a single bit of a step output
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Rule {
    /// Bit is left untouched
    Unconstrained,
    /// Bit must be zero
    Zero,
    /// Bit must be one
    One,
    /// Bit must equal the same bit of the latest value of the register
    CopyFrom(Register),
}

impl Rule {
    /// Required bit value, or None if unconstrained
    ///
    /// `reference` is the chaining state before the step executes.
    pub fn expected(self, bit: u32, reference: &State) -> Option<bool> {
        match self {
            Rule::Unconstrained => None,
            Rule::Zero => Some(false),
            Rule::One => Some(true),
            Rule::CopyFrom(reg) => Some(bit_of(reference.get(reg), bit)),
        }
    }

    /// Force the bit of `value` to satisfy the rule
    pub fn apply(self, value: u32, bit: u32, reference: &State) -> u32 {
        match self.expected(bit, reference) {
            Some(true) => value | (1 << bit),
            Some(false) => value & !(1 << bit),
            None => value,
        }
    }

    /// Check whether the bit of `value` satisfies the rule
    pub fn holds(self, value: u32, bit: u32, reference: &State) -> bool {
        self.expected(bit, reference)
            .map_or(true, |want| bit_of(value, bit) == want)
    }
}

/// One row of the correction table, indexed by bit (LSB first)
pub type CorrectionRow = [Rule; WORD_BITS];

/// Full correction table, indexed by step
pub type CorrectionSet = [CorrectionRow; CORRECTION_ROWS];

/// Get bit `n` of `x`
#[inline]
pub fn bit_of(x: u32, n: u32) -> bool {
    (x >> n) & 1 == 1
}

// Sufficient conditions, one row per step, bit 0 first.
//
// '.' unconstrained, '0'/'1' forced, 'a'..'d' equal to the same bit of the
// latest value of that register when the step is computed.
//
// Rows 0..16 are round one (a1, d1, c1, b1, ..., b4), rows 16 and 17 are a5 and d5.
#[rustfmt::skip]
const ROWS: [&[u8; WORD_BITS]; CORRECTION_ROWS] = [
    b"......b.........................",
    b"......0a..a.....................",
    b"......11..0..............d......",
    b"......10..0..............0......",
    b".......1..1..b...........0......",
    b".............0....aaaa...1......",
    b"............d0d...0010..........",
    b"............110.c.0000..........",
    b"............111.0.0001b..b......",
    b"............111.0..0110..1...a..",
    b"................1..0000..0...1.d",
    b"...................011c..1...0.0",
    b"......................0..0b.b1.0",
    b"......................0..01.10.1",
    b"..................d...1..10.00..",
    b"..................0......11.10.c",
    b"..................c......10.1..1",
    b"..................a......bb.b..b",
    b"................................",
    b"................................",
    b"................................",
    b"................................",
    b"................................",
    b"................................",
    b"................................",
    b"................................",
    b"................................",
    b"................................",
    b"................................",
    b"................................",
    b"................................",
    b"................................",
];

const fn parse_row(row: &[u8; WORD_BITS]) -> CorrectionRow {
    let mut res = [Rule::Unconstrained; WORD_BITS];
    let mut bit = 0;
    while bit < WORD_BITS {
        res[bit] = match row[bit] {
            b'.' => Rule::Unconstrained,
            b'0' => Rule::Zero,
            b'1' => Rule::One,
            b'a' => Rule::CopyFrom(Register::A),
            b'b' => Rule::CopyFrom(Register::B),
            b'c' => Rule::CopyFrom(Register::C),
            b'd' => Rule::CopyFrom(Register::D),
            _ => panic!("invalid correction rule"),
        };
        bit += 1;
    }
    res
}

const fn parse_table(rows: &[&[u8; WORD_BITS]; CORRECTION_ROWS]) -> CorrectionSet {
    let mut res = [[Rule::Unconstrained; WORD_BITS]; CORRECTION_ROWS];
    let mut step = 0;
    while step < CORRECTION_ROWS {
        res[step] = parse_row(rows[step]);
        step += 1;
    }
    res
}

/// Sufficient conditions of the MD4 attack
pub static CORRECTIONS: CorrectionSet = parse_table(&ROWS);

/// Constrained bits of a row, in ascending bit order
pub fn constrained_bits(row: &CorrectionRow) -> impl Iterator<Item = (u32, Rule)> + '_ {
    row.iter()
        .enumerate()
        .filter(|(_, rule)| **rule != Rule::Unconstrained)
        .map(|(bit, rule)| (bit as u32, *rule))
}
