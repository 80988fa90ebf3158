use crate::md4::BLOCK_WORDS;

/// Additive message differential of the MD4 attack
///
/// M' = M + (0, 2^31, 2^31 - 2^28, 0, ..., 0, -2^16, 0, 0, 0)
pub const DIFFERENTIAL: [u32; BLOCK_WORDS] = [
    0,
    1 << 31,
    (1 << 31) - (1 << 28),
    0,
    0,
    0,
    0,
    0,
    0,
    0,
    0,
    0,
    0_u32.wrapping_sub(1 << 16),
    0,
    0,
    0,
];

/// Produce the paired message by adding the differential word-wise (mod 2^32)
///
/// If `words` satisfy every round-one condition plus the a5 and d5 conditions,
/// about fifteen conditions of rounds two and three remain, so the pair collides
/// with probability close to 2^-15 (roughly 2^-25 with round one alone).
pub fn apply_differential(words: &[u32; BLOCK_WORDS]) -> [u32; BLOCK_WORDS] {
    let mut res = *words;
    for (word, delta) in res.iter_mut().zip(DIFFERENTIAL.iter()) {
        *word = word.wrapping_add(*delta);
    }
    res
}
