use thiserror::Error;

/// Result type for collision construction
pub type Result<T> = core::result::Result<T, Error>;

/// Errors raised while hashing, correcting, or searching for collisions
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum Error {
    /// Block or search-block length outside the accepted range
    #[error("invalid block length: {len}")]
    InvalidBlockLength { len: usize },

    /// A sufficient condition does not hold after correction
    #[error("correction conflict at step {step}, bit {bit}")]
    CorrectionConflict { step: usize, bit: u32 },

    /// Probe budget spent without finding a collision
    #[error("search exhausted after {tries} tries")]
    SearchExhausted { tries: u64 },

    /// Message bit-length does not fit the 64-bit length field
    #[error("message bit-length exceeds 2^64 - 1")]
    PaddingOverflow,
}
