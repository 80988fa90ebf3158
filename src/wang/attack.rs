use rand::RngCore;
use tracing::{debug, trace};

use super::{apply_differential, satisfy_conditions};
use crate::md4::{
    compress, decode_words, digest, encode_words, Endian, BLOCK_LEN, DIGEST_LEN, INIT_STATE,
};
use crate::search::CollisionRecord;
use crate::{Error, Result};

/// Default probe budget for the structural attack
pub const DEFAULT_MAX_TRIES: u64 = 1 << 24;

/// Configuration of the structural collision search
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct AttackConfig {
    /// Number of random blocks to try before giving up
    pub max_tries: u64,
    /// Byte order used to decode and encode the message blocks
    pub endian: Endian,
}

impl Default for AttackConfig {
    fn default() -> Self {
        Self {
            max_tries: DEFAULT_MAX_TRIES,
            endian: Endian::Little,
        }
    }
}

/// Check a candidate block against its differential pair
///
/// Returns the paired block when both compress to the same chaining state from the IV.
pub fn try_block(block: &[u8; BLOCK_LEN], endian: Endian) -> Result<Option<[u8; BLOCK_LEN]>> {
    let words = decode_words(block, endian)?;
    let pair = apply_differential(&words);
    if words != pair && compress(&INIT_STATE, &words).0 == compress(&INIT_STATE, &pair).0 {
        Ok(Some(encode_words(&pair, endian)))
    } else {
        Ok(None)
    }
}

/// Find a single-block MD4 collision using the Wang differential
///
/// Each try draws a random block, enforces the round-one and a5/d5 conditions,
/// applies the differential, and compares the compressed pair. Correction
/// conflicts and misses each consume one try.
pub fn find_structural_collision<R: RngCore>(
    config: &AttackConfig,
    rng: &mut R,
) -> Result<CollisionRecord<[u8; DIGEST_LEN]>> {
    let mut block = [0_u8; BLOCK_LEN];

    for attempt in 1..=config.max_tries {
        rng.fill_bytes(&mut block);
        let words = decode_words(&block, config.endian)?;

        let words = match satisfy_conditions(&INIT_STATE, &words) {
            Ok(words) => words,
            Err(Error::CorrectionConflict { step, bit }) => {
                trace!(attempt, step, bit, "candidate rejected");
                continue;
            }
            Err(err) => return Err(err),
        };

        let message_a = encode_words(&words, config.endian);
        if let Some(message_b) = try_block(&message_a, config.endian)? {
            let digest = digest(&message_a, config.endian)?;
            debug!(attempt, "structural collision found");
            return Ok(CollisionRecord::new(
                message_a.to_vec(),
                message_b.to_vec(),
                digest,
            ));
        }
    }

    Err(Error::SearchExhausted {
        tries: config.max_tries,
    })
}
