use rand::rngs::StdRng;
use rand::SeedableRng;

use md4_collide::md4::{compress, digest, encode_words, Endian, INIT_STATE};
use md4_collide::wang::{
    apply_differential, correct_round_one, find_structural_collision, satisfy_conditions,
    try_block, verify, AttackConfig, D5_STEP,
};
use md4_collide::Error;

use crate::common::{reference_digest, to_hex, WANG_ONE, WANG_TWO};

#[test]
fn published_pairs_collide() {
    for (words, exp) in [
        (WANG_ONE, "4d7e6a1defa93d2dde05b45d864c429b"),
        (WANG_TWO, "c6f3b3fe1f4833e0697340fb214fb9ea"),
    ]
    .iter()
    {
        let msg = encode_words(words, Endian::Little);
        let pair = encode_words(&apply_differential(words), Endian::Little);
        assert_ne!(msg, pair);

        assert_eq!(to_hex(&digest(&msg, Endian::Little).unwrap()), *exp);
        assert_eq!(to_hex(&digest(&pair, Endian::Little).unwrap()), *exp);
        assert_eq!(reference_digest(&msg), reference_digest(&pair));

        assert_eq!(try_block(&msg, Endian::Little).unwrap(), Some(pair));
    }
}

#[test]
fn published_pairs_satisfy_conditions() {
    for words in [WANG_ONE, WANG_TWO].iter() {
        let (_, trace) = compress(&INIT_STATE, words);
        assert_eq!(verify(&trace, 0..D5_STEP + 1), Ok(()));

        // nothing to correct on a conforming block
        assert_eq!(correct_round_one(&INIT_STATE, words).unwrap(), *words);
        assert_eq!(satisfy_conditions(&INIT_STATE, words).unwrap(), *words);
    }
}

#[test]
fn structural_collision() {
    let mut rng = StdRng::seed_from_u64(0x2005);
    let config = AttackConfig::default();

    let record = match find_structural_collision(&config, &mut rng) {
        Ok(record) => record,
        Err(Error::SearchExhausted { tries }) => panic!("no collision in {} tries", tries),
        Err(err) => panic!("unexpected error: {:?}", err),
    };

    assert_ne!(record.message_a, record.message_b);
    assert_eq!(record.message_a.len(), 64);
    assert_eq!(record.message_b.len(), 64);

    let exp = reference_digest(&record.message_a);
    assert_eq!(record.digest[..], exp[..]);
    assert_eq!(reference_digest(&record.message_b), exp);
}
