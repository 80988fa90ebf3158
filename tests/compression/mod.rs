use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

use md4_collide::md4::{
    digest, digest_block, digest_with_trace, encode_words, forward_step, inverse_step, Endian,
    Md4, State, StepContext, STEPS,
};

use crate::common::{from_hex, reference_digest, to_hex, WANG_ONE};

#[test]
fn rfc_test_vectors() {
    let vectors: [(&[u8], &str); 7] = [
        (b"", "31d6cfe0d16ae931b73c59d7e0c089c0"),
        (b"a", "bde52cb31de33e46245e05fbdbd6fb24"),
        (b"abc", "a448017aaf21d8525fc10ae87aa6729d"),
        (b"message digest", "d9130a8164549fe818874806e1c7014b"),
        (b"abcdefghijklmnopqrstuvwxyz", "d79e1c308aa5bbcdeea8ed63df412da9"),
        (
            b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789",
            "043f8582f241db351ce627e153e7f0e4",
        ),
        (
            b"12345678901234567890123456789012345678901234567890123456789012345678901234567890",
            "e33b4ddc9c38f2199c3e7b164fcc0536",
        ),
    ];

    for (msg, exp) in vectors.iter() {
        assert_eq!(to_hex(&digest(msg, Endian::Little).unwrap()), *exp);
        assert_eq!(to_hex(&Md4::digest(msg, Endian::Little).unwrap()), *exp);
    }
}

#[test]
fn matches_reference_implementation() {
    let mut rng = StdRng::seed_from_u64(0x0320);

    for len in 0..300 {
        let mut msg = vec![0_u8; len];
        rng.fill_bytes(&mut msg);

        let exp = reference_digest(&msg);
        assert_eq!(digest(&msg, Endian::Little).unwrap()[..], exp[..]);

        // feed in uneven pieces
        let mut hash = Md4::new(Endian::Little);
        let mut rest = &msg[..];
        while !rest.is_empty() {
            let take = rng.gen_range(1_usize, 80).min(rest.len());
            hash.input(&rest[..take]).unwrap();
            rest = &rest[take..];
        }
        assert_eq!(hash.finalize().unwrap()[..], exp[..]);
    }
}

#[test]
fn trace_per_block() {
    let msg = [0x61_u8; 100];
    let (res, traces) = digest_with_trace(&msg, Endian::Little).unwrap();

    // 100 bytes plus padding spans two blocks
    assert_eq!(traces.len(), 2);
    assert_eq!(traces[1].initial(), &traces[0].final_state());
    assert_eq!(traces[1].final_state().to_bytes(Endian::Little), res);
    assert_eq!(res[..], reference_digest(&msg)[..]);
}

#[test]
fn big_endian_unpadded_block() {
    // the published pair hashed as a single big-endian block without padding
    let block = encode_words(&WANG_ONE, Endian::Big);
    assert_eq!(
        digest_block(&block, Endian::Big).unwrap()[..],
        from_hex("5f5c1a0d71b360461b5435da9b0d807a")[..]
    );
}

#[test]
fn inverse_step_recovers_word() {
    let mut rng = StdRng::seed_from_u64(0x0048);

    for _ in 0..64 {
        let state = State::new(rng.next_u32(), rng.next_u32(), rng.next_u32(), rng.next_u32());
        let word = rng.next_u32();

        for step in 0..STEPS {
            let ctx = StepContext::from_state(&state, step);
            let out = forward_step(&ctx, word, step);
            assert_eq!(inverse_step(out, &ctx, step), word);
        }
    }
}
