use rand::rngs::StdRng;
use rand::SeedableRng;

use md4_collide::search::{
    find_n_to_one_collision, find_single_block_collision, generate_expandable_message, parallel,
    run_chain, ChainingFunction, SearchConfig, TruncatedMd4,
};
use md4_collide::Error;

#[test]
fn single_block_terminates() {
    let chain = TruncatedMd4::new(16);
    let init = chain.initial();

    for &block_size in [2_usize, 3].iter() {
        let config = SearchConfig::exhaustive(block_size).unwrap();
        let record = find_single_block_collision(&chain, &init, &config).unwrap();

        assert_ne!(record.message_a, record.message_b);
        assert_eq!(record.message_a.len(), block_size);
        assert_eq!(chain.compress(&init, &record.message_a).unwrap(), record.digest);
        assert_eq!(chain.compress(&init, &record.message_b).unwrap(), record.digest);
    }
}

#[test]
fn n_to_one_from_prefix_state() {
    let chain = TruncatedMd4::new(12);
    let config = SearchConfig::new(2, 1 << 24).unwrap();
    let mut rng = StdRng::seed_from_u64(0x1201);

    // search from a state reached by some earlier prefix
    let start = run_chain(&chain, &chain.initial(), b"prefix", 2).unwrap();
    let record = find_n_to_one_collision(&chain, &start, 3, &config, &mut rng).unwrap();

    assert_eq!(record.message_a.len(), 2);
    assert_eq!(record.message_b.len(), 6);
    assert_eq!(run_chain(&chain, &start, &record.message_a, 2).unwrap(), record.digest);
    assert_eq!(run_chain(&chain, &start, &record.message_b, 2).unwrap(), record.digest);
}

#[test]
fn expandable_message_every_choice() {
    let chain = TruncatedMd4::new(12);
    let config = SearchConfig::new(2, 1 << 24).unwrap();
    let mut rng = StdRng::seed_from_u64(0x4b4b);
    let init = chain.initial();
    let levels = 4;

    let expandable = generate_expandable_message(&chain, levels, &init, &config, &mut rng).unwrap();
    assert_eq!(expandable.levels().len(), levels);
    assert_eq!(expandable.min_blocks(), levels);
    assert_eq!(expandable.max_blocks(), levels + (1 << levels) - 1);

    let mut last_len = 0;
    for choice in 0..1_usize << levels {
        // first level is the most significant choice
        let long: Vec<bool> = (0..levels)
            .map(|i| choice & (1 << (levels - 1 - i)) != 0)
            .collect();
        let msg = expandable.produce(&long).unwrap();

        assert_eq!(run_chain(&chain, &init, &msg, 2).unwrap(), expandable.final_state());
        assert!(msg.len() > last_len);
        last_len = msg.len();
    }

    assert_eq!(
        expandable.produce(&[true]),
        Err(Error::InvalidBlockLength { len: 1 })
    );
}

#[test]
fn parallel_agrees_with_sequential() {
    let chain = TruncatedMd4::new(16);
    let config = SearchConfig::exhaustive(2).unwrap();
    let init = chain.initial();

    let sequential = find_single_block_collision(&chain, &init, &config).unwrap();
    // one worker walks candidates in the same order
    assert_eq!(
        parallel::find_single_block_collision(&chain, &init, &config, 1).unwrap(),
        sequential
    );

    for &workers in [2_usize, 3, 8].iter() {
        let record = parallel::find_single_block_collision(&chain, &init, &config, workers).unwrap();
        assert_ne!(record.message_a, record.message_b);
        assert_eq!(chain.compress(&init, &record.message_a).unwrap(), record.digest);
        assert_eq!(chain.compress(&init, &record.message_b).unwrap(), record.digest);
    }
}
