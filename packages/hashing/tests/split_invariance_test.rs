//! The digest must not depend on how input is split across transform calls

use hashkit_hashing::algorithms::{blake2b, sha2_256};
use hashkit_hashing::{HashFactory, HashFunction, HashResult, Hmac};
use proptest::prelude::*;

/// Cuts on both sides of the 128-byte block a BLAKE2b key occupies
const KEYED_CUTS: [&[usize]; 7] = [
    &[0],
    &[127],
    &[128],
    &[129],
    &[127, 128, 129],
    &[1, 256, 300],
    &[0, 0, 600],
];

fn whole(name: &str, data: &[u8]) -> HashResult {
    HashFactory::create(name)
        .expect("algorithm should be registered")
        .compute_bytes(data)
        .expect("hash computation should succeed")
}

fn split_with<H: HashFunction>(hash: &mut H, data: &[u8], cuts: &[usize]) -> HashResult {
    let mut start = 0;
    for &cut in cuts {
        hash.transform_bytes(&data[start..cut])
            .expect("transform should succeed");
        start = cut;
    }
    hash.transform_bytes(&data[start..])
        .expect("transform should succeed");
    hash.transform_final().expect("finalize should succeed")
}

fn pieces(name: &str, data: &[u8], cuts: &[usize]) -> HashResult {
    let mut hash = HashFactory::create(name).expect("algorithm should be registered");
    split_with(&mut hash, data, cuts)
}

fn key_of(len: usize) -> Vec<u8> {
    (1..=len).map(|i| i as u8).collect()
}

/// Keyed BLAKE2b, HMAC-SHA2-256 and HMAC over keyed BLAKE2b
fn keyed_engines(key: &[u8]) -> Vec<Box<dyn HashFunction>> {
    let keyed_blake = blake2b(32, Some(key)).expect("key fits BLAKE2b");
    vec![
        Box::new(blake2b(64, Some(key)).expect("key fits BLAKE2b")),
        Box::new(Hmac::with_key(sha2_256(), key).expect("HMAC takes any key")),
        Box::new(Hmac::with_key(keyed_blake, key).expect("HMAC takes any key")),
    ]
}

#[test]
fn test_every_two_way_split_of_20_bytes() {
    let data: Vec<u8> = (1..=20).collect();
    for name in HashFactory::names() {
        let expected = whole(name, &data);
        for split in 0..=data.len() {
            assert_eq!(
                pieces(name, &data, &[split]),
                expected,
                "{name} split at {split}"
            );
        }
    }
}

#[test]
fn test_byte_at_a_time_across_block_boundaries() {
    // 300 bytes crosses at least two block boundaries for every block size in use
    let data: Vec<u8> = (0..300u32).map(|i| (i * 7) as u8).collect();
    let cuts: Vec<usize> = (1..data.len()).collect();
    for name in HashFactory::names() {
        assert_eq!(pieces(name, &data, &cuts), whole(name, &data), "{name}");
    }
}

#[test]
fn test_empty_transforms_change_nothing() {
    for name in HashFactory::names() {
        let mut hash = HashFactory::create(name).expect("algorithm should be registered");
        hash.transform_bytes(b"").expect("transform should succeed");
        hash.transform_bytes(b"abc")
            .expect("transform should succeed");
        hash.transform_bytes(b"").expect("transform should succeed");
        let out = hash.transform_final().expect("finalize should succeed");
        assert_eq!(out, whole(name, b"abc"), "{name}");
    }
}

#[test]
fn test_keyed_engines_split_around_the_key_block() {
    let data: Vec<u8> = (0..600u32).map(|i| (i * 13) as u8).collect();
    let every_byte: Vec<usize> = (1..data.len()).collect();
    for key_len in [1, 64] {
        let key = key_of(key_len);
        for mut hash in keyed_engines(&key) {
            let name = hash.name();
            let expected = hash.compute_bytes(&data).expect("hash should succeed");
            for cuts in KEYED_CUTS {
                let out = split_with(&mut hash, &data, cuts);
                assert_eq!(out, expected, "{name} key {key_len} cuts {cuts:?}");
            }
            let out = split_with(&mut hash, &data, &every_byte);
            assert_eq!(out, expected, "{name} key {key_len} byte at a time");
        }
    }
}

#[test]
fn test_keyed_clone_mid_stream_is_independent() {
    let key = key_of(64);
    let prefix = [0x11u8; 130];
    for mut hash in keyed_engines(&key) {
        let name = hash.name();
        hash.transform_bytes(&prefix)
            .expect("transform should succeed");
        let mut copy = hash.clone();
        hash.transform_bytes(b"left")
            .expect("transform should succeed");
        copy.transform_bytes(b"right")
            .expect("transform should succeed");
        let left = hash.transform_final().expect("finalize should succeed");
        let right = copy.transform_final().expect("finalize should succeed");

        let expected_left = hash
            .compute_bytes(&[&prefix[..], &b"left"[..]].concat())
            .expect("hash should succeed");
        let expected_right = hash
            .compute_bytes(&[&prefix[..], &b"right"[..]].concat())
            .expect("hash should succeed");
        assert_eq!(left, expected_left, "{name}");
        assert_eq!(right, expected_right, "{name}");
    }
}

fn split_points(len: usize) -> impl Strategy<Value = Vec<usize>> {
    let cuts = prop::collection::vec(0..=len, 0..6);
    cuts.prop_map(|mut cuts| {
        cuts.sort_unstable();
        cuts
    })
}

fn data_and_cuts() -> impl Strategy<Value = (Vec<u8>, Vec<usize>)> {
    let inputs = prop::collection::vec(any::<u8>(), 0..600);
    inputs.prop_flat_map(|data| {
        let len = data.len();
        (Just(data), split_points(len))
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_block_engines_are_split_invariant((data, cuts) in data_and_cuts()) {
        for name in ["SHA2-256", "SHA2-512", "SHA3-256", "KECCAK-288", "BLAKE2B-512"] {
            prop_assert_eq!(pieces(name, &data, &cuts), whole(name, &data));
        }
    }

    #[test]
    fn prop_non_block_engines_are_split_invariant((data, cuts) in data_and_cuts()) {
        for name in ["JENKINS3", "SUPERFAST", "MURMUR2"] {
            prop_assert_eq!(pieces(name, &data, &cuts), whole(name, &data));
        }
    }

    #[test]
    fn prop_xof_is_split_invariant((data, cuts) in data_and_cuts()) {
        for name in ["SHAKE128", "SHAKE256"] {
            prop_assert_eq!(pieces(name, &data, &cuts), whole(name, &data));
        }
    }

    #[test]
    fn prop_keyed_engines_are_split_invariant(
        (data, cuts) in data_and_cuts(),
        key in prop::collection::vec(any::<u8>(), 1..=64)
    ) {
        for mut hash in keyed_engines(&key) {
            let expected = hash.compute_bytes(&data).expect("hash should succeed");
            prop_assert_eq!(split_with(&mut hash, &data, &cuts), expected);
        }
    }
}
