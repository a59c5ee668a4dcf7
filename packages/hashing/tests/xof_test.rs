//! Absorb/squeeze lifecycle of the extendable-output functions

use hashkit_hashing::algorithms::shake128;
use hashkit_hashing::{ExtendableOutput, HashError, HashFactory, HashFunction, XofPhase};

fn squeeze_all(name: &str, data: &[u8], len: usize) -> Vec<u8> {
    let mut xof = HashFactory::create_xof(name, None).expect("algorithm is an XOF");
    xof.transform_bytes(data).expect("absorbing should succeed");
    let mut out = vec![0u8; len];
    xof.squeeze(&mut out).expect("squeeze should succeed");
    out
}

#[test]
fn test_four_quarters_equal_one_request() {
    for name in ["SHAKE128", "SHAKE256"] {
        let expected = squeeze_all(name, b"split me", 1000);

        let mut xof = HashFactory::create_xof(name, Some(8000)).expect("algorithm is an XOF");
        xof.transform_bytes(b"split me")
            .expect("absorbing should succeed");
        let mut out = vec![0u8; 1000];
        for quarter in 0..4 {
            xof.do_output(&mut out, quarter * 250, 250)
                .expect("squeeze should succeed");
        }
        assert_eq!(out, expected, "{name}");
    }
}

#[test]
fn test_uneven_requests_continue_the_stream() {
    let expected = squeeze_all("SHAKE128", b"", 777);
    let mut xof = HashFactory::create_xof("SHAKE128", None).expect("algorithm is an XOF");
    let mut joined = Vec::new();
    for size in [1, 167, 168, 169, 0, 272] {
        let mut chunk = vec![0u8; size];
        xof.squeeze(&mut chunk).expect("squeeze should succeed");
        joined.extend_from_slice(&chunk);
    }
    assert_eq!(joined, expected);
}

#[test]
fn test_absorbing_after_output_is_rejected() {
    let mut xof = shake128(None).expect("default size is valid");
    xof.transform_bytes(b"abc")
        .expect("absorbing should succeed");
    assert_eq!(xof.phase(), XofPhase::Absorbing);

    let mut out = [0u8; 16];
    xof.squeeze(&mut out).expect("squeeze should succeed");
    assert_eq!(xof.phase(), XofPhase::Squeezing);

    let err = xof
        .transform_bytes(b"more")
        .expect_err("absorbing must fail while squeezing");
    assert!(matches!(err, HashError::InvalidOperation(_)));

    // the failed call left the output stream untouched
    let mut next = [0u8; 16];
    xof.squeeze(&mut next).expect("squeeze should succeed");
    let mut reference = vec![0u8; 32];
    let mut fresh = shake128(None).expect("default size is valid");
    fresh
        .transform_bytes(b"abc")
        .expect("absorbing should succeed");
    fresh
        .squeeze(&mut reference)
        .expect("squeeze should succeed");
    assert_eq!([out, next].concat(), reference);
}

#[test]
fn test_zero_count_request_still_closes_absorption() {
    let mut xof = shake128(None).expect("default size is valid");
    let mut out = [0u8; 4];
    xof.do_output(&mut out, 0, 0)
        .expect("empty request is valid");
    assert_eq!(xof.phase(), XofPhase::Squeezing);
    assert!(xof.transform_bytes(b"x").is_err());
}

#[test]
fn test_initialize_returns_to_absorbing() {
    let mut xof = shake128(None).expect("default size is valid");
    let mut out = [0u8; 8];
    xof.squeeze(&mut out).expect("squeeze should succeed");
    xof.initialize();
    assert_eq!(xof.phase(), XofPhase::Absorbing);
    xof.transform_bytes(b"abc")
        .expect("absorbing is allowed again");
}

#[test]
fn test_output_range_is_checked() {
    let mut xof = shake128(None).expect("default size is valid");
    let mut out = [0u8; 10];
    assert!(matches!(
        xof.do_output(&mut out, 8, 3),
        Err(HashError::InvalidArgument(_))
    ));
    assert!(matches!(
        xof.do_output(&mut out, usize::MAX, 2),
        Err(HashError::InvalidArgument(_))
    ));
}

#[test]
fn test_output_size_validation() {
    let mut xof = shake128(None).expect("default size is valid");
    assert_eq!(xof.xof_size_in_bits(), 256);
    assert!(matches!(
        xof.set_xof_size_in_bits(12),
        Err(HashError::InvalidArgument(_))
    ));
    assert!(matches!(
        xof.set_xof_size_in_bits(0),
        Err(HashError::InvalidArgument(_))
    ));
    xof.set_xof_size_in_bits(1024).expect("multiple of 8");
    let out = xof.compute_bytes(b"").expect("squeeze should succeed");
    assert_eq!(out.len(), 128);
    assert!(HashFactory::create_xof("SHAKE256", Some(7)).is_err());
}

#[test]
fn test_transform_final_resets_for_reuse() {
    let mut xof = HashFactory::create_xof("SHAKE256", None).expect("algorithm is an XOF");
    xof.transform_bytes(b"first")
        .expect("absorbing should succeed");
    let first = xof.transform_final().expect("finalize should succeed");
    xof.transform_bytes(b"first")
        .expect("absorbing after finalize is allowed");
    let second = xof.transform_final().expect("finalize should succeed");
    assert_eq!(second, first);
}

#[test]
fn test_clone_keeps_squeeze_position() {
    let mut xof = shake128(None).expect("default size is valid");
    let mut head = [0u8; 100];
    xof.squeeze(&mut head).expect("squeeze should succeed");

    let mut copy = xof.clone_xof();
    let mut a = [0u8; 100];
    let mut b = [0u8; 100];
    xof.squeeze(&mut a).expect("squeeze should succeed");
    copy.squeeze(&mut b).expect("squeeze should succeed");
    assert_eq!(a, b);
    assert_ne!(a, head);
}

#[test]
fn test_unallocatable_output_size_is_an_error() {
    let mut xof = shake128(None).expect("default size is valid");
    xof.set_xof_size_in_bits(u64::MAX - 7)
        .expect("multiple of 8");
    xof.transform_bytes(b"abc")
        .expect("absorbing should succeed");
    assert!(matches!(
        xof.transform_final(),
        Err(HashError::OutOfRange(_))
    ));

    // the failed request produced no output, so absorption is still open
    assert_eq!(xof.phase(), XofPhase::Absorbing);
    xof.set_xof_size_in_bits(256).expect("multiple of 8");
    let out = xof.transform_final().expect("finalize should succeed");
    let again = xof.compute_bytes(b"abc").expect("hash should succeed");
    assert_eq!(out, again);
}
