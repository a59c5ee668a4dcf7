//! Throughput benchmarks for the streaming engines
//!
//! Covers one algorithm per engine family across input sizes, plus the cost of
//! splitting input into many small transform calls.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use hashkit_hashing::{HashFactory, HashFunction};
use std::hint::black_box;

const ALGORITHMS: [&str; 6] = [
    "SHA2-256",
    "SHA2-512",
    "SHA3-256",
    "BLAKE2B-512",
    "SHAKE128",
    "MURMUR2",
];

/// Whole-buffer hashing at 1KB, 64KB and 1MB
fn benchmark_hash_algorithms(c: &mut Criterion) {
    let mut group = c.benchmark_group("hash_throughput");

    for size in [1024usize, 65_536, 1_048_576] {
        group.throughput(Throughput::Bytes(size as u64));
        let data = vec![0x5Au8; size];

        for name in ALGORITHMS {
            let mut hash = HashFactory::create(name).expect("algorithm should be registered");
            group.bench_with_input(BenchmarkId::new(name, size), &data, |b, data| {
                b.iter(|| {
                    let out = hash
                        .compute_bytes(black_box(data))
                        .expect("hash should succeed");
                    black_box(out);
                });
            });
        }
    }
    group.finish();
}

/// Same 64KB input delivered in pieces of varying size
fn benchmark_split_input(c: &mut Criterion) {
    let mut group = c.benchmark_group("split_input");
    let data = vec![0xA5u8; 65_536];
    group.throughput(Throughput::Bytes(data.len() as u64));

    for piece in [1usize, 13, 64, 4096] {
        let mut hash = HashFactory::create("SHA2-256").expect("algorithm should be registered");
        group.bench_with_input(BenchmarkId::new("SHA2-256", piece), &data, |b, data| {
            b.iter(|| {
                for chunk in data.chunks(piece) {
                    hash.transform_bytes(black_box(chunk))
                        .expect("transform should succeed");
                }
                black_box(hash.transform_final().expect("finalize should succeed"));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, benchmark_hash_algorithms, benchmark_split_input);
criterion_main!(benches);
