//! Criterion benchmarks for the windowed frame codec.
//!
//! Run with:
//!   cargo bench --bench frame
//!
//! Measures encode and decode throughput on the reference corpus at the two
//! thresholds the registry benchmarks, plus an incompressible payload.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use cmpbench::config::{MB, REFERENCE_CORPUS_SEED};
use cmpbench::corpus::synthetic;
use cmpbench::frame;

const THRESHOLDS: [(&str, f64); 2] = [("ans", 1.0), ("noans", 0.0)];

fn noise(len: usize) -> Vec<u8> {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state as u8
        })
        .collect()
}

fn bench_frame(c: &mut Criterion) {
    let text = synthetic::generate(4 * MB, REFERENCE_CORPUS_SEED);
    let random = noise(4 * MB);

    let mut group = c.benchmark_group("frame");
    group.sample_size(10);

    for (payload_name, payload) in [("text", &text), ("random", &random)] {
        group.throughput(Throughput::Bytes(payload.len() as u64));
        for (label, threshold) in THRESHOLDS {
            let id = format!("{payload_name}/{label}");

            group.bench_with_input(BenchmarkId::new("encode", &id), payload, |b, p| {
                b.iter(|| frame::encode(black_box(p), threshold))
            });

            // One output buffer is reused across iterations, as in the
            // measurement loop.
            let compressed = frame::encode(payload, threshold);
            let mut out = Vec::with_capacity(payload.len());
            group.bench_with_input(BenchmarkId::new("decode", &id), &compressed, |b, s| {
                b.iter(|| {
                    frame::decode_into(black_box(s), &mut out).unwrap();
                    out.len()
                })
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_frame);
criterion_main!(benches);
