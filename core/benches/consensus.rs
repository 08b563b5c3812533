use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use math::prelude::*;
use recovery_core::{ConsensusReconstructor, RecoveryParams, ShareRecord};

/// (shares, threshold)
const CONFIGURATIONS: &[(u64, usize)] = &[(6, 3), (12, 6), (16, 8)];

fn shares_with_one_forgery(n: u64, threshold: usize) -> Vec<ShareRecord> {
    let coefficients: Vec<FieldElement> = (0..threshold as u64)
        .map(|i| fe!(0x9e37_79b9_7f4a_7c15u64.wrapping_mul(i + 1)))
        .collect();
    let poly = Polynomial::new(coefficients);
    poly.sample_points(1..=n)
        .into_iter()
        .map(|(x, y)| {
            let y = if x == n { y + fe!(1) } else { y };
            ShareRecord::new(x, y).expect("non-zero index")
        })
        .collect()
}

fn bench_consensus(c: &mut Criterion) {
    let mut group = c.benchmark_group("consensus_reconstruct");
    group.sample_size(10);

    for &(n, threshold) in CONFIGURATIONS {
        let shares = shares_with_one_forgery(n, threshold);
        for (label, parallel) in [("sequential", false), ("parallel", true)] {
            let reconstructor = ConsensusReconstructor::new(
                RecoveryParams::new(threshold)
                    .with_parallel(parallel)
                    .with_parallel_threshold(1),
            );
            group.bench_function(format!("{threshold}-of-{n}/{label}"), |b| {
                b.iter(|| {
                    reconstructor
                        .reconstruct(black_box(&shares))
                        .expect("reconstruction succeeds")
                });
            });
        }
    }

    group.finish();
}

criterion_group!(benches, bench_consensus);
criterion_main!(benches);
