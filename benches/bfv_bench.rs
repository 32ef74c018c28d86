//! Micro-benchmarks over the polynomial arena and the full primitive
//! pipeline, at the toy and production parameter sets.

use std::rc::Rc;

use bfv_core::ciphertext::{decrypt, encrypt_with_rng};
use bfv_core::evaluator::eval_mul;
use bfv_core::keys::{keygen_with_rng, rlk_gen_with_rng, seeded_rng};
use bfv_core::params::Params;
use bfv_core::poly::{ring_mul, ring_mul_unreduced, Poly};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

fn bench_ring_mul(c: &mut Criterion) {
    let mut group = c.benchmark_group("ring_mul");
    for params in [Params::toy(), Params::production()] {
        let n = params.degree();
        let q = params.q() as u128;
        let mut rng = seeded_rng(1);
        let a = bfv_core::sampler::sample_uniform(&mut rng, n, q);
        let b = bfv_core::sampler::sample_uniform(&mut rng, n, q);

        group.bench_with_input(BenchmarkId::new("reduced", n), &n, |bencher, _| {
            bencher.iter(|| ring_mul(&a, &b, q));
        });
        group.bench_with_input(BenchmarkId::new("unreduced", n), &n, |bencher, _| {
            bencher.iter(|| ring_mul_unreduced(&a, &b));
        });
    }
    group.finish();
}

fn bench_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline");
    for params in [Params::toy(), Params::production()] {
        let params = Rc::new(params);
        let n = params.degree();
        let mut rng = seeded_rng(2);
        let (sk, pk) = keygen_with_rng(&params, &mut rng);
        let rlk = rlk_gen_with_rng(&params, &sk, &mut rng);

        group.bench_with_input(BenchmarkId::new("keygen", n), &n, |bencher, _| {
            bencher.iter(|| keygen_with_rng(&params, &mut rng));
        });

        group.bench_with_input(BenchmarkId::new("encrypt", n), &n, |bencher, _| {
            bencher.iter(|| encrypt_with_rng(&params, &pk, 3, &mut rng).unwrap());
        });

        let ct_a = encrypt_with_rng(&params, &pk, 3, &mut rng).unwrap();
        let ct_b = encrypt_with_rng(&params, &pk, 5, &mut rng).unwrap();

        group.bench_with_input(BenchmarkId::new("decrypt", n), &n, |bencher, _| {
            bencher.iter(|| decrypt(&params, &sk, &ct_a).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("eval_mul", n), &n, |bencher, _| {
            bencher.iter(|| eval_mul(&params, &rlk, &ct_a, &ct_b).unwrap());
        });
    }
    group.finish();
}

fn bench_zero_alloc(c: &mut Criterion) {
    // Regression guard: building a zero polynomial at production size should
    // stay allocation-bound, not show up as a hot path in the above groups.
    c.bench_function("poly_zero_production", |bencher| {
        bencher.iter(|| Poly::zero(4096));
    });
}

criterion_group!(benches, bench_ring_mul, bench_pipeline, bench_zero_alloc);
criterion_main!(benches);
