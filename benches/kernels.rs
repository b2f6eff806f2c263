use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use par_bench::bench::kernels::{
    assign_parallel, assign_serial, DampedPowerSum, IdentitySum, Reduction,
};

const LEN: usize = 1_000_000;

fn assign_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("assign");
    let mut buf = vec![0i32; LEN];

    group.bench_function("serial", |b| b.iter(|| assign_serial(black_box(&mut buf[..]))));
    group.bench_function("parallel", |b| b.iter(|| assign_parallel(black_box(&mut buf[..]))));

    group.finish();
}

fn reduce_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reduce");

    let mut ints = vec![0i32; LEN];
    assign_serial(&mut ints);
    group.bench_function("identity_serial", |b| {
        b.iter(|| IdentitySum.serial(black_box(&ints[..])))
    });
    group.bench_function("identity_parallel", |b| {
        b.iter(|| IdentitySum.parallel(black_box(&ints[..])))
    });

    let mut floats = vec![0.0f64; LEN];
    assign_serial(&mut floats);
    group.bench_function("damped_power_serial", |b| {
        b.iter(|| DampedPowerSum.serial(black_box(&floats[..])))
    });
    group.bench_function("damped_power_parallel", |b| {
        b.iter(|| DampedPowerSum.parallel(black_box(&floats[..])))
    });

    group.finish();
}

criterion_group!(benches, assign_benchmark, reduce_benchmark);
criterion_main!(benches);
