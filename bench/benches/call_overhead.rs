//! Criterion harness: per-call cost of each call shape for every lookup
//! pattern, measured over a fixed batch of pre-generated arguments.

use bench_core::types::BenchContext;
use call_bench::runner::next_args;
use call_bench::workload::Lookup;
use call_bench::wrappers::{frequently_called_function, Caller, Coroutine};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::SeedableRng;

const BATCH: usize = 4_096;

fn argument_batch() -> Vec<(f64, i64)> {
    let mut rng = StdRng::seed_from_u64(0xCA11_BE4C);
    (0..BATCH).map(|_| next_args(&mut rng)).collect()
}

fn bench_function_call(c: &mut Criterion) {
    let ctx = BenchContext::standard();
    let args = argument_batch();
    let mut group = c.benchmark_group("call/function");
    group.throughput(Throughput::Elements(BATCH as u64));

    for lookup in Lookup::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(lookup), &lookup, |b, &lookup| {
            b.iter(|| {
                for &(x, y) in &args {
                    frequently_called_function(&ctx, lookup, x, y);
                }
            });
        });
    }
    group.finish();
}

fn bench_method_call(c: &mut Criterion) {
    let ctx = BenchContext::standard();
    let args = argument_batch();
    let mut group = c.benchmark_group("call/method");
    group.throughput(Throughput::Elements(BATCH as u64));

    for lookup in Lookup::ALL {
        let obj = Caller::new(&ctx, lookup);
        group.bench_with_input(BenchmarkId::from_parameter(lookup), &lookup, |b, _| {
            b.iter(|| {
                for &(x, y) in &args {
                    obj.call(x, y);
                }
            });
        });
    }
    group.finish();
}

fn bench_coroutine_send(c: &mut Criterion) {
    let ctx = BenchContext::standard();
    let args = argument_batch();
    let mut group = c.benchmark_group("call/coroutine");
    group.throughput(Throughput::Elements(BATCH as u64));

    for lookup in Lookup::ALL {
        let mut co = Coroutine::new(lookup);
        co.prime(&ctx).expect("prime coroutine");
        group.bench_with_input(BenchmarkId::from_parameter(lookup), &lookup, |b, _| {
            b.iter(|| {
                for &(x, y) in &args {
                    co.send(x, y).expect("send failed");
                }
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_function_call,
    bench_method_call,
    bench_coroutine_send
);
criterion_main!(benches);
