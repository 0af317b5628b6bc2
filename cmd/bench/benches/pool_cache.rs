//! Throughput benchmarks for the pool and the cache under contention.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anvil::{Cache, Pool};

fn bench_pool_submit(c: &mut Criterion) {
    let mut group = c.benchmark_group("pool_submit");
    for workers in [1, 2, 4, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            let pool = Pool::new(workers).expect("pool should start");
            let counter = Arc::new(AtomicUsize::new(0));
            b.iter(|| {
                let counter = Arc::clone(&counter);
                pool.submit(move || {
                    counter.fetch_add(1, Ordering::Relaxed);
                });
            });
        });
    }
    group.finish();
}

fn bench_cache_get_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("cache_get_set");
    let cache = Cache::new(10_000, Duration::from_secs(300));
    for i in 0..1_000 {
        cache
            .set(format!("key{i}").as_bytes(), b"value", None)
            .unwrap();
    }

    group.bench_function("get_hit", |b| {
        b.iter(|| {
            cache.get(b"key500").map(|r| r.release());
        });
    });

    group.bench_function("set_update", |b| {
        b.iter(|| {
            cache.set(b"key500", b"value2", None).unwrap();
        });
    });

    group.finish();
}

criterion_group!(benches, bench_pool_submit, bench_cache_get_set);
criterion_main!(benches);
