use core::hint::black_box;
use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use pseud_uuid::{PrefetchFactory, SeedRegistry, SeededSource, new_random_identifier};
use std::{
    sync::{Arc, Barrier},
    thread::scope,
    time::Instant,
};

// Number of IDs generated per benchmark iteration (per-thread for
// multi-threaded).
const TOTAL_IDS: usize = 4096;

fn bench_random(c: &mut Criterion) {
    let mut group = c.benchmark_group("random");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));
    group.bench_function(format!("elems/{TOTAL_IDS}"), |b| {
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(new_random_identifier());
            }
        });
    });
    group.finish();
}

fn bench_seeded(c: &mut Criterion) {
    let mut group = c.benchmark_group("seeded");
    group.throughput(Throughput::Elements(TOTAL_IDS as u64));

    group.bench_function(format!("source/elems/{TOTAL_IDS}"), |b| {
        let mut source = SeededSource::new(42);
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(source.next_identifier());
            }
        });
    });

    group.bench_function(format!("registry/elems/{TOTAL_IDS}"), |b| {
        let registry = SeedRegistry::new();
        b.iter(|| {
            for _ in 0..TOTAL_IDS {
                black_box(registry.derive(42).unwrap());
            }
        });
    });

    for (queue_min, queue_max) in [(0, 1), (16, 64), (256, 1024)] {
        group.bench_function(
            format!("factory/min_{queue_min}/max_{queue_max}/elems/{TOTAL_IDS}"),
            |b| {
                let registry = Arc::new(SeedRegistry::new());
                let factory = PrefetchFactory::new(registry, 42, queue_min, queue_max).unwrap();
                b.iter(|| {
                    for _ in 0..TOTAL_IDS {
                        black_box(factory.dequeue().unwrap());
                    }
                });
            },
        );
    }
    group.finish();
}

/// Benchmarks factories on distinct seeds contending on one registry.
fn bench_contended(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended");
    for threads in [2, 4, 8] {
        group.throughput(Throughput::Elements((TOTAL_IDS * threads) as u64));
        group.bench_function(format!("threads/{threads}/elems/{TOTAL_IDS}"), |b| {
            b.iter_custom(|iters| {
                let registry = Arc::new(SeedRegistry::new());
                let factories: Vec<_> = (0..threads)
                    .map(|seed| {
                        PrefetchFactory::new(Arc::clone(&registry), seed as i64, 64, 256).unwrap()
                    })
                    .collect();
                let barrier = Barrier::new(threads + 1);

                let start = scope(|s| {
                    for factory in &factories {
                        let barrier = &barrier;
                        s.spawn(move || {
                            barrier.wait();
                            for _ in 0..iters {
                                for _ in 0..TOTAL_IDS {
                                    black_box(factory.dequeue().unwrap());
                                }
                            }
                        });
                    }
                    barrier.wait();
                    Instant::now()
                });
                start.elapsed()
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_random, bench_seeded, bench_contended);
criterion_main!(benches);
