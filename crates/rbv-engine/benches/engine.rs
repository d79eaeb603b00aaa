//! Engine benchmarks using criterion for historical comparison.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rbv_engine::RbTree;

fn insert_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert");

    for count in [100_i64, 1_000, 10_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(
            BenchmarkId::new("ascending", count),
            &count,
            |b, &count| {
                b.iter(|| {
                    let mut tree = RbTree::new();
                    for key in 0..count {
                        black_box(tree.insert(key));
                    }
                });
            },
        );

        group.bench_with_input(BenchmarkId::new("shuffled", count), &count, |b, &count| {
            // deterministic pseudo-shuffle so runs compare like with like
            let keys: Vec<i64> = (0..count).map(|i| (i * 2_654_435_761) % count).collect();
            b.iter(|| {
                let mut tree = RbTree::new();
                for &key in &keys {
                    black_box(tree.insert(key));
                }
            });
        });
    }

    group.finish();
}

fn delete_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("delete");

    for count in [100_i64, 1_000] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("drain", count), &count, |b, &count| {
            b.iter_batched(
                || {
                    let mut tree = RbTree::new();
                    for key in 0..count {
                        tree.insert(key);
                    }
                    tree
                },
                |mut tree| {
                    for key in 0..count {
                        black_box(tree.delete(key));
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

fn search_benchmarks(c: &mut Criterion) {
    let mut group = c.benchmark_group("search");

    for count in [1_000_i64] {
        group.throughput(Throughput::Elements(count as u64));

        group.bench_with_input(BenchmarkId::new("hit", count), &count, |b, &count| {
            // searching appends steps too, so each sample gets a fresh tree
            b.iter_batched(
                || {
                    let mut tree = RbTree::new();
                    for key in 0..count {
                        tree.insert(key);
                    }
                    tree
                },
                |mut tree| {
                    for key in 0..count {
                        black_box(tree.search(key));
                    }
                },
                criterion::BatchSize::SmallInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    insert_benchmarks,
    delete_benchmarks,
    search_benchmarks
);
criterion_main!(benches);
