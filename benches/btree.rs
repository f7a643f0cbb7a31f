//! B-tree benchmarks: insert throughput and point lookups against a
//! real index file in a temp directory.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use tempfile::tempdir;

use blocktree::BTree;

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("btree_insert");

    for count in [100u64, 1000].iter() {
        group.throughput(Throughput::Elements(*count));
        group.bench_with_input(BenchmarkId::new("sequential", count), count, |b, &count| {
            b.iter_with_setup(
                || {
                    let dir = tempdir().unwrap();
                    let tree = BTree::create(dir.path().join("bench.idx")).unwrap();
                    (dir, tree)
                },
                |(dir, mut tree)| {
                    for key in 0..count {
                        tree.insert(key, key).unwrap();
                    }
                    (dir, tree)
                },
            );
        });

        group.bench_with_input(BenchmarkId::new("scattered", count), count, |b, &count| {
            b.iter_with_setup(
                || {
                    let dir = tempdir().unwrap();
                    let tree = BTree::create(dir.path().join("bench.idx")).unwrap();
                    (dir, tree)
                },
                |(dir, mut tree)| {
                    for i in 0..count {
                        // Multiplicative stride scatters keys across
                        // the key space without repeats.
                        let key = i.wrapping_mul(2654435761) % (count * 16);
                        let _ = tree.insert(key, i);
                    }
                    (dir, tree)
                },
            );
        });
    }

    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let mut group = c.benchmark_group("btree_search");

    let dir = tempdir().unwrap();
    let mut tree = BTree::create(dir.path().join("bench.idx")).unwrap();
    for key in 0..10_000u64 {
        tree.insert(key, key).unwrap();
    }

    group.throughput(Throughput::Elements(1));
    group.bench_function("hit", |b| {
        let mut key = 0u64;
        b.iter(|| {
            key = (key + 7919) % 10_000;
            black_box(tree.search(key).unwrap())
        });
    });
    group.bench_function("miss", |b| {
        b.iter(|| black_box(tree.search(20_000).unwrap()));
    });

    group.finish();
}

criterion_group!(benches, bench_insert, bench_search);
criterion_main!(benches);
