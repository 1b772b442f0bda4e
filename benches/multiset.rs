use criterion::{Criterion, black_box, criterion_group, criterion_main};
use multi_collections::{HashMultiset, MultisetView, TreeMultiset};
use std::collections::HashMap;

fn bench_counting(c: &mut Criterion) {
    let n = 256;
    let mut group = c.benchmark_group("Tally 256 elements over 16 distinct");

    group.bench_function("HashMap<i32, usize>", |b| {
        b.iter(|| {
            let mut m: HashMap<i32, usize> = HashMap::new();
            for i in 0..n {
                *m.entry(black_box(i % 16)).or_insert(0) += 1;
            }
            m
        })
    });

    group.bench_function("HashMultiset<i32>", |b| {
        b.iter(|| {
            let mut m: HashMultiset<i32> = HashMultiset::new();
            for i in 0..n {
                m.add(black_box(i % 16));
            }
            m
        })
    });

    group.bench_function("TreeMultiset<i32>", |b| {
        b.iter(|| {
            let mut m: TreeMultiset<i32> = TreeMultiset::new();
            for i in 0..n {
                m.add(black_box(i % 16));
            }
            m
        })
    });
    group.finish();
}

fn bench_count_lookup(c: &mut Criterion) {
    let n = 256;
    let mut group = c.benchmark_group("Count lookup over 16 distinct");

    let hash: HashMultiset<i32> = (0..n).map(|i| i % 16).collect();
    let tree: TreeMultiset<i32> = (0..n).map(|i| i % 16).collect();

    group.bench_function("HashMultiset::count_of", |b| {
        b.iter(|| {
            for key in 0..16 {
                black_box(hash.count_of(&black_box(key)));
            }
        })
    });

    group.bench_function("TreeMultiset::count_of", |b| {
        b.iter(|| {
            for key in 0..16 {
                black_box(tree.count_of(&black_box(key)));
            }
        })
    });
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("Entry-wise merge of 16-entry multisets");

    let source: HashMultiset<i32> = (0..256).map(|i| i % 16).collect();

    group.bench_function("add_all", |b| {
        b.iter(|| {
            let mut m: HashMultiset<i32> = HashMultiset::new();
            m.add_all(&source);
            m
        })
    });

    group.bench_function("extend (per element)", |b| {
        b.iter(|| {
            let mut m: HashMultiset<i32> = HashMultiset::new();
            m.extend(source.iter_occurrences().copied());
            m
        })
    });
    group.finish();
}

criterion_group!(benches, bench_counting, bench_count_lookup, bench_merge);
criterion_main!(benches);
