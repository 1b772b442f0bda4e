use criterion::{Criterion, black_box, criterion_group, criterion_main};
use multi_collections::{ListMultimap, Multimap, SetMultimap};
use std::collections::HashMap;

fn bench_put(c: &mut Criterion) {
    let n = 64;
    let mut group = c.benchmark_group("Grouping 64 pairs under 8 keys");

    group.bench_function("HashMap<i32, Vec<i32>>", |b| {
        b.iter(|| {
            let mut m: HashMap<i32, Vec<i32>> = HashMap::new();
            for i in 0..n {
                m.entry(black_box(i % 8)).or_default().push(black_box(i));
            }
            m
        })
    });

    group.bench_function("ListMultimap<i32, i32>", |b| {
        b.iter(|| {
            let mut m: ListMultimap<i32, i32> = Multimap::new();
            for i in 0..n {
                m.put(black_box(i % 8), black_box(i));
            }
            m
        })
    });

    group.bench_function("SetMultimap<i32, i32>", |b| {
        b.iter(|| {
            let mut m: SetMultimap<i32, i32> = Multimap::new();
            for i in 0..n {
                m.put(black_box(i % 8), black_box(i));
            }
            m
        })
    });
    group.finish();
}

fn bench_lookup(c: &mut Criterion) {
    let n = 64;
    let mut group = c.benchmark_group("Value lookup under 8 keys");

    let mut multimap: ListMultimap<i32, i32> = Multimap::new();
    for i in 0..n {
        multimap.put(i % 8, i);
    }

    group.bench_function("values_of", |b| {
        b.iter(|| {
            for key in 0..8 {
                black_box(multimap.values_of(&black_box(key)).count());
            }
        })
    });

    group.bench_function("contains_entry", |b| {
        b.iter(|| {
            for i in 0..n {
                black_box(multimap.contains_entry(&black_box(i % 8), &black_box(i)));
            }
        })
    });
    group.finish();
}

fn bench_remove(c: &mut Criterion) {
    let n = 64;
    let mut group = c.benchmark_group("Remove all values key by key");

    group.bench_function("remove_all x8", |b| {
        b.iter(|| {
            let mut m: ListMultimap<i32, i32> = Multimap::new();
            for i in 0..n {
                m.put(i % 8, i);
            }
            for key in 0..8 {
                black_box(m.remove_all(&black_box(key)));
            }
            m
        })
    });
    group.finish();
}

criterion_group!(benches, bench_put, bench_lookup, bench_remove);
criterion_main!(benches);
