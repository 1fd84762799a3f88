//! Benchmark for the three `Map` implementations against `BTreeMap`.
//!
//! Keys are a fixed permutation of `0..size`, so the binary search tree sees
//! a realistic shape rather than a sorted (degenerate) insertion order.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use mapkit::map::{HashMap, Map, SortedArrayMap, TreeMap};
use std::collections::BTreeMap;

const SIZES: [i32; 3] = [100, 1000, 10000];

fn shuffled_keys(size: i32) -> Vec<i32> {
    (0..size).map(|index| (index * 7919) % size).collect()
}

fn filled<M: Map<i32, i32> + Default>(keys: &[i32]) -> M {
    let mut map = M::default();
    for &key in keys {
        map.insert(key, key * 2);
    }
    map
}

// =============================================================================
// insert Benchmark
// =============================================================================

fn bench_insert_into<M: Map<i32, i32> + Default>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    name: &str,
    keys: &[i32],
) {
    group.bench_with_input(BenchmarkId::new(name, keys.len()), keys, |bencher, keys| {
        bencher.iter(|| {
            let mut map = M::default();
            for &key in keys {
                map.insert(black_box(key), black_box(key * 2));
            }
            black_box(map)
        });
    });
}

fn benchmark_insert(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("insert");

    for size in SIZES {
        let keys = shuffled_keys(size);
        bench_insert_into::<SortedArrayMap<i32, i32>>(&mut group, "SortedArrayMap", &keys);
        bench_insert_into::<TreeMap<i32, i32>>(&mut group, "TreeMap", &keys);
        bench_insert_into::<HashMap<i32, i32>>(&mut group, "HashMap", &keys);

        // Standard BTreeMap insert
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut map = BTreeMap::new();
                for &key in keys {
                    map.insert(black_box(key), black_box(key * 2));
                }
                black_box(map)
            });
        });
    }

    group.finish();
}

// =============================================================================
// at Benchmark
// =============================================================================

fn bench_lookup_in<M: Map<i32, i32> + Default>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    name: &str,
    keys: &[i32],
) {
    let map: M = filled(keys);
    group.bench_with_input(BenchmarkId::new(name, keys.len()), keys, |bencher, keys| {
        bencher.iter(|| {
            let mut sum = 0_i64;
            for key in keys {
                if let Ok(&value) = map.at(black_box(key)) {
                    sum += i64::from(value);
                }
            }
            black_box(sum)
        });
    });
}

fn benchmark_at(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("at");

    for size in SIZES {
        let keys = shuffled_keys(size);
        bench_lookup_in::<SortedArrayMap<i32, i32>>(&mut group, "SortedArrayMap", &keys);
        bench_lookup_in::<TreeMap<i32, i32>>(&mut group, "TreeMap", &keys);
        bench_lookup_in::<HashMap<i32, i32>>(&mut group, "HashMap", &keys);

        // Standard BTreeMap get
        let standard_map: BTreeMap<i32, i32> = keys.iter().map(|&key| (key, key * 2)).collect();
        group.bench_with_input(BenchmarkId::new("BTreeMap", size), &keys, |bencher, keys| {
            bencher.iter(|| {
                let mut sum = 0_i64;
                for key in keys {
                    if let Some(&value) = standard_map.get(black_box(key)) {
                        sum += i64::from(value);
                    }
                }
                black_box(sum)
            });
        });
    }

    group.finish();
}

// =============================================================================
// erase Benchmark
// =============================================================================

fn bench_erase_from<M: Map<i32, i32> + Default + Clone>(
    group: &mut criterion::BenchmarkGroup<'_, criterion::measurement::WallTime>,
    name: &str,
    keys: &[i32],
) {
    let map: M = filled(keys);
    group.bench_with_input(BenchmarkId::new(name, keys.len()), keys, |bencher, keys| {
        bencher.iter_batched(
            || map.clone(),
            |mut map| {
                for key in keys {
                    let _ = black_box(map.erase(key));
                }
                map
            },
            criterion::BatchSize::LargeInput,
        );
    });
}

fn benchmark_erase(criterion: &mut Criterion) {
    let mut group = criterion.benchmark_group("erase");

    for size in SIZES {
        let keys = shuffled_keys(size);
        bench_erase_from::<SortedArrayMap<i32, i32>>(&mut group, "SortedArrayMap", &keys);
        bench_erase_from::<TreeMap<i32, i32>>(&mut group, "TreeMap", &keys);
        bench_erase_from::<HashMap<i32, i32>>(&mut group, "HashMap", &keys);
    }

    group.finish();
}

// =============================================================================
// sorted_keys / find_keys Benchmark
// =============================================================================

fn bench_queries_on<M: Map<i32, i32> + Default>(
    criterion: &mut Criterion,
    name: &str,
    keys: &[i32],
) {
    let map: M = filled(keys);
    let size = keys.len();
    let (low, high) = (size as i32 / 4, size as i32 * 3 / 4);

    criterion.bench_function(&format!("sorted_keys/{name}/{size}"), |bencher| {
        bencher.iter(|| black_box(map.sorted_keys()));
    });
    criterion.bench_function(&format!("find_keys/{name}/{size}"), |bencher| {
        bencher.iter(|| black_box(map.find_keys(black_box(&low), black_box(&high))));
    });
}

fn benchmark_queries(criterion: &mut Criterion) {
    for size in SIZES {
        let keys = shuffled_keys(size);
        bench_queries_on::<SortedArrayMap<i32, i32>>(criterion, "SortedArrayMap", &keys);
        bench_queries_on::<TreeMap<i32, i32>>(criterion, "TreeMap", &keys);
        bench_queries_on::<HashMap<i32, i32>>(criterion, "HashMap", &keys);
    }
}

criterion_group!(
    benches,
    benchmark_insert,
    benchmark_at,
    benchmark_erase,
    benchmark_queries
);
criterion_main!(benches);
