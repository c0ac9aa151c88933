use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use contactbook::{contact::ContactFields, core::store::ContactStore};

fn fields(i: u64) -> ContactFields {
    // Reverse-ish insertion order so every insert lands mid-sequence.
    let key = 1_000_000 - i;
    ContactFields::new(format!("F{key}"), format!("L{}", i % 97), format!("u{i}@x.com"))
}

fn bench_inserts(c: &mut Criterion) {
    c.bench_function("store_insert_5k", |b| {
        b.iter(|| {
            let mut store = ContactStore::new();
            for i in 0..5_000u64 {
                let _ = store.insert(fields(i));
            }
        });
    });
}

fn bench_updates(c: &mut Criterion) {
    c.bench_function("store_update_2k", |b| {
        b.iter(|| {
            let mut store = ContactStore::new();
            for i in 0..2_000u64 {
                let _ = store.insert(fields(i));
            }
            for i in 0..2_000u64 {
                let _ = store.update(i + 1, fields(i + 10_000));
            }
        });
    });
}

fn bench_duplicate_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("duplicate_add");
    for n in [100u64, 1_000, 10_000] {
        let mut store = ContactStore::new();
        for i in 0..n {
            let _ = store.insert(fields(i));
        }
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| {
                let _ = store.insert(fields(n / 2));
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_inserts, bench_updates, bench_duplicate_lookup);
criterion_main!(benches);
