use blockcache::{BlockId, LruStore};
use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

fn bench_hit(c: &mut Criterion) {
    let mut group = c.benchmark_group("hit");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("access_hot_set", |b| {
        let mut store = LruStore::new(1024).unwrap();

        // Warm the store with a set that fits
        for id in 0..100u64 {
            store.access(BlockId::new(id)).unwrap();
        }

        let mut counter = 0u64;
        b.iter(|| {
            black_box(store.access(BlockId::new(counter % 100)).unwrap());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_miss(c: &mut Criterion) {
    let mut group = c.benchmark_group("miss");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("access_streaming", |b| {
        let mut store = LruStore::new(1024).unwrap();

        // Never repeats, so every access past warm-up evicts
        let mut counter = 0u64;
        b.iter(|| {
            black_box(store.access(BlockId::new(counter)).unwrap());
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_hit_50_miss", |b| {
        let mut store = LruStore::new(1024).unwrap();
        for id in 0..100u64 {
            store.access(BlockId::new(id)).unwrap();
        }

        let mut counter = 0u64;
        b.iter(|| {
            let id = if counter % 2 == 0 {
                counter % 100
            } else {
                1_000_000 + counter
            };
            black_box(store.access(BlockId::new(id)).unwrap());
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_hit, bench_miss, bench_mixed);
criterion_main!(benches);
