use criterion::{criterion_group, criterion_main, Criterion, black_box};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use urlbloom_core::{Bloom, SharedBloom};

fn urls(n: usize, seed: u64) -> Vec<String> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..n).map(|_| format!("https://example.com/{:016x}", rng.random::<u64>())).collect()
}

fn bench_filter(c: &mut Criterion) {
    let keys = urls(10_000, 1);
    let probes = urls(10_000, 2);

    c.bench_function("insert_10k", |bch| bch.iter(|| {
        let mut f = Bloom::new(10_000_000, 3).unwrap();
        for k in &keys { black_box(f.insert(k.as_bytes())); }
    }));

    let mut f = Bloom::new(10_000_000, 3).unwrap();
    for k in &keys { let _ = f.insert(k.as_bytes()); }
    c.bench_function("contains_hit", |bch| bch.iter(|| {
        for k in &keys { black_box(f.contains(k.as_bytes())); }
    }));
    c.bench_function("contains_miss", |bch| bch.iter(|| {
        for k in &probes { black_box(f.contains(k.as_bytes())); }
    }));

    let shared = SharedBloom::new(f.clone());
    c.bench_function("shared_contains", |bch| bch.iter(|| {
        for k in &keys { black_box(shared.contains(k.as_bytes())); }
    }));
}

criterion_group!(benches, bench_filter);
criterion_main!(benches);
