use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use termlink_core::Scoreboard;

fn candidates(count: usize, len: usize) -> Vec<String> {
    (0..count)
        .map(|i| {
            (0..len)
                .map(|j| char::from(b'a' + ((i * 7 + j * 3) % 26) as u8))
                .collect()
        })
        .collect()
}

fn bench_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("score");
    for count in [8, 20, 100] {
        let pool = candidates(count, 12);
        group.bench_with_input(BenchmarkId::from_parameter(count), &pool, |b, pool| {
            b.iter(|| black_box(Scoreboard::score(pool.iter().cloned())))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_score);
criterion_main!(benches);
