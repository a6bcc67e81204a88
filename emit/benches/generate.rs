use criterion::{black_box, criterion_group, criterion_main, Criterion};
use emit::{generate_games_and_categories_sql, generate_runs_csv, generate_runs_sql, RowBound};

fn bench_generate(c: &mut Criterion) {
    let bound = RowBound::default();
    let mut group = c.benchmark_group("generate");
    group.bench_function("many_games_sql", |b| {
        b.iter(|| generate_games_and_categories_sql(black_box(bound)));
    });
    group.bench_function("many_runs_csv", |b| {
        b.iter(|| generate_runs_csv(black_box(bound)));
    });
    group.bench_function("many_runs_sql", |b| {
        b.iter(|| generate_runs_sql(black_box(bound)));
    });
    group.finish();
}

criterion_group!(benches, bench_generate);
criterion_main!(benches);
