use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use diehold::policy::extract_policy;
use diehold::simulation::engine::simulate_batch;
use diehold::solver::solve;
use diehold::types::GameParams;

fn bench_solve(c: &mut Criterion) {
    let mut g = c.benchmark_group("solve");
    for &(rounds, faces) in &[(100usize, 6usize), (1_000, 20), (2_000, 100)] {
        let params = GameParams::new(rounds, faces).unwrap();
        g.bench_with_input(
            BenchmarkId::new("backward_induction", format!("{rounds}x{faces}")),
            &params,
            |b, &p| b.iter(|| solve(black_box(p)).unwrap()),
        );
    }
    g.finish();
}

fn bench_simulate(c: &mut Criterion) {
    let params = GameParams::new(100, 6).unwrap();
    let table = solve(params).unwrap();
    let policy = extract_policy(&table).unwrap();

    let mut g = c.benchmark_group("simulate");
    for &trials in &[10_000usize, 100_000usize] {
        g.bench_with_input(BenchmarkId::new("dp_policy", trials), &trials, |b, &t| {
            b.iter(|| simulate_batch(black_box(&policy), params, t, 42))
        });
    }
    g.finish();
}

criterion_group!(benches, bench_solve, bench_simulate);
criterion_main!(benches);
