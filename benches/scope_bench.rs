//! Criterion benchmarks for the u-scope pipeline.
//!
//! Uses synthetic item batches (random DAGs with seeded costs and ROI) so
//! runs are repeatable across machines.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use u_scope::models::{PriorityTier, ProjectContext, ScopeItem, Strategy};
use u_scope::optimizer::{optimize, OptimizeOptions};
use u_scope::scenario::generate_scenarios;
use u_scope::schedule::critical_path;
use u_scope::scoring::score_all;

const CATEGORIES: [&str; 8] = [
    "electrical",
    "plumbing",
    "roof",
    "kitchen",
    "bathroom",
    "paint",
    "flooring",
    "landscaping",
];

fn synthetic_items(n: usize, seed: u64) -> Vec<ScopeItem> {
    let mut rng = SmallRng::seed_from_u64(seed);
    (0..n)
        .map(|i| {
            let tier = match rng.random_range(0..10) {
                0 => PriorityTier::Must,
                1..=4 => PriorityTier::Should,
                5..=7 => PriorityTier::Could,
                _ => PriorityTier::Nice,
            };
            let mut item = ScopeItem::new(format!("item-{i}"))
                .with_category(CATEGORIES[rng.random_range(0..CATEGORIES.len())])
                .with_tier(tier)
                .with_cost(f64::from(rng.random_range(200..8000u32)))
                .with_days(rng.random_range(1..15))
                .with_roi(f64::from(rng.random_range(0..40u32)));
            // Edges only point backwards, so the graph is acyclic.
            for _ in 0..rng.random_range(0..3usize) {
                if i > 0 {
                    item = item.with_dependency(format!("item-{}", rng.random_range(0..i)));
                }
            }
            item
        })
        .collect()
}

fn bench_scoring(c: &mut Criterion) {
    let mut group = c.benchmark_group("score_all");
    let ctx = ProjectContext::new(Strategy::Flip);

    for n in [20usize, 100, 500] {
        let items = synthetic_items(n, 42);
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| black_box(score_all(black_box(items), &ctx)))
        });
    }
    group.finish();
}

fn bench_critical_path(c: &mut Criterion) {
    let mut group = c.benchmark_group("critical_path");

    for n in [20usize, 100, 500] {
        let items = synthetic_items(n, 7);
        group.bench_with_input(BenchmarkId::from_parameter(n), &items, |b, items| {
            b.iter(|| black_box(critical_path(black_box(items))))
        });
    }
    group.finish();
}

fn bench_optimize(c: &mut Criterion) {
    let mut group = c.benchmark_group("optimize");
    group.sample_size(10);
    let options = OptimizeOptions::new(ProjectContext::new(Strategy::Rental)).with_granularity(50.0);

    for (n, budget) in [(20usize, 40_000.0), (100, 150_000.0)] {
        let items = synthetic_items(n, 3);
        group.bench_with_input(
            BenchmarkId::new(format!("n{}_b{}", n, budget), n),
            &(items, budget),
            |b, (items, budget)| b.iter(|| black_box(optimize(black_box(items), *budget, &options))),
        );
    }
    group.finish();
}

fn bench_scenarios(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_scenarios");
    group.sample_size(10);
    let ctx = ProjectContext::new(Strategy::Airbnb);
    let items = synthetic_items(40, 11);

    group.bench_function("n40", |b| {
        b.iter(|| black_box(generate_scenarios(black_box(&items), &ctx, 60_000.0)))
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_scoring,
    bench_critical_path,
    bench_optimize,
    bench_scenarios
);
criterion_main!(benches);
