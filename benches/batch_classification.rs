//! Benchmarks for batch classification: sequential vs Rayon.

use beverage_scorer_rust::data::{ProductRecord, RecordId};
use beverage_scorer_rust::{BeverageScorer, Procedure, ScoringConfig};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

/// Deterministic synthetic catalogue
fn synthetic_records(n: usize) -> Vec<ProductRecord> {
    (0..n)
        .map(|i| {
            let t = (i * 7919 % 1000) as f64 / 1000.0;
            ProductRecord {
                id: RecordId(i),
                name: format!("Product {}", i),
                category: ["Soda", "Jus", "Eau", "Thé"][i % 4].to_string(),
                energy_kj: 400.0 * t,
                saturated_fat_g: 1.2 * (1.0 - t),
                sugars_g: 15.0 * t,
                salt_g: 0.5 * ((i % 13) as f64 / 13.0),
                protein_g: 4.0 * (1.0 - t),
                fiber_g: 3.0 * ((i % 5) as f64 / 5.0),
                fruit_veg_pct: 100.0 * ((i % 11) as f64 / 11.0),
                additive_count: (i % 6) as f64,
                reference_label: Some(["A", "B", "C", "D", "E"][i % 5].to_string()),
                organic_label: if i % 3 == 0 { "OUI" } else { "NON" }.to_string(),
                ..Default::default()
            }
        })
        .collect()
}

fn bench_electre(c: &mut Criterion) {
    let mut group = c.benchmark_group("electre_tri");
    for size in [1_000, 10_000] {
        let scorer = BeverageScorer::new(synthetic_records(size), ScoringConfig::default())
            .expect("scorer");

        group.bench_with_input(BenchmarkId::new("sequential", size), &scorer, |b, s| {
            b.iter(|| black_box(s.classify(Procedure::Pessimistic, 0.6)))
        });
        group.bench_with_input(BenchmarkId::new("parallel", size), &scorer, |b, s| {
            b.iter(|| black_box(s.classify_parallel(Procedure::Pessimistic, 0.6)))
        });
    }
    group.finish();
}

fn bench_compare_methods(c: &mut Criterion) {
    let scorer = BeverageScorer::new(synthetic_records(5_000), ScoringConfig::default())
        .expect("scorer");
    c.bench_function("compare_methods_5000", |b| {
        b.iter(|| black_box(scorer.compare_methods()))
    });
}

criterion_group!(benches, bench_electre, bench_compare_methods);
criterion_main!(benches);
