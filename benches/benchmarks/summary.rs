use criterion::{black_box, criterion_group, Criterion};
use cloudy::month::MonthKey;
use cloudy::summary::{daily_min_max, monthly_averages};

use super::common::generate_readings;

fn summary_criterion_benchmark(c: &mut Criterion) {
    // roughly three months of readings
    let readings = generate_readings(130_000);
    let month = MonthKey::new(2023, 2).unwrap();

    c.bench_function("monthly averages", |b| {
        b.iter(|| monthly_averages(black_box(&readings), 2023))
    });
    c.bench_function("daily min max", |b| {
        b.iter(|| daily_min_max(black_box(&readings), &month))
    });
}

criterion_group!(summary, summary_criterion_benchmark);
