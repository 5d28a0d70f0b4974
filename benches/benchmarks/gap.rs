use criterion::{black_box, criterion_group, BenchmarkId, Criterion, Throughput};
use cloudy::option::GapOpts;
use cloudy::{fill_id_gaps, fill_time_gaps, reconstruct};

use super::common::generate_readings;

fn gap_criterion_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("reconstruct");
    for len in [1_000usize, 10_000, 100_000].iter() {
        let readings = generate_readings(*len);
        group.throughput(Throughput::Elements(*len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &readings, |b, readings| {
            b.iter(|| reconstruct(black_box(readings), &GapOpts::default()))
        });
    }
    group.finish();

    let readings = generate_readings(10_000);
    c.bench_function("id pass", |b| b.iter(|| fill_id_gaps(black_box(&readings))));
    let rows = fill_id_gaps(&readings);
    c.bench_function("time pass", |b| b.iter(|| fill_time_gaps(black_box(&rows))));
}

criterion_group!(gap, gap_criterion_benchmark);
