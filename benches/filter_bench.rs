//! Benchmarks for the range filter and chart binding
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use debtscope::chart::{bind_line_chart, bind_scatter_chart};
use debtscope::dataset::{filter, parse_csv_str, Dataset, RangeSelection, Record};

fn create_test_records(count: usize) -> Vec<Record> {
    (0..count)
        .map(|i| Record::new(1960 + i as i32, i as f64 * 1.5))
        .collect()
}

fn create_test_csv(count: usize) -> String {
    let mut csv = String::from("refPeriod,Value\n");
    for record in create_test_records(count) {
        csv.push_str(&format!("{},{}\n", record.ref_period, record.value.unwrap_or_default()));
    }
    csv
}

fn bench_filter(c: &mut Criterion) {
    let mut group = c.benchmark_group("filter");

    for size in [63, 1000, 100_000] {
        let records = create_test_records(size);
        let upper = 1960 + size as i32 / 2;

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("half_range_{}", size), |b| {
            b.iter(|| filter(black_box(&records), 1960, upper))
        });

        group.bench_function(format!("inverted_{}", size), |b| {
            b.iter(|| filter(black_box(&records), upper, 1960))
        });
    }

    group.finish();
}

fn bench_bind(c: &mut Criterion) {
    let mut group = c.benchmark_group("bind");

    for size in [63, 100_000] {
        let dataset = Dataset::new(create_test_records(size));
        let view = dataset.filter(RangeSelection::new(1960, 1960 + size as i32));

        group.throughput(Throughput::Elements(size as u64));

        group.bench_function(format!("line_{}", size), |b| {
            b.iter(|| bind_line_chart(black_box(&view)))
        });

        group.bench_function(format!("scatter_plotly_{}", size), |b| {
            b.iter(|| bind_scatter_chart(black_box(&view)).to_plotly())
        });
    }

    group.finish();
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");

    for size in [63, 10_000] {
        let csv = create_test_csv(size);

        group.throughput(Throughput::Bytes(csv.len() as u64));

        group.bench_function(format!("csv_{}", size), |b| {
            b.iter(|| parse_csv_str(black_box(&csv)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(benches, bench_filter, bench_bind, bench_parse);
criterion_main!(benches);
