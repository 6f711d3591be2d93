//! Table generation and fixed-point benchmarks

use std::time::Duration;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use exptable::app::generator::{ValueFormat, generate_tables, write_tables};
use exptable::{DecimalStyle, FixedPoint, FixedTables, Variant};

fn ci_criterion() -> Criterion {
    Criterion::default()
        .sample_size(15)
        .measurement_time(Duration::from_secs(5))
}

fn bench_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate");

    group.bench_function("full", |b| b.iter(|| generate_tables(black_box(Variant::Full))));

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let tables = generate_tables(Variant::Full);

    for (name, format) in [
        ("shortest", ValueFormat::Decimal(DecimalStyle::Shortest)),
        ("exact", ValueFormat::Decimal(DecimalStyle::Exact)),
        ("fixed", ValueFormat::Fixed),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                let mut buf = Vec::with_capacity(16 * 1024);
                write_tables(&mut buf, Variant::Full, black_box(&tables), format).unwrap();
                buf
            })
        });
    }

    group.finish();
}

fn bench_fixed_point(c: &mut Criterion) {
    let mut group = c.benchmark_group("fixed_point");
    let tables = FixedTables::new();
    let x = FixedPoint::from_f64(2.5);

    group.bench_function("exp", |b| b.iter(|| tables.exp(black_box(x))));
    group.bench_function("ln", |b| b.iter(|| tables.ln(black_box(x))));

    group.finish();
}

criterion_group! {
    name = benches;
    config = ci_criterion();
    targets = bench_generate, bench_render, bench_fixed_point
}
criterion_main!(benches);
