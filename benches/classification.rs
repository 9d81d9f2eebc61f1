use chrono::{DateTime, TimeDelta, Utc};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use dusk_dawn::{ClassifyOptions, SiteConfig, SpaEphemeris, classify_with};
use std::hint::black_box;

fn benchmark_single_classification(c: &mut Criterion) {
    let instant = "2023-06-21T12:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let observer = SiteConfig::default().observer().unwrap();
    let ephemeris = SpaEphemeris::default();

    c.bench_function("classify_label", |b| {
        b.iter(|| {
            classify_with(
                &ephemeris,
                black_box(instant),
                black_box(&observer),
                &ClassifyOptions::default(),
            )
            .unwrap()
        })
    });

    let with_duration = ClassifyOptions::default().with_duration();
    c.bench_function("classify_with_duration", |b| {
        b.iter(|| {
            classify_with(
                &ephemeris,
                black_box(instant),
                black_box(&observer),
                &with_duration,
            )
            .unwrap()
        })
    });
}

fn benchmark_time_series_fixed_location(c: &mut Criterion) {
    let mut group = c.benchmark_group("time_series_fixed_location");

    let base = "2023-01-01T00:00:00Z".parse::<DateTime<Utc>>().unwrap();
    let observer = SiteConfig::default().observer().unwrap();
    let ephemeris = SpaEphemeris::default();
    let options = ClassifyOptions::default();

    for &count in &[24_u64, 24 * 7] {
        group.throughput(Throughput::Elements(count));

        let instants: Vec<DateTime<Utc>> = (0..count)
            .map(|i| base + TimeDelta::hours(i as i64))
            .collect();

        group.bench_with_input(BenchmarkId::new("hourly", count), &count, |b, _| {
            b.iter(|| {
                for &instant in &instants {
                    let _result =
                        classify_with(&ephemeris, black_box(instant), &observer, &options).unwrap();
                }
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_single_classification,
    benchmark_time_series_fixed_location
);
criterion_main!(benches);
