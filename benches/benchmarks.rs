use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use fx_profit::{
    currency::Currency,
    data::InMemoryRateSource,
    portfolio::select_best,
    scanner::scan,
    series::{RateSeries, Sample},
    session::AnalysisSession,
};
use rust_decimal::Decimal;

fn synthetic_series(code: &str, days: i64, seed: f64) -> RateSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let samples = (0..days).map(|i| {
        let t = i as f64;
        let rate = 50.0 + seed + 10.0 * (t / 37.0 + seed).sin() + 3.0 * (t / 5.0).cos();
        Sample::new(start + Duration::days(i), rate)
    });
    RateSeries::new(Currency::new(code, code), samples)
}

fn benchmark_scan(c: &mut Criterion) {
    let series = synthetic_series("USD", 10_000, 1.0);

    c.bench_function("scan_10000_samples", |b| {
        b.iter(|| scan(black_box(series.samples())));
    });
}

fn benchmark_select_best(c: &mut Criterion) {
    let all: Vec<RateSeries> = (0..50)
        .map(|i| synthetic_series(&format!("C{:02}", i), 3_650, i as f64 * 0.7))
        .collect();
    let capital = Decimal::from(100_000);

    c.bench_function("select_best_50_currencies", |b| {
        b.iter(|| select_best(black_box(&all), capital));
    });
}

fn benchmark_full_run(c: &mut Criterion) {
    let all: Vec<RateSeries> = (0..50)
        .map(|i| synthetic_series(&format!("C{:02}", i), 365, i as f64 * 0.3))
        .collect();
    let source = InMemoryRateSource::new(all);
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).unwrap();
    let end = start + Duration::days(364);
    let session = AnalysisSession::new(&source).with_today(end);

    c.bench_function("analysis_run_one_year", |b| {
        b.iter(|| session.run(start, end, black_box(Decimal::from(1_000))));
    });
}

criterion_group!(
    benches,
    benchmark_scan,
    benchmark_select_best,
    benchmark_full_run
);
criterion_main!(benches);
