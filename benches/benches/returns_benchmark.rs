//! Return-matrix assembly and rolling beta benchmarks.
//!
//! Run with: `cargo bench --package quantplay-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use quantplay_bench::{SyntheticConfig, synthetic_returns, synthetic_universe};
use quantplay_lib::{DataManager, Indicators, PriceStyle};
use std::hint::black_box;
use std::num::NonZeroUsize;
use tempfile::TempDir;

fn return_matrix_benchmark(c: &mut Criterion) {
    let manager = DataManager::new("unused");
    let mut group = c.benchmark_group("prep_return_data");

    for symbols in [5, 20, 50] {
        let config = SyntheticConfig {
            symbols,
            ..SyntheticConfig::default()
        };
        let universe = synthetic_universe(&config);
        group.throughput(Throughput::Elements((symbols * config.bars) as u64));

        for style in PriceStyle::all() {
            group.bench_with_input(
                BenchmarkId::new(style.as_str(), symbols),
                &universe,
                |b, universe| b.iter(|| manager.prep_return_data(black_box(universe), *style)),
            );
        }
    }

    group.finish();
}

fn load_benchmark(c: &mut Criterion) {
    let dir = TempDir::new().unwrap();
    let manager = DataManager::new(dir.path());
    let config = SyntheticConfig::default();
    let universe = synthetic_universe(&config);
    for (symbol, table) in universe.iter() {
        manager.save_data(symbol.as_str(), table).unwrap();
    }
    let symbols = manager.list_universe().unwrap();

    let mut group = c.benchmark_group("load");
    group.sample_size(20);
    group.throughput(Throughput::Elements((config.symbols * config.bars) as u64));
    group.bench_function("prep_ohlcv_data", |b| {
        b.iter(|| manager.prep_ohlcv_data(black_box(&symbols), "1h").unwrap());
    });
    group.finish();
}

fn rolling_beta_benchmark(c: &mut Criterion) {
    let indicators = Indicators::new();
    let returns = synthetic_returns(10_000, 1);
    let benchmark = synthetic_returns(10_000, 2);

    let mut group = c.benchmark_group("rolling_beta");
    group.throughput(Throughput::Elements(returns.len() as u64));

    for window in [24, 168, 720] {
        let size = NonZeroUsize::new(window).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(window), &size, |b, size| {
            b.iter(|| indicators.rolling_beta(black_box(&returns), black_box(&benchmark), *size));
        });
    }

    group.bench_function("beta", |b| {
        b.iter(|| indicators.beta(black_box(&returns), black_box(&benchmark)));
    });
    group.finish();
}

criterion_group!(
    benches,
    return_matrix_benchmark,
    load_benchmark,
    rolling_beta_benchmark
);
criterion_main!(benches);
