//! Beta of a return series against a benchmark.

use quantplay_types::Series;
use std::num::NonZeroUsize;
use tracing::trace;

use crate::sample_covariance;

/// Beta indicators over return series.
///
/// Paired statistics use only the timestamps both inputs share. A
/// zero-variance benchmark is not guarded: the division result
/// (`inf` or `NaN`) is returned as the value.
#[derive(Debug, Clone, Copy, Default)]
pub struct Indicators;

impl Indicators {
    /// Creates the indicator set.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Computes `Cov(returns, benchmark) / Var(benchmark)` over the whole
    /// sample.
    ///
    /// The covariance uses the timestamps both series share, skipping pairs
    /// with a missing value on either side. The variance uses every
    /// non-missing benchmark observation. Fewer than two usable
    /// observations on either side yield `NaN`.
    #[must_use]
    pub fn beta(&self, returns: &Series, benchmark: &Series) -> f64 {
        let (_, asset, bench) = returns.align(benchmark);
        let (asset, bench): (Vec<f64>, Vec<f64>) = asset
            .into_iter()
            .zip(bench)
            .filter(|(a, b)| !a.is_nan() && !b.is_nan())
            .unzip();

        let observed: Vec<f64> = benchmark
            .values()
            .into_iter()
            .filter(|b| !b.is_nan())
            .collect();

        let beta = sample_covariance(&asset, &bench) / sample_covariance(&observed, &observed);
        trace!(
            pairs = asset.len(),
            benchmark_observations = observed.len(),
            beta,
            "computed beta"
        );
        beta
    }

    /// Computes beta over each trailing window of `window` observations.
    ///
    /// The result is indexed like the aligned inputs. The first
    /// `window - 1` positions, and any window holding a missing value, are
    /// `NaN`. A window of one has no sample variance, so every position is
    /// `NaN`.
    #[must_use]
    pub fn rolling_beta(
        &self,
        returns: &Series,
        benchmark: &Series,
        window: NonZeroUsize,
    ) -> Series {
        let (index, asset, bench) = returns.align(benchmark);
        let window = window.get();

        index
            .into_iter()
            .enumerate()
            .map(|(end, ts)| {
                let value = match (end + 1).checked_sub(window) {
                    Some(start) => {
                        let asset = &asset[start..=end];
                        let bench = &bench[start..=end];
                        sample_covariance(asset, bench) / sample_covariance(bench, bench)
                    }
                    None => f64::NAN,
                };
                (ts, value)
            })
            .collect()
    }
}
