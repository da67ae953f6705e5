//! Synthetic market data for quantplay benchmarks.

use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use quantplay_lib::{OhlcvBar, OhlcvMap, OhlcvTable, Series, Symbol};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Configuration for a synthetic universe.
#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    /// Number of symbols.
    pub symbols: usize,
    /// Bars per symbol.
    pub bars: usize,
    /// Interval label attached to every bar.
    pub interval: String,
    /// Seed for the price walk.
    pub seed: u64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            symbols: 20,
            bars: 2_000,
            interval: "1h".to_string(),
            seed: 7,
        }
    }
}

fn start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

/// Generates a random-walk table for one symbol.
pub fn synthetic_table(bars: usize, interval: &str, seed: u64) -> OhlcvTable {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut close: f64 = 100.0;
    (0..bars)
        .map(|i| {
            let open = close;
            close = open * (1.0 + rng.gen_range(-0.01..0.01));
            let high = open.max(close) * 1.002;
            let low = open.min(close) * 0.998;
            let ts = start() + TimeDelta::hours(i as i64);
            OhlcvBar::new(ts, interval, open, high, low, close, Some(1_000.0))
        })
        .collect()
}

/// Generates a universe of `config.symbols` tables sharing one time index.
pub fn synthetic_universe(config: &SyntheticConfig) -> OhlcvMap {
    (0..config.symbols)
        .map(|i| {
            let symbol = Symbol::new(format!("SYM{i:03}USDT"));
            let table = synthetic_table(config.bars, &config.interval, config.seed + i as u64);
            (symbol, table)
        })
        .collect()
}

/// Generates a return series of `len` observations.
pub fn synthetic_returns(len: usize, seed: u64) -> Series {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..len)
        .map(|i| (start() + TimeDelta::hours(i as i64), rng.gen_range(-0.01..0.01)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_universe_shape() {
        let config = SyntheticConfig {
            symbols: 3,
            bars: 50,
            ..SyntheticConfig::default()
        };
        let universe = synthetic_universe(&config);
        assert_eq!(universe.len(), 3);
        assert!(universe.iter().all(|(_, table)| table.len() == 50));
    }

    #[test]
    fn test_same_seed_same_walk() {
        let a = synthetic_table(100, "1h", 42);
        let b = synthetic_table(100, "1h", 42);
        let c = synthetic_table(100, "1h", 43);
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|bar| bar.low <= bar.close && bar.close <= bar.high));
    }

    #[test]
    fn test_returns_bounded() {
        let returns = synthetic_returns(1_000, 3);
        assert_eq!(returns.len(), 1_000);
        assert!(returns.values().iter().all(|r| (-0.01..0.01).contains(r)));
    }
}
