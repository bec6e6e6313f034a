//! Synthetic Series Generator
//!
//! Builds a quiet OHLCV series with normally distributed prices and volumes,
//! then plants a single fat-finger candle. Used by the `demo` command and tests.
//!
//! Randomness always comes from a caller-supplied RNG so runs are reproducible
//! from a seed.

use chrono::{DateTime, Duration, Utc};
use rand::distributions::Distribution;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use statrs::distribution::Normal;
use thiserror::Error;

use crate::domain::{Candle, CandleSeries};

/// 2024-01-01T00:00:00Z
const DEFAULT_START_SECS: i64 = 1_704_067_200;

/// Shape of the generated quiet series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyntheticConfig {
    /// Number of candles
    pub size: usize,
    /// Mean price
    pub base_price: f64,
    /// Price standard deviation
    pub price_std: f64,
    /// Mean volume
    pub base_volume: f64,
    /// Volume standard deviation
    pub volume_std: f64,
    /// high = price + half_spread, low = price - half_spread
    pub half_spread: f64,
    /// Timestamp of the first candle
    pub start: DateTime<Utc>,
    /// Minutes between candles
    pub interval_minutes: i64,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            size: 100,
            base_price: 150.0,
            price_std: 0.5,
            base_volume: 1000.0,
            volume_std: 100.0,
            half_spread: 0.1,
            start: DateTime::from_timestamp(DEFAULT_START_SECS, 0).unwrap_or_default(),
            interval_minutes: 5,
        }
    }
}

/// The planted fat-finger candle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpikeConfig {
    pub index: usize,
    pub high: f64,
    pub volume: f64,
}

impl Default for SpikeConfig {
    fn default() -> Self {
        Self {
            index: 50,
            high: 185.0,
            volume: 8000.0,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SyntheticError {
    #[error("Invalid {name} distribution: mean = {mean}, std = {std}")]
    InvalidDistribution {
        name: &'static str,
        mean: f64,
        std: f64,
    },
    #[error("Spike index {index} out of range for series of {len} candles")]
    SpikeOutOfRange { index: usize, len: usize },
}

fn normal(name: &'static str, mean: f64, std: f64) -> Result<Normal, SyntheticError> {
    Normal::new(mean, std).map_err(|_| SyntheticError::InvalidDistribution { name, mean, std })
}

/// Generate a quiet series: open = close = price, fixed half-spread around it
///
/// Sampled volumes are floored at zero.
pub fn generate_series<R: Rng + ?Sized>(
    config: &SyntheticConfig,
    rng: &mut R,
) -> Result<CandleSeries, SyntheticError> {
    let prices = normal("price", config.base_price, config.price_std)?;
    let volumes = normal("volume", config.base_volume, config.volume_std)?;
    let step = Duration::minutes(config.interval_minutes);

    let mut series = CandleSeries::with_capacity(config.size);
    let mut timestamp = config.start;
    for _ in 0..config.size {
        let price = prices.sample(rng);
        let volume = volumes.sample(rng).max(0.0);
        series.push(Candle::new(
            timestamp,
            price,
            price + config.half_spread,
            price - config.half_spread,
            price,
            volume,
        ));
        timestamp += step;
    }
    Ok(series)
}

/// Overwrite one candle's high and volume; its low is left untouched
pub fn inject_spike(series: &mut CandleSeries, spike: &SpikeConfig) -> Result<(), SyntheticError> {
    let len = series.len();
    let candle = series
        .get_mut(spike.index)
        .ok_or(SyntheticError::SpikeOutOfRange { index: spike.index, len })?;
    candle.high = spike.high;
    candle.volume = spike.volume;
    Ok(())
}

/// Seeded quiet series with one planted spike
pub fn generate_with_spike(
    config: &SyntheticConfig,
    spike: &SpikeConfig,
    seed: u64,
) -> Result<CandleSeries, SyntheticError> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut series = generate_series(config, &mut rng)?;
    inject_spike(&mut series, spike)?;
    tracing::debug!(
        seed,
        size = series.len(),
        spike_index = spike.index,
        "Generated synthetic series"
    );
    Ok(series)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_series_shape() {
        let config = SyntheticConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let series = generate_series(&config, &mut rng).unwrap();

        assert_eq!(series.len(), 100);
        assert!(series.is_chronological());
        assert_eq!(
            series.get(1).unwrap().timestamp - series.get(0).unwrap().timestamp,
            Duration::minutes(5)
        );
        for candle in &series {
            assert!(candle.is_well_formed());
            assert!((candle.high - candle.low - 0.2).abs() < 1e-9);
        }
    }

    #[test]
    fn test_same_seed_same_series() {
        let config = SyntheticConfig::default();
        let a = generate_series(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_series(&config, &mut StdRng::seed_from_u64(42)).unwrap();
        let c = generate_series(&config, &mut StdRng::seed_from_u64(43)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_invalid_distribution() {
        let config = SyntheticConfig {
            price_std: -1.0,
            ..Default::default()
        };
        let err = generate_series(&config, &mut StdRng::seed_from_u64(1)).unwrap_err();
        assert!(matches!(err, SyntheticError::InvalidDistribution { name: "price", .. }));
    }

    #[test]
    fn test_inject_spike_keeps_low() {
        let mut series =
            generate_series(&SyntheticConfig::default(), &mut StdRng::seed_from_u64(7)).unwrap();
        let before = *series.get(50).unwrap();

        inject_spike(&mut series, &SpikeConfig::default()).unwrap();
        let after = series.get(50).unwrap();
        assert_eq!(after.high, 185.0);
        assert_eq!(after.volume, 8000.0);
        assert_eq!(after.low, before.low);
        assert_eq!(after.timestamp, before.timestamp);
    }

    #[test]
    fn test_inject_spike_out_of_range() {
        let config = SyntheticConfig {
            size: 10,
            ..Default::default()
        };
        let spike = SpikeConfig::default();
        let err = generate_with_spike(&config, &spike, 7).unwrap_err();
        assert_eq!(err, SyntheticError::SpikeOutOfRange { index: 50, len: 10 });
    }
}
