//! FingerTrap Detector
//!
//! Two-stage filter for fat-finger errors in OHLCV data:
//!
//! 1. Spread gate: shadow = (high - low) / low must exceed
//!    `mean(shadow) + threshold_sigma * std(shadow)`, where mean and sample std
//!    are taken over the whole series (one static limit, not a rolling one).
//! 2. Volume confirmation: volume must exceed `volume_factor` times the trailing
//!    20-bar average volume. Candles before the window fills never qualify.

use crate::detection::error::DetectionError;
use crate::detection::params::DetectionParams;
use crate::detection::statistics::{moments, rolling_mean, shadow_percents};
use crate::domain::{AnomalyRecord, AnomalySet, CandleSeries, DetectionStats};

/// Fat-finger anomaly detector
///
/// Stateless apart from its parameters; `detect` never mutates the series and
/// returns the same result for the same input.
#[derive(Debug, Clone, Default)]
pub struct FingerTrap {
    params: DetectionParams,
}

impl FingerTrap {
    pub fn new(params: DetectionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DetectionParams {
        &self.params
    }

    /// Scan a series and return the candles flagged by both checks
    ///
    /// Sigma and factor are taken as given; a zero volume window is rejected.
    pub fn detect(&self, series: &CandleSeries) -> Result<AnomalySet, DetectionError> {
        if self.params.volume_window == 0 {
            return Err(DetectionError::ZeroVolumeWindow);
        }
        let shadows = shadow_percents(series)?;
        let m = moments(&shadows)?;
        let limit = m.mean + self.params.threshold_sigma * m.std_dev;

        tracing::debug!(
            len = series.len(),
            mean_shadow = m.mean,
            std_shadow = m.std_dev,
            limit,
            "Shadow statistics computed"
        );

        let avg_volumes = rolling_mean(&series.volumes(), self.params.volume_window);

        let records: Vec<AnomalyRecord> = series
            .iter()
            .zip(shadows.iter().zip(avg_volumes.iter()))
            .enumerate()
            .filter_map(|(index, (candle, (&shadow, &avg_volume)))| {
                let avg_volume = avg_volume?;
                let spread_breach = shadow > limit;
                let volume_breach = candle.volume > self.params.volume_factor * avg_volume;
                (spread_breach && volume_breach).then_some(AnomalyRecord {
                    index,
                    candle: *candle,
                    shadow_percent: shadow,
                    avg_volume,
                })
            })
            .collect();

        if !records.is_empty() {
            tracing::info!(
                count = records.len(),
                first_index = records[0].index,
                "Potential fat-finger candles detected"
            );
        }

        let stats = DetectionStats {
            series_len: series.len(),
            mean_shadow: m.mean,
            std_shadow: m.std_dev,
            limit,
            params: self.params,
        };
        Ok(AnomalySet::new(records, stats))
    }
}

/// Run detection with the default 20-bar volume window
pub fn detect(
    series: &CandleSeries,
    threshold_sigma: f64,
    volume_factor: f64,
) -> Result<AnomalySet, DetectionError> {
    FingerTrap::new(DetectionParams::new(threshold_sigma, volume_factor)).detect(series)
}
