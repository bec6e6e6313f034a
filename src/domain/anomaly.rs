//! Anomaly Set
//!
//! The filtered result of a detection run: the flagged candles in their original
//! order, each carrying the diagnostics that flagged it.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::detection::DetectionParams;
use crate::domain::Candle;

/// A candle that passed both the spread and the volume checks
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AnomalyRecord {
    /// Position of the candle in the input series (0-based)
    pub index: usize,
    /// The original candle, unmodified
    pub candle: Candle,
    /// (high - low) / low for this candle
    pub shadow_percent: f64,
    /// Trailing volume average that the candle's volume was compared against
    pub avg_volume: f64,
}

impl AnomalyRecord {
    pub fn timestamp(&self) -> DateTime<Utc> {
        self.candle.timestamp
    }

    /// How many times the rolling average volume traded on this candle
    pub fn volume_ratio(&self) -> f64 {
        if self.avg_volume > 0.0 {
            self.candle.volume / self.avg_volume
        } else {
            f64::INFINITY
        }
    }
}

/// Series-wide statistics behind a detection run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DetectionStats {
    pub series_len: usize,
    pub mean_shadow: f64,
    pub std_shadow: f64,
    /// mean_shadow + threshold_sigma * std_shadow
    pub limit: f64,
    pub params: DetectionParams,
}

/// Ordered subsequence of the input flagged as probable fat-finger errors
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnomalySet {
    records: Vec<AnomalyRecord>,
    stats: DetectionStats,
}

impl AnomalySet {
    pub(crate) fn new(records: Vec<AnomalyRecord>, stats: DetectionStats) -> Self {
        Self { records, stats }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, AnomalyRecord> {
        self.records.iter()
    }

    pub fn records(&self) -> &[AnomalyRecord] {
        &self.records
    }

    pub fn stats(&self) -> &DetectionStats {
        &self.stats
    }

    /// Input positions of the flagged candles, ascending
    pub fn indices(&self) -> Vec<usize> {
        self.records.iter().map(|r| r.index).collect()
    }

    /// (timestamp, high, low, volume, shadow_percent) rows for display
    pub fn rows(&self) -> Vec<(DateTime<Utc>, f64, f64, f64, f64)> {
        self.records
            .iter()
            .map(|r| {
                (
                    r.candle.timestamp,
                    r.candle.high,
                    r.candle.low,
                    r.candle.volume,
                    r.shadow_percent,
                )
            })
            .collect()
    }
}

impl<'a> IntoIterator for &'a AnomalySet {
    type Item = &'a AnomalyRecord;
    type IntoIter = std::slice::Iter<'a, AnomalyRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
