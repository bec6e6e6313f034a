//! OHLCV Candle and Series
//!
//! A `Candle` is one observed sample of market activity. A `CandleSeries` is the
//! time-ordered sequence the detector consumes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV sample at a timestamp
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(
        timestamp: DateTime<Utc>,
        open: f64,
        high: f64,
        low: f64,
        close: f64,
        volume: f64,
    ) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Intraday high-low spread relative to the low: (high - low) / low
    ///
    /// Caller must ensure `low > 0`; the detector validates this before calling.
    pub fn shadow_percent(&self) -> f64 {
        (self.high - self.low) / self.low
    }

    /// Validate OHLC data integrity
    pub fn is_well_formed(&self) -> bool {
        self.high >= self.low
            && self.close >= self.low
            && self.close <= self.high
            && self.open >= self.low
            && self.open <= self.high
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
            && self.open.is_finite()
            && self.volume.is_finite()
            && self.volume >= 0.0
    }
}

/// Time-ordered sequence of candles
///
/// Serializes as a plain JSON array of candles.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandleSeries {
    candles: Vec<Candle>,
}

impl CandleSeries {
    pub fn new(candles: Vec<Candle>) -> Self {
        Self { candles }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self { candles: Vec::with_capacity(capacity) }
    }

    pub fn push(&mut self, candle: Candle) {
        self.candles.push(candle);
    }

    pub fn len(&self) -> usize {
        self.candles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Candle> {
        self.candles.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Candle> {
        self.candles.get_mut(index)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candle> {
        self.candles.iter()
    }

    pub fn candles(&self) -> &[Candle] {
        &self.candles
    }

    /// Volumes in series order
    pub fn volumes(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.volume).collect()
    }

    /// True when timestamps are strictly increasing
    ///
    /// The detector assumes chronological order but does not enforce it.
    pub fn is_chronological(&self) -> bool {
        self.candles
            .windows(2)
            .all(|pair| pair[0].timestamp < pair[1].timestamp)
    }
}

impl From<Vec<Candle>> for CandleSeries {
    fn from(candles: Vec<Candle>) -> Self {
        Self::new(candles)
    }
}

impl FromIterator<Candle> for CandleSeries {
    fn from_iter<I: IntoIterator<Item = Candle>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a CandleSeries {
    type Item = &'a Candle;
    type IntoIter = std::slice::Iter<'a, Candle>;

    fn into_iter(self) -> Self::IntoIter {
        self.candles.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::TimeZone;

    fn ts(minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 0, minute, 0).unwrap()
    }

    #[test]
    fn test_shadow_percent() {
        let candle = Candle::new(ts(0), 100.0, 110.0, 100.0, 105.0, 1000.0);
        assert_relative_eq!(candle.shadow_percent(), 0.1, epsilon = 1e-12);
    }

    #[test]
    fn test_inverted_candle_has_negative_shadow() {
        let candle = Candle::new(ts(0), 100.0, 95.0, 100.0, 98.0, 1000.0);
        assert!(candle.shadow_percent() < 0.0);
        assert!(!candle.is_well_formed());
    }

    #[test]
    fn test_candle_validation() {
        let valid = Candle::new(ts(0), 100.0, 105.0, 95.0, 102.0, 1000.0);
        assert!(valid.is_well_formed());

        let close_outside = Candle::new(ts(0), 100.0, 105.0, 95.0, 110.0, 1000.0);
        assert!(!close_outside.is_well_formed());

        let negative_volume = Candle::new(ts(0), 100.0, 105.0, 95.0, 102.0, -1.0);
        assert!(!negative_volume.is_well_formed());
    }

    #[test]
    fn test_series_chronology() {
        let ordered: CandleSeries = (0..3)
            .map(|m| Candle::new(ts(m), 1.0, 1.0, 1.0, 1.0, 1.0))
            .collect();
        assert!(ordered.is_chronological());
        assert_eq!(ordered.len(), 3);

        let mut duplicated = ordered.clone();
        duplicated.push(Candle::new(ts(2), 1.0, 1.0, 1.0, 1.0, 1.0));
        assert!(!duplicated.is_chronological());
    }

    #[test]
    fn test_series_serializes_as_array() {
        let series = CandleSeries::new(vec![Candle::new(ts(5), 1.0, 2.0, 0.5, 1.5, 10.0)]);
        let json = serde_json::to_string(&series).unwrap();
        assert!(json.starts_with('['));

        let parsed: CandleSeries = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, series);
    }
}
