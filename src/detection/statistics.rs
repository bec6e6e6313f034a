//! Series Statistics
//!
//! Reductions used by the fat-finger filter:
//! - shadow percent per candle, with input validation in the same pass
//! - global mean and sample standard deviation (N-1) of the shadow percents
//! - trailing simple moving average of volume, O(n) via a compensated running sum

use statrs::statistics::Statistics;

use crate::detection::error::DetectionError;
use crate::domain::CandleSeries;

/// Mean and sample standard deviation over a whole series
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeriesMoments {
    pub mean: f64,
    pub std_dev: f64,
}

/// Validate every candle and compute its shadow percent
///
/// Fails on the first offending record. Non-finite prices or volume and negative
/// volume are `InvalidInput`; a low at or below zero is `ZeroOrNegativeLow`.
pub fn shadow_percents(series: &CandleSeries) -> Result<Vec<f64>, DetectionError> {
    if series.is_empty() {
        return Err(DetectionError::EmptySeries);
    }

    let mut shadows = Vec::with_capacity(series.len());
    for (index, candle) in series.iter().enumerate() {
        let fields = [
            ("open", candle.open),
            ("high", candle.high),
            ("low", candle.low),
            ("close", candle.close),
            ("volume", candle.volume),
        ];
        if let Some(&(field, value)) = fields.iter().find(|(_, v)| !v.is_finite()) {
            return Err(DetectionError::InvalidInput { index, field, value });
        }
        if candle.volume < 0.0 {
            return Err(DetectionError::InvalidInput {
                index,
                field: "volume",
                value: candle.volume,
            });
        }
        if candle.low <= 0.0 {
            return Err(DetectionError::ZeroOrNegativeLow { index, low: candle.low });
        }
        shadows.push(candle.shadow_percent());
    }
    Ok(shadows)
}

/// Global mean and sample standard deviation
///
/// Needs at least two values; one value has no sample variance.
pub fn moments(values: &[f64]) -> Result<SeriesMoments, DetectionError> {
    if values.is_empty() {
        return Err(DetectionError::EmptySeries);
    }
    if values.len() < 2 {
        return Err(DetectionError::DegenerateStatistics { len: values.len() });
    }

    Ok(SeriesMoments {
        mean: values.iter().mean(),
        std_dev: values.iter().std_dev(),
    })
}

/// Neumaier-compensated running sum
///
/// Keeps the low-order bits lost when a huge value sits in the sum, so removing
/// it later restores the small values exactly instead of cancelling them to 0.
#[derive(Debug, Clone, Copy, Default)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn add(&mut self, value: f64) {
        let t = self.sum + value;
        if self.sum.abs() >= value.abs() {
            self.compensation += (self.sum - t) + value;
        } else {
            self.compensation += (value - t) + self.sum;
        }
        self.sum = t;
    }

    fn total(&self) -> f64 {
        self.sum + self.compensation
    }
}

/// Trailing simple moving average, inclusive of the current value
///
/// `None` for the first `window - 1` positions (and everywhere when `window` is 0).
/// O(n): the window sum slides with compensated summation.
pub fn rolling_mean(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(values.len());
    if window == 0 {
        out.resize(values.len(), None);
        return out;
    }

    let mut sum = CompensatedSum::default();
    for (i, &value) in values.iter().enumerate() {
        sum.add(value);
        if i >= window {
            sum.add(-values[i - window]);
        }
        if i + 1 >= window {
            out.push(Some(sum.total() / window as f64));
        } else {
            out.push(None);
        }
    }
    out
}
