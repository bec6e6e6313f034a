//! Detection Error Types

use thiserror::Error;

/// Errors raised before any anomaly scan is attempted
///
/// A malformed record is never dropped from the statistics: that would shift the
/// mean and sigma for every other record, so the whole call fails instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DetectionError {
    /// No records to compute statistics over
    #[error("Invalid input: series is empty")]
    EmptySeries,

    /// A field is NaN/infinite, or volume is negative
    #[error("Invalid input at record {index}: {field} = {value}")]
    InvalidInput {
        index: usize,
        field: &'static str,
        value: f64,
    },

    /// Low price of zero or below makes shadow_percent undefined
    #[error("Zero or negative low at record {index}: low = {low}")]
    ZeroOrNegativeLow { index: usize, low: f64 },

    /// A zero-length volume window can never confirm a candle
    #[error("Invalid volume window: 0 (must be >= 1)")]
    ZeroVolumeWindow,

    /// Sample standard deviation needs at least two records
    #[error("Degenerate statistics: {len} record(s), need at least 2 for a standard deviation")]
    DegenerateStatistics { len: usize },
}

impl DetectionError {
    /// True for the InvalidInput family (empty series or a bad field)
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::EmptySeries | Self::InvalidInput { .. })
    }
}
