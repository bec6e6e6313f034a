//! Detection Parameters
//!
//! Tunable knobs for the fat-finger filter. Defaults flag spreads more than
//! 5 sigma above the series mean that trade at over 3x the 20-bar average volume.

use serde::{Deserialize, Serialize};

/// Default number of standard deviations above the mean shadow
pub const DEFAULT_THRESHOLD_SIGMA: f64 = 5.0;
/// Default multiplier on the rolling average volume
pub const DEFAULT_VOLUME_FACTOR: f64 = 3.0;
/// Trailing window for the rolling volume baseline
pub const DEFAULT_VOLUME_WINDOW: usize = 20;

/// Detection configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectionParams {
    /// Anomaly cutoff in standard deviations above the mean shadow percent
    pub threshold_sigma: f64,
    /// Volume must exceed this multiple of the rolling average
    pub volume_factor: f64,
    /// Number of records in the trailing volume average (inclusive of current)
    pub volume_window: usize,
}

impl Default for DetectionParams {
    fn default() -> Self {
        Self {
            threshold_sigma: DEFAULT_THRESHOLD_SIGMA,
            volume_factor: DEFAULT_VOLUME_FACTOR,
            volume_window: DEFAULT_VOLUME_WINDOW,
        }
    }
}

impl DetectionParams {
    pub fn new(threshold_sigma: f64, volume_factor: f64) -> Self {
        Self {
            threshold_sigma,
            volume_factor,
            ..Default::default()
        }
    }

    pub fn with_threshold_sigma(mut self, threshold_sigma: f64) -> Self {
        self.threshold_sigma = threshold_sigma;
        self
    }

    pub fn with_volume_factor(mut self, volume_factor: f64) -> Self {
        self.volume_factor = volume_factor;
        self
    }

    /// A window of 0 fails `validate` and makes `FingerTrap::detect` return `ZeroVolumeWindow`
    pub fn with_volume_window(mut self, volume_window: usize) -> Self {
        self.volume_window = volume_window;
        self
    }

    /// Validate parameters loaded from configuration
    ///
    /// The detector itself never calls this: out-of-range sigma or factor is the
    /// caller's responsibility and simply produces a permissive filter.
    pub fn validate(&self) -> Result<(), ParamsError> {
        if !self.threshold_sigma.is_finite() || self.threshold_sigma <= 0.0 {
            return Err(ParamsError::InvalidThresholdSigma(self.threshold_sigma));
        }
        if !self.volume_factor.is_finite() || self.volume_factor <= 0.0 {
            return Err(ParamsError::InvalidVolumeFactor(self.volume_factor));
        }
        if self.volume_window == 0 {
            return Err(ParamsError::InvalidVolumeWindow(self.volume_window));
        }
        Ok(())
    }
}

/// Parameter validation errors
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParamsError {
    #[error("Invalid threshold_sigma: {0} (must be finite and > 0)")]
    InvalidThresholdSigma(f64),
    #[error("Invalid volume_factor: {0} (must be finite and > 0)")]
    InvalidVolumeFactor(f64),
    #[error("Invalid volume_window: {0} (must be >= 1)")]
    InvalidVolumeWindow(usize),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params() {
        let params = DetectionParams::default();
        assert_eq!(params.threshold_sigma, 5.0);
        assert_eq!(params.volume_factor, 3.0);
        assert_eq!(params.volume_window, 20);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_params_builder() {
        let params = DetectionParams::default()
            .with_threshold_sigma(4.0)
            .with_volume_factor(2.5)
            .with_volume_window(10);
        assert_eq!(params.threshold_sigma, 4.0);
        assert_eq!(params.volume_factor, 2.5);
        assert_eq!(params.volume_window, 10);
    }

    #[test]
    fn test_new_keeps_default_window() {
        let params = DetectionParams::new(3.0, 2.0);
        assert_eq!(params.volume_window, DEFAULT_VOLUME_WINDOW);
    }

    #[test]
    fn test_invalid_threshold_sigma() {
        let params = DetectionParams::default().with_threshold_sigma(0.0);
        assert!(matches!(params.validate(), Err(ParamsError::InvalidThresholdSigma(_))));

        let params = DetectionParams::default().with_threshold_sigma(f64::NAN);
        assert!(matches!(params.validate(), Err(ParamsError::InvalidThresholdSigma(_))));
    }

    #[test]
    fn test_invalid_volume_factor() {
        let params = DetectionParams::default().with_volume_factor(-1.0);
        assert!(matches!(params.validate(), Err(ParamsError::InvalidVolumeFactor(_))));
    }

    #[test]
    fn test_invalid_volume_window() {
        let params = DetectionParams::default().with_volume_window(0);
        assert_eq!(params.validate(), Err(ParamsError::InvalidVolumeWindow(0)));
    }
}
