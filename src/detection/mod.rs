//! Detection Layer - Fat-Finger Anomaly Filter
//!
//! Flags OHLCV candles whose intraday spread is an outlier for the whole series
//! and whose volume confirms unusual activity:
//! - `params`: threshold_sigma / volume_factor / volume_window
//! - `statistics`: shadow percent, global mean/std, rolling volume average
//! - `finger_trap`: the two-stage detector

pub mod error;
pub mod finger_trap;
pub mod params;
pub mod statistics;

pub use error::DetectionError;
pub use finger_trap::{detect, FingerTrap};
pub use params::{DetectionParams, ParamsError};
pub use statistics::SeriesMoments;
