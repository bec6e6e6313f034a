//! Domain Layer - Market data and detection results
//!
//! Pure data types with no I/O:
//! - `candle`: OHLCV `Candle` and the time-ordered `CandleSeries`
//! - `anomaly`: `AnomalySet` returned by the detector

pub mod anomaly;
pub mod candle;

pub use anomaly::{AnomalyRecord, AnomalySet, DetectionStats};
pub use candle::{Candle, CandleSeries};
