//! FingerTrap - Fat-Finger Anomaly Detection Library
//!
//! Flags erroneous price/volume spikes in OHLCV series before they reach a backtest.
//!
//! # Modules
//!
//! - `domain`: Market data and result types (Candle, CandleSeries, AnomalySet)
//! - `detection`: The two-stage filter (FingerTrap, DetectionParams, statistics)
//! - `adapters`: Synthetic data, JSON loading, report rendering, CLI
//! - `config`: Configuration loading and validation
//!
//! # Example
//!
//! ```no_run
//! use fingertrap::adapters::load_series;
//! use fingertrap::detection::detect;
//!
//! let series = load_series("candles.json")?;
//! let anomalies = detect(&series, 5.0, 3.0)?;
//! for hit in &anomalies {
//!     println!("{} shadow={:.4}", hit.timestamp(), hit.shadow_percent);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod adapters;
pub mod config;
pub mod detection;
pub mod domain;

pub use detection::{detect, DetectionError, DetectionParams, FingerTrap};
pub use domain::{AnomalyRecord, AnomalySet, Candle, CandleSeries};
