//! Series File Loader
//!
//! Reads a `CandleSeries` from a JSON array of candles:
//!
//! ```json
//! [{"timestamp": "2024-01-01T00:00:00Z", "open": 150.0, "high": 150.1,
//!   "low": 149.9, "close": 150.0, "volume": 1000.0}]
//! ```

use std::path::Path;

use thiserror::Error;

use crate::domain::CandleSeries;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Failed to read series file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse series JSON: {0}")]
    ParseError(#[from] serde_json::Error),
}

/// Load a series from a JSON file
pub fn load_series<P: AsRef<Path>>(path: P) -> Result<CandleSeries, LoadError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let series: CandleSeries = serde_json::from_str(&content)?;

    if !series.is_chronological() {
        tracing::warn!(
            path = %path.as_ref().display(),
            "Series timestamps are not strictly increasing"
        );
    }
    Ok(series)
}
