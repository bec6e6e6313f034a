//! Detection Report Rendering
//!
//! Formats an `AnomalySet` for the terminal, as a text table or JSON.

use std::fmt::Write as _;
use std::str::FromStr;

use thiserror::Error;

use crate::domain::AnomalySet;

pub const REPORT_HEADER: &str = "--- FingerTrap Detection Report ---";
pub const ALERT_LINE: &str = "ALERT: Potential Fat-Finger detected at:";
pub const NO_ANOMALIES_LINE: &str = "No significant anomalies detected.";

/// Output format for the report
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportFormat {
    #[default]
    Text,
    Json,
}

impl FromStr for ReportFormat {
    type Err = ReportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(ReportError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Unknown report format: {0} (expected text or json)")]
    UnknownFormat(String),
    #[error("Failed to serialize report: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Render in the requested format
pub fn render(set: &AnomalySet, format: ReportFormat) -> Result<String, ReportError> {
    match format {
        ReportFormat::Text => Ok(render_text(set)),
        ReportFormat::Json => render_json(set),
    }
}

/// Plain-text alert table, or the no-anomalies line
pub fn render_text(set: &AnomalySet) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", REPORT_HEADER);

    if set.is_empty() {
        let _ = writeln!(out, "{}", NO_ANOMALIES_LINE);
        return out;
    }

    let _ = writeln!(out, "{}", ALERT_LINE);
    let _ = writeln!(
        out,
        "{:<25} {:>12} {:>12} {:>12} {:>15} {:>9}",
        "timestamp", "High", "Low", "Volume", "shadow_percent", "vol/avg"
    );
    for record in set.iter() {
        let candle = &record.candle;
        let _ = writeln!(
            out,
            "{:<25} {:>12.4} {:>12.4} {:>12.2} {:>15.6} {:>9.2}",
            candle.timestamp.format("%Y-%m-%d %H:%M:%S"),
            candle.high,
            candle.low,
            candle.volume,
            record.shadow_percent,
            record.volume_ratio()
        );
    }
    out
}

/// Full set (records plus series statistics) as pretty JSON
pub fn render_json(set: &AnomalySet) -> Result<String, ReportError> {
    Ok(serde_json::to_string_pretty(set)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::FingerTrap;
    use crate::domain::{Candle, CandleSeries};
    use chrono::{Duration, TimeZone, Utc};

    fn series_with_spike(spike: bool) -> CandleSeries {
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        (0..40)
            .map(|i| {
                let mid = 100.0 + (i % 4) as f64 * 0.02;
                let (high, volume) = if spike && i == 30 {
                    (130.0, 10_000.0)
                } else {
                    (mid + 0.1, 1000.0)
                };
                Candle::new(start + Duration::minutes(5 * i), mid, high, mid - 0.1, mid, volume)
            })
            .collect()
    }

    #[test]
    fn test_render_text_alert() {
        let set = FingerTrap::default().detect(&series_with_spike(true)).unwrap();
        let text = render_text(&set);

        assert!(text.starts_with(REPORT_HEADER));
        assert!(text.contains(ALERT_LINE));
        assert!(text.contains("2024-01-01 02:30:00"));
        assert!(text.contains("130.0000"));
        // 10000 against a window of nineteen 1000s plus itself: 10000 / 1450
        assert!(text.contains("vol/avg"));
        assert!(text.contains(" 6.90"));
        assert!(!text.contains(NO_ANOMALIES_LINE));
    }

    #[test]
    fn test_render_text_no_anomalies() {
        let set = FingerTrap::default().detect(&series_with_spike(false)).unwrap();
        let text = render_text(&set);

        assert!(text.contains(NO_ANOMALIES_LINE));
        assert!(!text.contains(ALERT_LINE));
    }

    #[test]
    fn test_render_json() {
        let set = FingerTrap::default().detect(&series_with_spike(true)).unwrap();
        let json = render(&set, ReportFormat::Json).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["records"][0]["index"], 30);
        assert_eq!(value["records"][0]["candle"]["high"], 130.0);
        assert_eq!(value["stats"]["series_len"], 40);
    }

    #[test]
    fn test_format_parsing() {
        assert_eq!("text".parse::<ReportFormat>().unwrap(), ReportFormat::Text);
        assert_eq!("JSON".parse::<ReportFormat>().unwrap(), ReportFormat::Json);
        assert!(matches!(
            "csv".parse::<ReportFormat>(),
            Err(ReportError::UnknownFormat(_))
        ));
    }
}
