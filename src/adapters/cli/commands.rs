//! CLI Command Definitions
//!
//! Argument parsing for the FingerTrap binary.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::adapters::report::ReportFormat;

/// FingerTrap - Fat-finger anomaly detection for OHLCV data
#[derive(Parser, Debug)]
#[command(
    name = "fingertrap",
    version = env!("CARGO_PKG_VERSION"),
    author = env!("CARGO_PKG_AUTHORS"),
    about = "Fat-finger anomaly detection for OHLCV market data",
    long_about = "FingerTrap flags candles whose high-low spread sits far above the series \
                  norm while trading at a multiple of the rolling average volume."
)]
pub struct CliApp {
    /// The command to execute
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Generate a synthetic series with one planted spike and scan it
    Demo(DemoCmd),

    /// Scan a JSON series file
    Scan(ScanCmd),
}

/// Detection overrides shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct DetectionArgs {
    /// Path to configuration file
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Override standard deviations above the mean shadow
    #[arg(long, value_name = "SIGMA")]
    pub threshold_sigma: Option<f64>,

    /// Override rolling average volume multiplier
    #[arg(long, value_name = "FACTOR")]
    pub volume_factor: Option<f64>,

    /// Output format (text, json)
    #[arg(short, long, value_name = "FORMAT", default_value = "text")]
    pub format: ReportFormat,
}

/// Run the synthetic demonstration
#[derive(Parser, Debug)]
pub struct DemoCmd {
    #[command(flatten)]
    pub detection: DetectionArgs,

    /// RNG seed for the synthetic series
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Number of candles to generate
    #[arg(long, value_name = "N")]
    pub size: Option<usize>,

    /// Index of the planted fat-finger candle
    #[arg(long, value_name = "INDEX")]
    pub spike_index: Option<usize>,
}

/// Scan a series file
#[derive(Parser, Debug)]
pub struct ScanCmd {
    /// JSON file holding an array of candles
    #[arg(value_name = "FILE")]
    pub input: PathBuf,

    #[command(flatten)]
    pub detection: DetectionArgs,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_demo_defaults() {
        let app = CliApp::parse_from(["fingertrap", "demo"]);
        match app.command {
            Command::Demo(cmd) => {
                assert!(cmd.seed.is_none());
                assert!(cmd.detection.config.is_none());
                assert_eq!(cmd.detection.format, ReportFormat::Text);
            }
            other => panic!("unexpected command: {:?}", other),
        }
        assert!(!app.verbose);
    }

    #[test]
    fn test_parse_scan_overrides() {
        let app = CliApp::parse_from([
            "fingertrap",
            "--debug",
            "scan",
            "data.json",
            "--threshold-sigma",
            "4",
            "--volume-factor",
            "2.5",
            "--format",
            "json",
        ]);
        assert!(app.debug);
        match app.command {
            Command::Scan(cmd) => {
                assert_eq!(cmd.input, PathBuf::from("data.json"));
                assert_eq!(cmd.detection.threshold_sigma, Some(4.0));
                assert_eq!(cmd.detection.volume_factor, Some(2.5));
                assert_eq!(cmd.detection.format, ReportFormat::Json);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_unknown_format() {
        let result = CliApp::try_parse_from(["fingertrap", "demo", "--format", "xml"]);
        assert!(result.is_err());
    }
}
