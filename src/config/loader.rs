//! Configuration Loader
//!
//! Loads and validates configuration from TOML files. Every section is optional;
//! missing values fall back to the detector defaults.

use serde::Deserialize;
use std::path::Path;
use thiserror::Error;

use crate::adapters::synthetic::{SpikeConfig, SyntheticConfig};
use crate::detection::params::{
    DetectionParams, DEFAULT_THRESHOLD_SIGMA, DEFAULT_VOLUME_FACTOR, DEFAULT_VOLUME_WINDOW,
};

/// Environment variable that overrides `[logging] level`
pub const LOG_LEVEL_ENV: &str = "FINGERTRAP_LOG";

/// Main configuration structure matching fingertrap.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub detection: DetectionSection,
    #[serde(default)]
    pub demo: DemoSection,
    #[serde(default)]
    pub logging: LoggingSection,
}

/// Detection configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DetectionSection {
    /// Standard deviations above the mean shadow percent
    pub threshold_sigma: f64,
    /// Multiplier on the rolling average volume
    pub volume_factor: f64,
    /// Trailing volume window in candles
    pub volume_window: usize,
}

impl Default for DetectionSection {
    fn default() -> Self {
        Self {
            threshold_sigma: DEFAULT_THRESHOLD_SIGMA,
            volume_factor: DEFAULT_VOLUME_FACTOR,
            volume_window: DEFAULT_VOLUME_WINDOW,
        }
    }
}

/// Synthetic demo configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DemoSection {
    pub seed: u64,
    pub size: usize,
    pub spike_index: usize,
    pub spike_high: f64,
    pub spike_volume: f64,
}

impl Default for DemoSection {
    fn default() -> Self {
        let spike = SpikeConfig::default();
        Self {
            seed: 7,
            size: SyntheticConfig::default().size,
            spike_index: spike.index,
            spike_high: spike.high,
            spike_volume: spike.volume,
        }
    }
}

impl DemoSection {
    pub fn synthetic_config(&self) -> SyntheticConfig {
        SyntheticConfig {
            size: self.size,
            ..Default::default()
        }
    }

    pub fn spike_config(&self) -> SpikeConfig {
        SpikeConfig {
            index: self.spike_index,
            high: self.spike_high,
            volume: self.spike_volume,
        }
    }
}

/// Logging configuration section
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSection {
    /// Log level: "trace", "debug", "info", "warn", "error"
    pub level: String,
}

impl Default for LoggingSection {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl LoggingSection {
    /// Get log level with environment variable override
    /// Checks FINGERTRAP_LOG env var first, falls back to config value
    pub fn get_level(&self) -> String {
        std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| self.level.clone())
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Load configuration from a TOML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    config.validate()?;
    Ok(config)
}

impl Config {
    /// Validate all configuration parameters
    pub fn validate(&self) -> Result<(), ConfigError> {
        DetectionParams::from(self)
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;

        if self.demo.size == 0 {
            return Err(ConfigError::ValidationError(
                "demo.size must be > 0".to_string(),
            ));
        }

        if self.demo.spike_index >= self.demo.size {
            return Err(ConfigError::ValidationError(format!(
                "demo.spike_index must be < demo.size ({}), got {}",
                self.demo.size, self.demo.spike_index
            )));
        }

        if !self.demo.spike_high.is_finite() || self.demo.spike_high <= 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "demo.spike_high must be > 0, got {}",
                self.demo.spike_high
            )));
        }

        if !self.demo.spike_volume.is_finite() || self.demo.spike_volume < 0.0 {
            return Err(ConfigError::ValidationError(format!(
                "demo.spike_volume must be >= 0, got {}",
                self.demo.spike_volume
            )));
        }

        Ok(())
    }
}

impl From<&Config> for DetectionParams {
    fn from(config: &Config) -> Self {
        DetectionParams {
            threshold_sigma: config.detection.threshold_sigma,
            volume_factor: config.detection.volume_factor,
            volume_window: config.detection.volume_window,
        }
    }
}
