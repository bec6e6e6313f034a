//! Configuration Module
//!
//! Loads and validates configuration from TOML files.

pub mod loader;

pub use loader::{
    Config, ConfigError, DemoSection, DetectionSection, LoggingSection, load_config,
};
