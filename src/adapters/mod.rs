//! Adapters Layer - Edges of the detector
//!
//! - Synthetic: seeded demo series with a planted spike
//! - Loader: JSON series files
//! - Report: text / JSON rendering of detection results
//! - CLI: command-line interface definitions

pub mod cli;
pub mod loader;
pub mod report;
pub mod synthetic;

pub use cli::CliApp;
pub use loader::{load_series, LoadError};
pub use report::{render, render_json, render_text, ReportError, ReportFormat};
pub use synthetic::{
    generate_series, generate_with_spike, inject_spike, SpikeConfig, SyntheticConfig,
    SyntheticError,
};
