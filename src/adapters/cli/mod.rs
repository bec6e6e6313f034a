//! CLI Adapter
//!
//! Command-line interface for FingerTrap.
//! Uses clap derive macros for argument parsing.

mod commands;

pub use commands::{CliApp, Command, DemoCmd, DetectionArgs, ScanCmd};

/// Parse the process arguments
pub fn init() -> CliApp {
    use clap::Parser;
    CliApp::parse()
}
