//! FingerTrap - Fat-Finger Anomaly Detection
//!
//! Scans OHLCV series for candles with an outlier high-low spread on heavy volume.

use anyhow::{Context, Result};
use std::path::Path;
use tracing_subscriber::{fmt, EnvFilter};

use fingertrap::adapters::cli::{self, Command, DemoCmd, DetectionArgs, ScanCmd};
use fingertrap::adapters::{generate_with_spike, load_series, render};
use fingertrap::config::{load_config, Config};
use fingertrap::{CandleSeries, DetectionParams, FingerTrap};

fn main() -> Result<()> {
    // Load .env file if it exists (FINGERTRAP_LOG may live there)
    dotenvy::dotenv().ok();

    let app = cli::init();
    let config = load_config_or_default(detection_args(&app.command).config.as_deref())?;
    init_logging(app.verbose, app.debug, &config.logging.get_level())?;

    match app.command {
        Command::Demo(cmd) => demo_command(cmd, &config),
        Command::Scan(cmd) => scan_command(cmd, &config),
    }
}

fn init_logging(verbose: bool, debug: bool, configured_level: &str) -> Result<()> {
    let filter = if debug {
        EnvFilter::new("debug")
    } else if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_new(configured_level)
            .with_context(|| format!("Invalid log level '{}'", configured_level))?
    };

    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();
    Ok(())
}

fn detection_args(command: &Command) -> &DetectionArgs {
    match command {
        Command::Demo(cmd) => &cmd.detection,
        Command::Scan(cmd) => &cmd.detection,
    }
}

fn load_config_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load_config(path)
            .with_context(|| format!("Failed to load configuration from {}", path.display())),
        None => Ok(Config::default()),
    }
}

/// Config file values with command-line overrides applied
fn resolve_params(args: &DetectionArgs, config: &Config) -> Result<DetectionParams> {
    let mut params = DetectionParams::from(config);
    if let Some(sigma) = args.threshold_sigma {
        params = params.with_threshold_sigma(sigma);
    }
    if let Some(factor) = args.volume_factor {
        params = params.with_volume_factor(factor);
    }
    params.validate().context("Invalid detection parameters")?;
    Ok(params)
}

fn demo_command(cmd: DemoCmd, config: &Config) -> Result<()> {
    let params = resolve_params(&cmd.detection, config)?;

    let mut synthetic = config.demo.synthetic_config();
    if let Some(size) = cmd.size {
        synthetic.size = size;
    }
    let mut spike = config.demo.spike_config();
    if let Some(index) = cmd.spike_index {
        spike.index = index;
    }
    let seed = cmd.seed.unwrap_or(config.demo.seed);

    tracing::info!(seed, size = synthetic.size, spike_index = spike.index, "Running demo");

    let series = generate_with_spike(&synthetic, &spike, seed)
        .context("Failed to generate synthetic series")?;
    scan_and_print(&series, params, &cmd.detection)
}

fn scan_command(cmd: ScanCmd, config: &Config) -> Result<()> {
    let params = resolve_params(&cmd.detection, config)?;

    let series = load_series(&cmd.input)
        .with_context(|| format!("Failed to load series from {}", cmd.input.display()))?;
    tracing::info!(path = %cmd.input.display(), candles = series.len(), "Loaded series");

    scan_and_print(&series, params, &cmd.detection)
}

fn scan_and_print(
    series: &CandleSeries,
    params: DetectionParams,
    args: &DetectionArgs,
) -> Result<()> {
    let anomalies = FingerTrap::new(params)
        .detect(series)
        .context("Anomaly scan aborted: invalid input series")?;

    let stats = anomalies.stats();
    tracing::info!(
        mean_shadow = stats.mean_shadow,
        std_shadow = stats.std_shadow,
        limit = stats.limit,
        anomalies = anomalies.len(),
        "Scan complete"
    );

    let report = render(&anomalies, args.format)?;
    println!("{}", report.trim_end());
    Ok(())
}
