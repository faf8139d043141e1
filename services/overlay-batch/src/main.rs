//! Atmospheric overlay batch.
//!
//! Scans an input directory for NO2, AOD and on-road CO files and writes one
//! transparent PNG overlay per (product, period) into the output directory.
//! Keys whose folder already exists are skipped, so reruns are cheap.

mod config_loader;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use config_loader::{load_config, Overrides};
use netcdf_parser::{silence_hdf5_errors, NetCdfReader};
use products::BatchRunner;

#[derive(Parser, Debug)]
#[command(name = "overlay-batch")]
#[command(about = "Render NO2, AOD and CO products as transparent map overlays")]
struct Args {
    /// Directory holding the raw product files
    input_dir: Option<PathBuf>,

    /// Directory receiving one folder per output key
    output_dir: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, env = "OVERLAY_CONFIG")]
    config: Option<PathBuf>,

    /// Log level
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Stop at the first failing file instead of continuing
    #[arg(long)]
    fail_fast: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let level = match args.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    // Logs go to stderr; stdout carries the JSON summary
    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_writer(std::io::stderr);
    if args.json_logs {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }

    silence_hdf5_errors();

    let overrides = Overrides {
        input_dir: args.input_dir,
        output_dir: args.output_dir,
        fail_fast: args.fail_fast,
    };
    let config = load_config(args.config.as_deref(), &overrides)?;
    info!(
        input_dir = %config.input_dir.display(),
        output_dir = %config.output_dir.display(),
        isolate_failures = config.isolate_failures,
        "Loaded configuration"
    );

    let runner = BatchRunner::new(config, Box::new(NetCdfReader))?;
    let summary = runner.run().context("Batch aborted")?;

    println!("{}", serde_json::to_string_pretty(&summary)?);

    if !summary.is_success() {
        warn!(failed = ?summary.failed, "Some files failed");
        anyhow::bail!("{} file(s) failed", summary.failed.len());
    }
    Ok(())
}
