//! Field report over the latest daily document.
//!
//! Logs every field path seen per endpoint and prints a short summary.

use anyhow::Result;
use clap::Parser;
use sportfeed_fields::FieldReport;
use sportfeed_persistence::find_latest;
use std::path::PathBuf;
use tracing::{error, info};

/// List the JSON fields captured in the latest daily document
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via SPORTFEED_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,

    /// Analyze this document instead of the latest daily file
    #[arg(short, long)]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let config = sportfeed_fetcher::AppConfig::load(args.config.as_deref())?;
    sportfeed_telemetry::init_logging(&config.logging)?;

    let path = match args.file {
        Some(path) => path,
        None => find_latest(&config.storage.data_dir, &config.storage.file_prefix)?,
    };
    info!(file = %path.display(), "Analyzing daily document");

    let report = match FieldReport::load(&path) {
        Ok(report) => report,
        Err(e) => {
            error!("Error during analysis: {e}");
            return Err(e.into());
        }
    };

    for line in report.detailed_lines() {
        info!("{line}");
    }
    info!(
        endpoints = report.endpoint_count(),
        fields = report.all_fields().len(),
        entries = report.entries_processed(),
        "Field analysis completed"
    );

    println!("Analysis of {}", path.display());
    print!("{}", report.console_summary());
    Ok(())
}
