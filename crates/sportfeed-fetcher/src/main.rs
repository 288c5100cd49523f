//! Sportfeed collector - Entry Point
//!
//! Runs one fetch cycle over every configured endpoint and exits.

use anyhow::Result;
use clap::Parser;
use sportfeed_core::SystemClock;
use std::sync::Arc;
use tracing::{error, info};

/// Collect football API snapshots into the daily JSON document
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (can also be set via SPORTFEED_CONFIG env var)
    #[arg(short, long)]
    config: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Config is loaded first so logging can honour its settings
    let config = sportfeed_fetcher::AppConfig::load(args.config.as_deref())?;

    // Initialize logging
    sportfeed_telemetry::init_logging(&config.logging)?;

    info!("Starting sportfeed collector v{}", env!("CARGO_PKG_VERSION"));
    info!(
        base_url = %config.api.base_url,
        data_dir = %config.storage.data_dir.display(),
        retry = config.api.retry.enabled,
        "Configuration loaded"
    );

    let app = sportfeed_fetcher::Application::new(&config, Arc::new(SystemClock))?;

    match app.run_cycle().await {
        Ok(report) => {
            info!(
                successful = report.successful(),
                failed = report.failed(),
                total_records = report.total_records(),
                file = %report.file.display(),
                "All data logged"
            );
            Ok(())
        }
        Err(e) => {
            error!("Fatal error: {e}");
            Err(e.into())
        }
    }
}
