//! Upmon binary: HTTP endpoint availability monitor.

use clap::Parser;
use common::Error;
use probe::{HttpChecker, MonitorLoop};
use std::path::PathBuf;
use std::sync::Arc;

/// Monitor HTTP endpoint availability from a YAML configuration file.
#[derive(Parser, Debug)]
#[command(name = "upmon", version, about)]
struct Args {
    /// Path to the YAML endpoint configuration file
    config_file: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    common::logging::init();

    let args = Args::parse();

    let endpoints = upmon::load_endpoints(&args.config_file).map_err(Error::config)?;
    tracing::info!(
        config = %args.config_file.display(),
        endpoints = endpoints.len(),
        "Configuration loaded"
    );

    let checker = Arc::new(HttpChecker::new()?);
    let mut monitor = MonitorLoop::new(endpoints, checker);

    let shutdown = monitor.shutdown_handle();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, stopping after the current cycle");
            shutdown.stop();
        }
    });

    monitor.run().await;
    tracing::info!("Monitoring stopped");

    Ok(())
}
