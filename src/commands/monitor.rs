//! Monitor command handler.
//!
//! Loads the configuration, wires the sinks and runs the monitor loop until
//! Ctrl+C or a fatal error.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::ArgMatches;
use tokio::sync::watch;

use crate::core::config::MonitorConfig;
use crate::core::system_monitor::{MonitorLoop, SysinfoReader};

/// Execute the monitor command
pub fn execute(matches: &ArgMatches) -> Result<()> {
    let config = MonitorConfig::from_matches(matches).context("Invalid configuration")?;

    crate::init_logging(config.log_file.as_deref()).context("Failed to initialize logging")?;

    if config.disk_path_rewritten {
        log::info!(
            "Windows platform detected. Adjusted disk path to {}",
            config.thresholds.disk_path
        );
    }

    run(config)
}

/// Run the monitor with an already validated configuration
pub fn run(config: MonitorConfig) -> Result<()> {
    // Built before the runtime starts: the webhook client owns its own runtime
    let notifier = config
        .build_notifier()
        .context("Failed to set up notifications")?;
    let reader = Arc::new(SysinfoReader::with_cpu_window(config.cpu_window));

    let mut monitor = MonitorLoop::new(config.thresholds.clone(), reader)
        .with_exporter(config.build_exporter())
        .with_notifier(notifier);

    if let Some(path) = &config.export_path {
        log::info!("Exporting metrics to {}", path.display());
    }

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    ctrlc::set_handler(move || {
        // Only fails once the loop has already exited
        let _ = shutdown_tx.send(true);
    })
    .map_err(|e| anyhow::anyhow!("Failed to set Ctrl+C handler: {}", e))?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_time()
        .thread_name("sysmon-worker")
        .build()
        .context("Failed to start async runtime")?;

    let outcome = runtime.block_on(monitor.run(shutdown_rx));

    drop(monitor);
    runtime.shutdown_timeout(Duration::from_secs(2));

    outcome.context("Monitoring stopped after a critical error")
}
