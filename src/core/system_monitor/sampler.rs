//! One sampling round across every metric kind.

use std::sync::Arc;

use chrono::Utc;
use tokio::task::JoinError;

use super::alerts::ThresholdConfig;
use super::collector::MetricReader;
use super::metrics::Sample;
use crate::error::{MonitorError, Result};

/// Runs every reader of one cycle concurrently and assembles a [`Sample`].
///
/// Reads happen on the blocking pool so the CPU sampling window does not add
/// to the latency of the other metrics.
#[derive(Clone)]
pub struct Sampler {
    reader: Arc<dyn MetricReader>,
}

impl Sampler {
    pub fn new(reader: Arc<dyn MetricReader>) -> Self {
        Self { reader }
    }

    /// Take one sample. Never fails: a metric whose read fails is left absent.
    pub async fn sample(&self, config: &ThresholdConfig) -> Sample {
        let timestamp = Utc::now();
        let disk_path = config.disk_path.clone();

        let cpu = self.read("CPU usage", |r| r.read_cpu_percent());
        let memory = self.read("Memory usage", |r| r.read_memory_percent());
        let disk = {
            let path = disk_path.clone();
            self.read("Disk usage", move |r| r.read_disk_percent(&path))
        };
        let network = self.read("Network I/O", |r| r.read_network_io_counters());
        let temperature = self.read("temperature", |r| r.read_temperature());

        let (cpu, memory, disk, network, temperature) =
            tokio::join!(cpu, memory, disk, network, temperature);

        let (network_bytes_recv, network_bytes_sent) = match network {
            Some((recv, sent)) => (Some(recv), Some(sent)),
            None => (None, None),
        };

        Sample {
            timestamp,
            cpu_percent: cpu.and_then(|v| checked_percent("CPU", v)),
            memory_percent: memory.and_then(|v| checked_percent("Memory", v)),
            disk_percent: disk.and_then(|v| checked_percent("Disk", v)),
            disk_path,
            network_bytes_sent,
            network_bytes_recv,
            temperature_celsius: temperature.filter(|t| t.is_finite()),
        }
    }

    async fn read<T, F>(&self, what: &'static str, f: F) -> Option<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn MetricReader) -> Result<T> + Send + 'static,
    {
        let reader = Arc::clone(&self.reader);
        let outcome = tokio::task::spawn_blocking(move || f(&*reader))
            .await
            .map_err(join_failure)
            .and_then(|res| res);

        match outcome {
            Ok(value) => Some(value),
            Err(e) if e.is_unavailable() => {
                log::debug!("{} not available: {}", what, e);
                None
            }
            Err(e) => {
                log::error!("Could not retrieve {}: {}", what, e);
                None
            }
        }
    }
}

fn join_failure(e: JoinError) -> MonitorError {
    if e.is_panic() {
        MonitorError::metric_read("reader panicked")
    } else {
        MonitorError::metric_read("read was cancelled")
    }
}

/// Discard readings outside `[0, 100]` instead of letting a bogus value reach evaluation
fn checked_percent(what: &str, value: f64) -> Option<f64> {
    if value.is_finite() && (0.0..=100.0).contains(&value) {
        Some(value)
    } else {
        log::error!("{} reading out of range: {}", what, value);
        None
    }
}
