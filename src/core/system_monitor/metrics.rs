use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One snapshot of every monitored metric.
///
/// A field is `None` when its reading could not be taken. Field order is the
/// order of the exported JSON record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sample {
    pub timestamp: DateTime<Utc>,
    pub cpu_percent: Option<f64>,
    pub memory_percent: Option<f64>,
    pub disk_percent: Option<f64>,
    pub disk_path: String,
    pub network_bytes_sent: Option<u64>, // cumulative, not a delta
    pub network_bytes_recv: Option<u64>, // cumulative, not a delta
    pub temperature_celsius: Option<f64>,
}

impl Sample {
    /// A sample with every metric absent
    pub fn empty(disk_path: impl Into<String>) -> Self {
        Self {
            timestamp: Utc::now(),
            cpu_percent: None,
            memory_percent: None,
            disk_percent: None,
            disk_path: disk_path.into(),
            network_bytes_sent: None,
            network_bytes_recv: None,
            temperature_celsius: None,
        }
    }

    /// Both network counters, or `None` if either is missing
    pub fn network_io(&self) -> Option<(u64, u64)> {
        Some((self.network_bytes_recv?, self.network_bytes_sent?))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MetricKind {
    Cpu,
    Memory,
    Disk,
    Temperature,
}

impl MetricKind {
    /// Subject line used when notifying about this metric
    pub fn alert_subject(&self) -> &'static str {
        match self {
            MetricKind::Cpu => "CPU Alert",
            MetricKind::Memory => "Memory Alert",
            MetricKind::Disk => "Disk Alert",
            MetricKind::Temperature => "Temperature Alert",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MetricKind::Cpu => "CPU",
            MetricKind::Memory => "MEMORY",
            MetricKind::Disk => "DISK",
            MetricKind::Temperature => "TEMPERATURE",
        };
        f.write_str(name)
    }
}

/// A single threshold violation detected in one cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertEvent {
    pub metric_kind: MetricKind,
    pub observed_value: f64,
    pub threshold_value: f64,
    pub context: Option<String>, // disk path for DISK alerts
    pub timestamp: DateTime<Utc>,
}

impl AlertEvent {
    pub fn subject(&self) -> &'static str {
        self.metric_kind.alert_subject()
    }

    /// Human-readable description, used for the warning log line and notification body
    pub fn message(&self) -> String {
        match self.metric_kind {
            MetricKind::Cpu => format!(
                "High CPU Usage: {:.1}% (Threshold: {:?}%)",
                self.observed_value, self.threshold_value
            ),
            MetricKind::Memory => format!(
                "High Memory Usage: {:.1}% (Threshold: {:?}%)",
                self.observed_value, self.threshold_value
            ),
            MetricKind::Disk => format!(
                "High Disk Usage ({}): {:.1}% (Threshold: {:?}%)",
                self.context.as_deref().unwrap_or("?"),
                self.observed_value,
                self.threshold_value
            ),
            MetricKind::Temperature => format!(
                "High Temperature: {:.1}°C (Threshold: {:?}°C)",
                self.observed_value, self.threshold_value
            ),
        }
    }
}
