//! Alert system for monitoring critical conditions.
//!
//! Evaluates a sample against static thresholds and generates alerts.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::metrics::{AlertEvent, MetricKind, Sample};
use crate::error::{MonitorError, Result};

/// Per-run thresholds and cadence
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdConfig {
    pub cpu_max: f64,          // %
    pub mem_max: f64,          // %
    pub disk_max: f64,         // %
    pub temp_max: Option<f64>, // °C, alerting disabled when None
    pub disk_path: String,
    pub interval: Duration,
}

impl ThresholdConfig {
    /// Build a validated configuration.
    ///
    /// The interval must be non-zero and every threshold must be a finite number.
    pub fn new(
        cpu_max: f64,
        mem_max: f64,
        disk_max: f64,
        temp_max: Option<f64>,
        disk_path: impl Into<String>,
        interval: Duration,
    ) -> Result<Self> {
        let config = Self {
            cpu_max,
            mem_max,
            disk_max,
            temp_max,
            disk_path: disk_path.into(),
            interval,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(MonitorError::config("interval must be greater than zero"));
        }

        let thresholds = [
            ("cpu", Some(self.cpu_max)),
            ("memory", Some(self.mem_max)),
            ("disk", Some(self.disk_max)),
            ("temperature", self.temp_max),
        ];
        for (name, value) in thresholds {
            if let Some(value) = value {
                if !value.is_finite() {
                    return Err(MonitorError::config(format!(
                        "{} threshold must be a finite number, got {}",
                        name, value
                    )));
                }
            }
        }

        if self.disk_path.is_empty() {
            return Err(MonitorError::config("disk path must not be empty"));
        }

        Ok(())
    }
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cpu_max: 85.0,
            mem_max: 85.0,
            disk_max: 90.0,
            temp_max: None,
            disk_path: "/".to_string(),
            interval: Duration::from_secs(5),
        }
    }
}

/// Evaluate a sample and generate alerts.
///
/// An alert fires only when the value is present and strictly above its
/// threshold. Alerts are always ordered CPU, memory, disk, temperature.
pub fn evaluate_alerts(sample: &Sample, config: &ThresholdConfig) -> Vec<AlertEvent> {
    let checks = [
        (MetricKind::Cpu, sample.cpu_percent, Some(config.cpu_max), None),
        (MetricKind::Memory, sample.memory_percent, Some(config.mem_max), None),
        (
            MetricKind::Disk,
            sample.disk_percent,
            Some(config.disk_max),
            Some(&sample.disk_path),
        ),
        (
            MetricKind::Temperature,
            sample.temperature_celsius,
            config.temp_max,
            None,
        ),
    ];

    checks
        .into_iter()
        .filter_map(|(kind, observed, threshold, context)| {
            let (observed, threshold) = (observed?, threshold?);
            (observed > threshold).then(|| AlertEvent {
                metric_kind: kind,
                observed_value: observed,
                threshold_value: threshold,
                context: context.cloned(),
                timestamp: sample.timestamp,
            })
        })
        .collect()
}
