//! System monitoring core functionality.
//!
//! This module provides the sampling-and-alerting loop: reading CPU, memory,
//! disk, network and temperature metrics, checking them against thresholds,
//! and handing the results to the log, the exporter and the notifier.

pub mod alerts;
mod collector;
pub mod exporter;
mod metrics;
pub mod notifier;
mod runtime;
mod sampler;

pub use alerts::{evaluate_alerts, ThresholdConfig};
pub use collector::{MetricReader, SysinfoReader};
pub use exporter::{Exporter, JsonlExporter, NullExporter};
pub use metrics::{AlertEvent, MetricKind, Sample};
pub use notifier::{DisabledNotifier, Notifier, SmtpRelayNotifier, WebhookNotifier};
pub use runtime::{MonitorLoop, MonitorState};
pub use sampler::Sampler;
