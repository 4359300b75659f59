//! The sampling-and-alerting loop.
//!
//! Drives one cycle at a time: sample, evaluate, report, then sleep until the
//! next cycle or until shutdown is requested.

use std::any::Any;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures_util::FutureExt;
use tokio::sync::watch;

use super::alerts::{evaluate_alerts, ThresholdConfig};
use super::collector::MetricReader;
use super::exporter::{Exporter, NullExporter};
use super::metrics::AlertEvent;
use super::notifier::{DisabledNotifier, Notifier};
use super::sampler::Sampler;
use crate::error::{MonitorError, Result};
use crate::ui::{format_config, format_summary};

/// Lifecycle of a [`MonitorLoop`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Starting,
    Running,
    Stopping,
    Stopped,
}

impl fmt::Display for MonitorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MonitorState::Starting => "STARTING",
            MonitorState::Running => "RUNNING",
            MonitorState::Stopping => "STOPPING",
            MonitorState::Stopped => "STOPPED",
        };
        f.write_str(name)
    }
}

/// Periodic monitor tying the sampler, evaluator and sinks together
pub struct MonitorLoop {
    config: ThresholdConfig,
    sampler: Sampler,
    exporter: Box<dyn Exporter>,
    notifier: Arc<dyn Notifier>,
    state: MonitorState,
    cycles: u64,
}

impl MonitorLoop {
    /// Create a loop with export and notification disabled
    pub fn new(config: ThresholdConfig, reader: Arc<dyn MetricReader>) -> Self {
        Self {
            config,
            sampler: Sampler::new(reader),
            exporter: Box::new(NullExporter),
            notifier: Arc::new(DisabledNotifier),
            state: MonitorState::Starting,
            cycles: 0,
        }
    }

    pub fn with_exporter(mut self, exporter: Box<dyn Exporter>) -> Self {
        self.exporter = exporter;
        self
    }

    pub fn with_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.notifier = notifier;
        self
    }

    pub fn state(&self) -> MonitorState {
        self.state
    }

    /// Number of completed cycles
    pub fn cycles(&self) -> u64 {
        self.cycles
    }

    /// Run until `shutdown` turns true (or its sender is dropped).
    ///
    /// Returns `Ok` on a requested shutdown and `MonitorError::Fatal` when a
    /// cycle panicked.
    pub async fn run(&mut self, mut shutdown: watch::Receiver<bool>) -> Result<()> {
        self.transition(MonitorState::Starting);
        log::info!("System monitor started");
        log::info!("{}", format_config(&self.config));
        log::info!("{}", "-".repeat(50));
        self.transition(MonitorState::Running);

        loop {
            if *shutdown.borrow_and_update() {
                break;
            }

            if let Err(panic) = AssertUnwindSafe(self.run_cycle()).catch_unwind().await {
                let reason = panic_message(panic.as_ref());
                log::error!("CRITICAL: Critical error during monitoring: {}", reason);
                self.transition(MonitorState::Stopped);
                return Err(MonitorError::fatal(reason));
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.interval) => {}
                changed = shutdown.changed() => {
                    // A dropped sender can never signal again, treat it as a stop request
                    if changed.is_err() || *shutdown.borrow() {
                        break;
                    }
                }
            }
        }

        self.transition(MonitorState::Stopping);
        log::info!("Monitoring interrupted by user.");
        self.transition(MonitorState::Stopped);
        log::info!("System monitor stopped after {} cycles", self.cycles);
        Ok(())
    }

    /// Execute one full cycle. Sink failures are logged here and never escape.
    pub async fn run_cycle(&mut self) {
        let sample = self.sampler.sample(&self.config).await;
        let alerts = evaluate_alerts(&sample, &self.config);

        log::info!("{}", format_summary(&sample));

        if let Err(e) = self.exporter.append(&sample) {
            log::error!("Failed to export metrics to JSON: {}", e);
        }

        for alert in alerts {
            log::warn!("{}", alert.message());
            dispatch(Arc::clone(&self.notifier), alert).await;
        }

        self.cycles += 1;
    }

    fn transition(&mut self, next: MonitorState) {
        log::debug!("Monitor state {} -> {}", self.state, next);
        self.state = next;
    }
}

/// Deliver one alert on the blocking pool; failures are logged, never retried
async fn dispatch(notifier: Arc<dyn Notifier>, alert: AlertEvent) {
    if !notifier.is_enabled() {
        return;
    }

    let subject = alert.subject();
    match tokio::task::spawn_blocking(move || notifier.send(&alert)).await {
        Ok(Ok(())) => log::debug!("Notification sent: {}", subject),
        Ok(Err(e)) => log::error!("Failed to send {} notification: {}", subject, e),
        Err(e) => log::error!("Notification task for {} failed: {}", subject, e),
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
