use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::ArgMatches;

use crate::core::system_monitor::exporter::DEFAULT_EXPORT_FILE;
use crate::core::system_monitor::notifier::{DEFAULT_NOTIFY_TIMEOUT, DEFAULT_SMTP_RELAY};
use crate::core::system_monitor::{
    DisabledNotifier, Exporter, JsonlExporter, Notifier, NullExporter, SmtpRelayNotifier,
    ThresholdConfig, WebhookNotifier,
};
use crate::error::{MonitorError, Result};
use crate::platform::{resolve_disk_path, Platform};

pub const DEFAULT_LOG_FILE: &str = "system_monitor.log";

/// Where alert notifications go
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyTarget {
    Disabled,
    Email { relay: String, address: String },
    Webhook { url: String },
}

/// Effective configuration of one monitor run
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    pub thresholds: ThresholdConfig,
    /// Export file, `None` when export is off
    pub export_path: Option<PathBuf>,
    pub notify: NotifyTarget,
    /// Log file, `None` for console only
    pub log_file: Option<PathBuf>,
    pub cpu_window: Duration,
    /// True when a POSIX root was mapped to the Windows system drive
    pub disk_path_rewritten: bool,
}

impl MonitorConfig {
    /// Build the configuration from parsed command-line arguments
    pub fn from_matches(matches: &ArgMatches) -> Result<Self> {
        Self::from_matches_for(matches, Platform::current())
    }

    pub fn from_matches_for(matches: &ArgMatches, platform: Platform) -> Result<Self> {
        let float = |name: &str| {
            matches
                .get_one::<f64>(name)
                .copied()
                .ok_or_else(|| MonitorError::config(format!("missing value for --{}", name)))
        };

        let requested_path = matches.get_one::<String>("path").map(String::as_str);
        let (disk_path, disk_path_rewritten) = resolve_disk_path(requested_path, platform);

        let interval = matches.get_one::<u64>("interval").copied().unwrap_or(5);

        let thresholds = ThresholdConfig::new(
            float("cpu")?,
            float("mem")?,
            float("disk")?,
            matches.get_one::<f64>("temp-threshold").copied(),
            disk_path,
            Duration::from_secs(interval),
        )?;

        let export_path = matches.get_flag("log-json").then(|| {
            matches
                .get_one::<PathBuf>("json-path")
                .cloned()
                .unwrap_or_else(|| PathBuf::from(DEFAULT_EXPORT_FILE))
        });

        let notify = if let Some(address) = matches.get_one::<String>("notify-email") {
            NotifyTarget::Email {
                relay: matches
                    .get_one::<String>("smtp-relay")
                    .cloned()
                    .unwrap_or_else(|| DEFAULT_SMTP_RELAY.to_string()),
                address: address.clone(),
            }
        } else if let Some(url) = matches.get_one::<String>("notify-webhook") {
            NotifyTarget::Webhook { url: url.clone() }
        } else {
            NotifyTarget::Disabled
        };

        let log_file = if matches.get_flag("no-log-file") {
            None
        } else {
            Some(
                matches
                    .get_one::<PathBuf>("log-file")
                    .cloned()
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE)),
            )
        };

        let cpu_window = Duration::from_millis(
            matches
                .get_one::<u64>("cpu-window-ms")
                .copied()
                .unwrap_or(1000),
        );

        Ok(Self {
            thresholds,
            export_path,
            notify,
            log_file,
            cpu_window,
            disk_path_rewritten,
        })
    }

    pub fn build_exporter(&self) -> Box<dyn Exporter> {
        match &self.export_path {
            Some(path) => Box::new(JsonlExporter::new(path.clone())),
            None => Box::new(NullExporter),
        }
    }

    /// Build the notifier. Must run outside of an async context.
    pub fn build_notifier(&self) -> Result<Arc<dyn Notifier>> {
        Ok(match &self.notify {
            NotifyTarget::Disabled => Arc::new(DisabledNotifier),
            NotifyTarget::Email { relay, address } => {
                Arc::new(SmtpRelayNotifier::new(relay.clone(), address)?)
            }
            NotifyTarget::Webhook { url } => {
                Arc::new(WebhookNotifier::new(url.clone(), DEFAULT_NOTIFY_TIMEOUT)?)
            }
        })
    }
}
