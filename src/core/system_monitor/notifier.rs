//! Alert notification transports.
//!
//! Every transport bounds its own network I/O with a timeout; callers only
//! log failures and move on.

use std::time::Duration;

use lettre::message::header::ContentType;
use lettre::message::Mailbox;
use lettre::transport::smtp::{SmtpTransport, SMTP_PORT};
use lettre::{Message, Transport};
use serde::Serialize;

use super::metrics::AlertEvent;
use crate::error::{MonitorError, Result};

pub const DEFAULT_SMTP_RELAY: &str = "localhost:25";
pub const DEFAULT_NOTIFY_TIMEOUT: Duration = Duration::from_secs(10);

/// Sink that delivers alerts to an external channel
pub trait Notifier: Send + Sync {
    fn send(&self, alert: &AlertEvent) -> Result<()>;

    /// False for the disabled notifier, so callers can skip dispatch entirely
    fn is_enabled(&self) -> bool {
        true
    }
}

/// Notifier used when notifications are turned off. Never touches the network.
#[derive(Debug, Default)]
pub struct DisabledNotifier;

impl Notifier for DisabledNotifier {
    fn send(&self, _alert: &AlertEvent) -> Result<()> {
        Ok(())
    }

    fn is_enabled(&self) -> bool {
        false
    }
}

/// Sends alerts as plain-text mail through an SMTP relay (usually a local MTA).
///
/// The alert address is both sender and recipient. No TLS or authentication.
#[derive(Debug, Clone)]
pub struct SmtpRelayNotifier {
    relay: String,
    host: String,
    port: u16,
    mailbox: Mailbox,
    timeout: Duration,
}

impl SmtpRelayNotifier {
    /// `relay` is `host` or `host:port`; the port defaults to 25
    pub fn new(relay: impl Into<String>, address: &str) -> Result<Self> {
        let relay = relay.into();
        let (host, port) = split_relay(&relay)?;
        let mailbox = address.parse::<Mailbox>().map_err(|e| {
            MonitorError::config(format!("invalid notification address '{}': {}", address, e))
        })?;

        Ok(Self {
            relay,
            host,
            port,
            mailbox,
            timeout: DEFAULT_NOTIFY_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Notifier for SmtpRelayNotifier {
    fn send(&self, alert: &AlertEvent) -> Result<()> {
        let email = Message::builder()
            .from(self.mailbox.clone())
            .to(self.mailbox.clone())
            .subject(alert.subject())
            .header(ContentType::TEXT_PLAIN)
            .body(alert.message())
            .map_err(|e| MonitorError::notification(format!("failed to build mail: {}", e)))?;

        let transport = SmtpTransport::builder_dangerous(self.host.as_str())
            .port(self.port)
            .timeout(Some(self.timeout))
            .build();

        transport.send(&email).map_err(|e| {
            MonitorError::notification(format!("relay '{}' did not accept the alert: {}", self.relay, e))
        })?;
        Ok(())
    }
}

fn split_relay(relay: &str) -> Result<(String, u16)> {
    match relay.rsplit_once(':') {
        Some((host, port)) if !host.is_empty() => {
            let port = port
                .parse()
                .map_err(|_| MonitorError::config(format!("invalid port in SMTP relay '{}'", relay)))?;
            Ok((host.trim_matches(|c| c == '[' || c == ']').to_string(), port))
        }
        _ if relay.is_empty() => Err(MonitorError::config("SMTP relay must not be empty")),
        _ => Ok((relay.to_string(), SMTP_PORT)),
    }
}

#[derive(Serialize)]
struct WebhookPayload<'a> {
    subject: &'a str,
    body: String,
    alert: &'a AlertEvent,
}

/// Posts alerts as JSON to an HTTP endpoint
pub struct WebhookNotifier {
    url: String,
    client: reqwest::blocking::Client,
}

impl WebhookNotifier {
    /// Must be called outside of an async context (the blocking client owns a runtime)
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(timeout)
            .connect_timeout(timeout)
            .build()
            .map_err(|e| MonitorError::notification(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

impl Notifier for WebhookNotifier {
    fn send(&self, alert: &AlertEvent) -> Result<()> {
        let payload = WebhookPayload {
            subject: alert.subject(),
            body: alert.message(),
            alert,
        };

        self.client
            .post(&self.url)
            .json(&payload)
            .send()
            .and_then(|resp| resp.error_for_status())
            .map_err(|e| MonitorError::notification(format!("webhook '{}' failed: {}", self.url, e)))?;
        Ok(())
    }
}
