// Command handlers module
pub mod monitor;

use clap::{Arg, ArgAction, Command};
use std::path::PathBuf;

use crate::core::config::DEFAULT_LOG_FILE;
use crate::core::system_monitor::exporter::DEFAULT_EXPORT_FILE;
use crate::core::system_monitor::notifier::DEFAULT_SMTP_RELAY;

// Re-exports for cleaner imports
pub use monitor::execute as monitor;

/// Command-line definition of the `sysmon` binary
pub fn build_cli() -> Command {
    Command::new("sysmon")
        .version(env!("CARGO_PKG_VERSION"))
        .about("System resource monitor with threshold alerts")
        .arg(
            Arg::new("cpu")
                .long("cpu")
                .value_name("PERCENT")
                .help("CPU usage warning threshold")
                .value_parser(clap::value_parser!(f64))
                .default_value("85.0"),
        )
        .arg(
            Arg::new("mem")
                .long("mem")
                .value_name("PERCENT")
                .help("Memory usage warning threshold")
                .value_parser(clap::value_parser!(f64))
                .default_value("85.0"),
        )
        .arg(
            Arg::new("disk")
                .long("disk")
                .value_name("PERCENT")
                .help("Disk usage warning threshold")
                .value_parser(clap::value_parser!(f64))
                .default_value("90.0"),
        )
        .arg(
            Arg::new("path")
                .long("path")
                .value_name("PATH")
                .help("Disk path to monitor (defaults to the system root)"),
        )
        .arg(
            Arg::new("interval")
                .long("interval")
                .value_name("SECONDS")
                .help("Monitoring interval in seconds")
                .value_parser(clap::value_parser!(u64).range(1..))
                .default_value("5"),
        )
        .arg(
            Arg::new("log-json")
                .long("log-json")
                .help("Append every sample to a JSON lines file")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("json-path")
                .long("json-path")
                .value_name("FILE")
                .help(format!("Metrics export file (default: {})", DEFAULT_EXPORT_FILE))
                .value_parser(clap::value_parser!(PathBuf))
                .requires("log-json"),
        )
        .arg(
            Arg::new("temp-threshold")
                .long("temp-threshold")
                .value_name("CELSIUS")
                .help("Temperature warning threshold (enables temperature alerts)")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            Arg::new("log-file")
                .long("log-file")
                .value_name("FILE")
                .help(format!("Rotating log file (default: {})", DEFAULT_LOG_FILE))
                .value_parser(clap::value_parser!(PathBuf))
                .conflicts_with("no-log-file"),
        )
        .arg(
            Arg::new("no-log-file")
                .long("no-log-file")
                .help("Log to the console only")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("cpu-window-ms")
                .long("cpu-window-ms")
                .value_name("MS")
                .help("Window over which CPU load is measured")
                .value_parser(clap::value_parser!(u64))
                .default_value("1000"),
        )
        .arg(
            Arg::new("notify-email")
                .long("notify-email")
                .value_name("ADDRESS")
                .help("Mail alerts to this address through an SMTP relay")
                .conflicts_with("notify-webhook"),
        )
        .arg(
            Arg::new("smtp-relay")
                .long("smtp-relay")
                .value_name("HOST:PORT")
                .help(format!("SMTP relay for alert mail (default: {})", DEFAULT_SMTP_RELAY))
                .requires("notify-email"),
        )
        .arg(
            Arg::new("notify-webhook")
                .long("notify-webhook")
                .value_name("URL")
                .help("POST alerts as JSON to this URL"),
        )
}
