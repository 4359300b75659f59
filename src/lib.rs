// sysmon library - public API

// Re-export error types
pub mod error;
pub use error::{MonitorError, Result};

// Module declarations
pub mod commands;
pub mod core;
pub mod platform;
pub mod ui;

use std::io::Write;
use std::path::Path;

use crate::core::log_file::{RotatingFile, TeeWriter, DEFAULT_BACKUPS, DEFAULT_MAX_BYTES};

// Re-export commonly used types
pub use crate::core::config::MonitorConfig;

/// Initialize logging to the console and, optionally, a rotating log file.
///
/// `RUST_LOG` overrides the default `info` level.
pub fn init_logging(log_file: Option<&Path>) -> Result<()> {
    let file = log_file
        .map(|path| RotatingFile::open(path, DEFAULT_MAX_BYTES, DEFAULT_BACKUPS))
        .transpose()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                record.level(),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(TeeWriter::new(file))))
        .try_init()
        .map_err(|e| MonitorError::config(format!("logger already initialized: {}", e)))
}
