// Core business logic module

pub mod config;
pub mod log_file;
pub mod system_monitor;

// Re-export commonly used items
pub use config::{MonitorConfig, NotifyTarget};
pub use system_monitor::{MonitorLoop, MonitorState, Sample, ThresholdConfig};
