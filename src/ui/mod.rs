// Log line formatting

pub mod formatters;

pub use formatters::{format_config, format_percent, format_summary};
