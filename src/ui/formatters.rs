use crate::core::system_monitor::{Sample, ThresholdConfig};

/// Placeholder shown for a metric that could not be read
pub const MISSING: &str = "Error";

/// Format a percentage with one decimal, or the placeholder when absent
pub fn format_percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.1}%", v),
        None => MISSING.to_string(),
    }
}

/// Format network counters ("Net In: 10 B | Net Out: 20 B")
pub fn format_network(io: Option<(u64, u64)>) -> String {
    match io {
        Some((recv, sent)) => format!("Net In: {} B | Net Out: {} B", recv, sent),
        None => format!("Network: {}", MISSING),
    }
}

pub fn format_temperature(value: Option<f64>) -> String {
    match value {
        Some(t) => format!("Temp: {:.1}°C", t),
        None => format!("Temp: {}", MISSING),
    }
}

/// One-line summary of a sample, logged once per cycle
pub fn format_summary(sample: &Sample) -> String {
    format!(
        "CPU: {} | Memory: {} | Disk ({}): {} | {} | {}",
        format_percent(sample.cpu_percent),
        format_percent(sample.memory_percent),
        sample.disk_path,
        format_percent(sample.disk_percent),
        format_network(sample.network_io()),
        format_temperature(sample.temperature_celsius),
    )
}

/// Audit line describing the effective thresholds
pub fn format_config(config: &ThresholdConfig) -> String {
    let mut line = format!(
        "Config - Interval: {}s, CPU>{:?}%, Mem>{:?}%, Disk>{:?}% at '{}'",
        config.interval.as_secs_f64(),
        config.cpu_max,
        config.mem_max,
        config.disk_max,
        config.disk_path
    );
    if let Some(temp) = config.temp_max {
        line.push_str(&format!(", Temp>{:?}°C", temp));
    }
    line
}
