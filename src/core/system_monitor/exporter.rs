//! Durable export of samples as JSON lines.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

use super::metrics::Sample;
use crate::error::Result;

pub const DEFAULT_EXPORT_FILE: &str = "system_metrics.json";

/// Sink that persists samples
pub trait Exporter: Send {
    /// Append one sample. Earlier records must never be truncated.
    fn append(&mut self, sample: &Sample) -> Result<()>;
}

/// Exporter used when export is disabled
#[derive(Debug, Default)]
pub struct NullExporter;

impl Exporter for NullExporter {
    fn append(&mut self, _sample: &Sample) -> Result<()> {
        Ok(())
    }
}

/// Appends one JSON object per line to a file.
///
/// The file is reopened for every record so that it may be rotated or
/// removed externally between cycles.
#[derive(Debug, Clone)]
pub struct JsonlExporter {
    path: PathBuf,
}

impl JsonlExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl Exporter for JsonlExporter {
    fn append(&mut self, sample: &Sample) -> Result<()> {
        let mut line = to_json_line(sample)?;
        line.push('\n');

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        // Single write so a record is never interleaved with another writer's
        file.write_all(line.as_bytes())?;
        Ok(())
    }
}

/// Serialize a sample to its single-line JSON form (without the trailing newline)
pub fn to_json_line(sample: &Sample) -> Result<String> {
    Ok(serde_json::to_string(sample)?)
}
