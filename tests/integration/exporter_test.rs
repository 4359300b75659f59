use std::fs;

use chrono::{TimeZone, Utc};
use serde_json::Value;
use sysmon::core::system_monitor::{Exporter, JsonlExporter, Sample};
use tempfile::TempDir;

fn full_sample() -> Sample {
    Sample {
        timestamp: Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 45).unwrap(),
        cpu_percent: Some(12.5),
        memory_percent: Some(48.25),
        disk_percent: Some(71.0),
        disk_path: "/".to_string(),
        network_bytes_sent: Some(987_654),
        network_bytes_recv: Some(123_456),
        temperature_celsius: Some(55.5),
    }
}

#[test]
fn test_exported_line_parses_back_to_sample() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("metrics.json");
    let mut exporter = JsonlExporter::new(&path);

    let original = full_sample();
    exporter.append(&original).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let line = content.lines().next().unwrap();

    let parsed: Sample = serde_json::from_str(line).unwrap();
    assert_eq!(parsed, original);

    let json: Value = serde_json::from_str(line).unwrap();
    let object = json.as_object().unwrap();
    assert_eq!(object.len(), 8);
    assert!(object["timestamp"]
        .as_str()
        .unwrap()
        .starts_with("2024-05-01T12:30:45"));
}

#[test]
fn test_absent_metrics_export_as_null() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("metrics.json");
    let mut exporter = JsonlExporter::new(&path);

    let sample = Sample {
        cpu_percent: Some(0.0),
        ..Sample::empty("/srv")
    };
    exporter.append(&sample).unwrap();

    let line = fs::read_to_string(&path).unwrap();
    let json: Value = serde_json::from_str(line.trim_end()).unwrap();

    assert_eq!(json["cpu_percent"], Value::from(0.0));
    for field in [
        "memory_percent",
        "disk_percent",
        "network_bytes_sent",
        "network_bytes_recv",
        "temperature_celsius",
    ] {
        assert!(json[field].is_null(), "{} should be null", field);
    }
    assert_eq!(json["disk_path"], "/srv");

    let parsed: Sample = serde_json::from_str(line.trim_end()).unwrap();
    assert_eq!(parsed.memory_percent, None);
    assert_eq!(parsed.cpu_percent, Some(0.0));
}

#[test]
fn test_appends_without_truncating() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("metrics.json");
    fs::write(&path, "{\"previous\":true}\n").unwrap();

    let mut exporter = JsonlExporter::new(&path);
    exporter.append(&full_sample()).unwrap();
    exporter.append(&Sample::empty("/")).unwrap();

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 3);
    assert_eq!(lines[0], "{\"previous\":true}");
    assert!(content.ends_with('\n'));
}

#[test]
fn test_unwritable_target_reports_error() {
    let dir = TempDir::new().unwrap();
    // A directory cannot be opened for appending
    let mut exporter = JsonlExporter::new(dir.path());

    assert!(exporter.append(&full_sample()).is_err());
}
