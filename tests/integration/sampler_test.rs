use std::sync::Arc;
use std::time::Duration;

use sysmon::core::system_monitor::{Sampler, SysinfoReader, ThresholdConfig};
use sysmon::ui::format_summary;
use tempfile::TempDir;

use super::common::StubReader;

#[tokio::test]
async fn test_missing_disk_path_only_blanks_disk() {
    let sampler = Sampler::new(Arc::new(StubReader::default()));
    let config = ThresholdConfig {
        disk_path: "/no/such/mount/point".to_string(),
        ..Default::default()
    };

    let sample = sampler.sample(&config).await;

    assert_eq!(sample.disk_percent, None);
    assert_eq!(sample.disk_path, "/no/such/mount/point");
    assert_eq!(sample.cpu_percent, Some(25.0));
    assert_eq!(sample.memory_percent, Some(50.0));
    assert_eq!(sample.network_io(), Some((1_000, 2_000)));
    assert_eq!(sample.temperature_celsius, Some(42.0));

    let summary = format_summary(&sample);
    assert_eq!(summary.matches("Error").count(), 1);
    assert!(summary.contains("Disk (/no/such/mount/point): Error"));
}

#[tokio::test]
async fn test_existing_disk_path_is_read() {
    let dir = TempDir::new().unwrap();
    let sampler = Sampler::new(Arc::new(StubReader::default()));
    let config = ThresholdConfig {
        disk_path: dir.path().to_string_lossy().to_string(),
        ..Default::default()
    };

    let sample = sampler.sample(&config).await;
    assert_eq!(sample.disk_percent, Some(60.0));
    assert!(!format_summary(&sample).contains("Error"));
}

#[tokio::test]
async fn test_reads_run_concurrently() {
    struct SlowReader;

    impl sysmon::core::system_monitor::MetricReader for SlowReader {
        fn read_cpu_percent(&self) -> sysmon::Result<f64> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(1.0)
        }
        fn read_memory_percent(&self) -> sysmon::Result<f64> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(1.0)
        }
        fn read_disk_percent(&self, _path: &str) -> sysmon::Result<f64> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(1.0)
        }
        fn read_network_io_counters(&self) -> sysmon::Result<(u64, u64)> {
            std::thread::sleep(Duration::from_millis(300));
            Ok((1, 1))
        }
        fn read_temperature(&self) -> sysmon::Result<f64> {
            std::thread::sleep(Duration::from_millis(300));
            Ok(1.0)
        }
    }

    let sampler = Sampler::new(Arc::new(SlowReader));
    let started = std::time::Instant::now();
    let sample = sampler.sample(&ThresholdConfig::default()).await;

    assert_eq!(sample.cpu_percent, Some(1.0));
    assert!(started.elapsed() < Duration::from_millis(1200));
}

#[cfg(target_os = "linux")]
#[tokio::test]
async fn test_sysinfo_reader_survives_missing_path() {
    let sampler = Sampler::new(Arc::new(SysinfoReader::with_cpu_window(Duration::ZERO)));
    let config = ThresholdConfig {
        disk_path: "/no/such/mount/point".to_string(),
        ..Default::default()
    };

    let sample = sampler.sample(&config).await;

    assert_eq!(sample.disk_percent, None);
    let cpu = sample.cpu_percent.expect("cpu reading");
    assert!((0.0..=100.0).contains(&cpu));
    let memory = sample.memory_percent.expect("memory reading");
    assert!(memory > 0.0 && memory <= 100.0);
}
