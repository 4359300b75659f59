use std::path::PathBuf;
use std::time::Duration;

use sysmon::commands::build_cli;
use sysmon::core::config::{MonitorConfig, NotifyTarget};
use sysmon::platform::Platform;

fn config_from(args: &[&str], platform: Platform) -> sysmon::Result<MonitorConfig> {
    let mut argv = vec!["sysmon"];
    argv.extend_from_slice(args);
    let matches = build_cli().try_get_matches_from(argv).unwrap();
    MonitorConfig::from_matches_for(&matches, platform)
}

#[test]
fn test_config_defaults() {
    let config = config_from(&[], Platform::Posix).unwrap();

    assert_eq!(config.thresholds.cpu_max, 85.0);
    assert_eq!(config.thresholds.mem_max, 85.0);
    assert_eq!(config.thresholds.disk_max, 90.0);
    assert_eq!(config.thresholds.temp_max, None);
    assert_eq!(config.thresholds.disk_path, "/");
    assert_eq!(config.thresholds.interval, Duration::from_secs(5));
    assert_eq!(config.export_path, None);
    assert_eq!(config.notify, NotifyTarget::Disabled);
    assert_eq!(config.log_file, Some(PathBuf::from("system_monitor.log")));
    assert_eq!(config.cpu_window, Duration::from_millis(1000));
    assert!(!config.disk_path_rewritten);
}

#[test]
fn test_config_windows_default_path() {
    let config = config_from(&[], Platform::Windows).unwrap();
    assert_eq!(config.thresholds.disk_path, "C:\\");
    assert!(!config.disk_path_rewritten);

    let config = config_from(&["--path", "/"], Platform::Windows).unwrap();
    assert_eq!(config.thresholds.disk_path, "C:\\");
    assert!(config.disk_path_rewritten);
}

#[test]
fn test_config_custom_thresholds() {
    let config = config_from(
        &[
            "--cpu",
            "70",
            "--mem",
            "75.5",
            "--disk",
            "95",
            "--path",
            "/var",
            "--interval",
            "30",
            "--temp-threshold",
            "80",
        ],
        Platform::Posix,
    )
    .unwrap();

    assert_eq!(config.thresholds.cpu_max, 70.0);
    assert_eq!(config.thresholds.mem_max, 75.5);
    assert_eq!(config.thresholds.disk_max, 95.0);
    assert_eq!(config.thresholds.disk_path, "/var");
    assert_eq!(config.thresholds.interval, Duration::from_secs(30));
    assert_eq!(config.thresholds.temp_max, Some(80.0));
}

#[test]
fn test_config_export_flags() {
    let config = config_from(&["--log-json"], Platform::Posix).unwrap();
    assert_eq!(config.export_path, Some(PathBuf::from("system_metrics.json")));

    let config = config_from(&["--log-json", "--json-path", "/tmp/m.jsonl"], Platform::Posix).unwrap();
    assert_eq!(config.export_path, Some(PathBuf::from("/tmp/m.jsonl")));
}

#[test]
fn test_json_path_requires_log_json() {
    let result = build_cli().try_get_matches_from(["sysmon", "--json-path", "/tmp/m.jsonl"]);
    assert!(result.is_err());
}

#[test]
fn test_config_notify_targets() {
    let config = config_from(&["--notify-email", "ops@example.com"], Platform::Posix).unwrap();
    assert_eq!(
        config.notify,
        NotifyTarget::Email {
            relay: "localhost:25".to_string(),
            address: "ops@example.com".to_string(),
        }
    );

    let config = config_from(
        &["--notify-email", "ops@example.com", "--smtp-relay", "mail:2525"],
        Platform::Posix,
    )
    .unwrap();
    assert!(matches!(config.notify, NotifyTarget::Email { ref relay, .. } if relay == "mail:2525"));

    let config = config_from(&["--notify-webhook", "http://127.0.0.1:9/hook"], Platform::Posix).unwrap();
    assert_eq!(
        config.notify,
        NotifyTarget::Webhook {
            url: "http://127.0.0.1:9/hook".to_string()
        }
    );
}

#[test]
fn test_notify_targets_are_exclusive() {
    let result = build_cli().try_get_matches_from([
        "sysmon",
        "--notify-email",
        "ops@example.com",
        "--notify-webhook",
        "http://127.0.0.1:9/hook",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_console_only_logging() {
    let config = config_from(&["--no-log-file"], Platform::Posix).unwrap();
    assert_eq!(config.log_file, None);
}

#[test]
fn test_non_finite_threshold_rejected() {
    let result = config_from(&["--cpu", "NaN"], Platform::Posix);
    assert!(result.is_err());
}

#[test]
fn test_disabled_notifier_by_default() {
    let config = config_from(&[], Platform::Posix).unwrap();
    let notifier = config.build_notifier().unwrap();
    assert!(!notifier.is_enabled());
}
