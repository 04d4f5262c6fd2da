//! Integration tests for logging functionality
//!
//! The global subscriber can only be installed once per process, so a single
//! test in this file calls `init_logging` successfully.

use assetport::config::LoggingConfig;
use assetport::logging::init_logging;
use tempfile::TempDir;

#[test]
fn test_logging_config_default() {
    let config = LoggingConfig::default();
    assert!(!config.local_enabled);
    assert_eq!(config.local_rotation, "daily");
}

#[test]
fn test_invalid_level_is_rejected_before_install() {
    let result = init_logging("verbose", &LoggingConfig::default());
    assert!(result.is_err());
    if let Err(e) = result {
        assert!(e.to_string().contains("Invalid log level"));
    }
}

#[test]
fn test_file_logging_writes_json_lines() {
    let temp_dir = TempDir::new().unwrap();
    let log_path = temp_dir.path().join("logs");

    let config = LoggingConfig {
        local_enabled: true,
        local_path: log_path.to_string_lossy().to_string(),
        local_rotation: "never".to_string(),
    };

    let guard = init_logging("info", &config).expect("Failed to initialize logging");
    assert!(log_path.exists());

    tracing::info!(target: "assetport", document_id = 3, "Export finished");
    drop(guard);

    let contents = std::fs::read_to_string(log_path.join("assetport.log")).unwrap();
    let line = contents
        .lines()
        .find(|line| line.contains("Export finished"))
        .expect("log line written");
    let entry: serde_json::Value = serde_json::from_str(line).unwrap();
    assert_eq!(entry["fields"]["document_id"], 3);
    assert_eq!(entry["level"], "INFO");
}
