//! Config file handling as the binary uses it.

use checkin::store::MemoryStore;
use checkin::{AdviceScheduler, CheckinConfig};
use std::sync::Arc;

#[test]
fn written_default_config_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("checkin").join("config.toml");

    CheckinConfig::default().save_to_file(&path).unwrap();
    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.contains("[scheduler]"));
    assert!(text.contains("advice_interval_secs = 259200"));

    let loaded = CheckinConfig::load_or_default(&path).unwrap();
    assert_eq!(loaded, CheckinConfig::default());
}

#[test]
fn invalid_config_is_rejected_by_builder() {
    let mut config = CheckinConfig::default();
    config.scheduler.check_cadence_secs = config.scheduler.advice_interval_secs + 1;

    let result = AdviceScheduler::builder(config, Arc::new(MemoryStore::new())).build();
    assert!(result.is_err());
}

#[test]
fn invalid_file_reports_config_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "[scheduler]\nhistory_limit = 0\n").unwrap();

    let err = CheckinConfig::from_file(&path).unwrap_err();
    assert!(err.to_string().starts_with("config error:"));
}
