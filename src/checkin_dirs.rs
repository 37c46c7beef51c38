//! Centralized application directory paths.
//!
//! Uses the [`dirs`] crate for platform-appropriate directory resolution.
//!
//! | Purpose | macOS | Linux |
//! |---------|-------|-------|
//! | App data | `~/Library/Application Support/checkin/` | `~/.local/share/checkin/` |
//! | Config | `~/Library/Application Support/checkin/` | `~/.config/checkin/` |
//!
//! # Environment Overrides
//!
//! - `CHECKIN_DATA_DIR` overrides [`data_dir`]
//! - `CHECKIN_CONFIG_DIR` overrides [`config_dir`]

use std::path::PathBuf;

/// Application data root directory.
///
/// Holds the key-value store (scheduler state, contact record) and logs.
#[must_use]
pub fn data_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("CHECKIN_DATA_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::data_dir()
        .map(|d| d.join("checkin"))
        .unwrap_or_else(|| PathBuf::from("/tmp/checkin-data"))
}

/// Application config directory.
#[must_use]
pub fn config_dir() -> PathBuf {
    if let Some(override_dir) = std::env::var_os("CHECKIN_CONFIG_DIR") {
        return PathBuf::from(override_dir);
    }
    dirs::config_dir()
        .map(|d| d.join("checkin"))
        .unwrap_or_else(|| PathBuf::from("/tmp/checkin-config"))
}

/// Main config file path (`config_dir()/config.toml`).
#[must_use]
pub fn config_file() -> PathBuf {
    config_dir().join("config.toml")
}

/// Key-value store root (`data_dir()/store/`).
#[must_use]
pub fn store_dir() -> PathBuf {
    data_dir().join("store")
}

/// Log file directory (`data_dir()/logs/`).
#[must_use]
pub fn logs_dir() -> PathBuf {
    data_dir().join("logs")
}
