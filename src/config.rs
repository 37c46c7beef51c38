//! Configuration types for the check-in scheduler.

use crate::error::{CheckinError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Three days.
pub const DEFAULT_ADVICE_INTERVAL_SECS: u64 = 3 * 24 * 60 * 60;

/// One hour.
pub const DEFAULT_CHECK_CADENCE_SECS: u64 = 60 * 60;

/// Number of advice records kept in history.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Default EmailJS REST endpoint.
pub const DEFAULT_EMAIL_ENDPOINT: &str = "https://api.emailjs.com/api/v1.0/email/send";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckinConfig {
    /// Due-check timing and history retention.
    pub scheduler: SchedulerConfig,
    /// System notification settings.
    pub notification: NotificationConfig,
    /// Outbound email settings.
    pub email: EmailConfig,
    /// Log output settings for the binary.
    pub logging: LoggingConfig,
}

/// Scheduler timing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerConfig {
    /// Minimum time between two generated advice records, in seconds.
    pub advice_interval_secs: u64,
    /// Polling cadence of the due-check timer, in seconds.
    ///
    /// Delivery can lag the ideal due time by up to one cadence period.
    pub check_cadence_secs: u64,
    /// Maximum number of records kept in history.
    pub history_limit: usize,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            advice_interval_secs: DEFAULT_ADVICE_INTERVAL_SECS,
            check_cadence_secs: DEFAULT_CHECK_CADENCE_SECS,
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

impl SchedulerConfig {
    pub fn advice_interval(&self) -> Duration {
        Duration::from_secs(self.advice_interval_secs)
    }

    pub fn check_cadence(&self) -> Duration {
        Duration::from_secs(self.check_cadence_secs)
    }
}

/// System notification appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Whether system notifications are shown at all.
    pub enabled: bool,
    pub title: String,
    /// Replacement tag; notifications sharing a tag replace each other.
    pub tag: String,
    pub icon: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            title: "Mental Health Check-in".to_owned(),
            tag: "mental-health-advice".to_owned(),
            icon: "/favicon.ico".to_owned(),
        }
    }
}

/// EmailJS delivery settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmailConfig {
    /// Whether advice emails are sent.
    pub enabled: bool,
    pub endpoint: String,
    pub service_id: String,
    pub template_id: String,
    /// EmailJS public key (sent as `user_id`).
    pub public_key: String,
    /// Optional EmailJS private access token.
    pub access_token: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Greeting name used when the contact record has no name.
    pub fallback_name: String,
}

impl Default for EmailConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: DEFAULT_EMAIL_ENDPOINT.to_owned(),
            service_id: String::new(),
            template_id: String::new(),
            public_key: String::new(),
            access_token: None,
            timeout_secs: 30,
            fallback_name: "Valued User".to_owned(),
        }
    }
}

impl EmailConfig {
    /// `true` when enabled and every EmailJS identifier is filled in.
    pub fn is_configured(&self) -> bool {
        self.enabled
            && !self.service_id.trim().is_empty()
            && !self.template_id.trim().is_empty()
            && !self.public_key.trim().is_empty()
    }
}

/// Log output for the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Also write daily-rotated log files under the data directory.
    pub file_enabled: bool,
    /// `EnvFilter` directive used when `RUST_LOG` is unset.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            file_enabled: false,
            filter: "checkin=info".to_owned(),
        }
    }
}

impl CheckinConfig {
    /// Load configuration from a TOML file, falling back to defaults for missing fields.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| CheckinError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `path` when it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file cannot be parsed or is invalid.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.is_file() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to a TOML file, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written or the config cannot be serialized.
    pub fn save_to_file(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| CheckinError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> PathBuf {
        crate::checkin_dirs::config_file()
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns [`CheckinError::Config`] describing the first violated constraint.
    pub fn validate(&self) -> Result<()> {
        let s = &self.scheduler;
        if s.check_cadence_secs == 0 {
            return Err(CheckinError::Config(
                "scheduler.check_cadence_secs must be greater than zero".to_owned(),
            ));
        }
        if s.check_cadence_secs >= s.advice_interval_secs {
            return Err(CheckinError::Config(format!(
                "scheduler.check_cadence_secs ({}) must be shorter than advice_interval_secs ({})",
                s.check_cadence_secs, s.advice_interval_secs
            )));
        }
        if s.history_limit == 0 {
            return Err(CheckinError::Config(
                "scheduler.history_limit must be at least 1".to_owned(),
            ));
        }
        if self.email.timeout_secs == 0 {
            return Err(CheckinError::Config(
                "email.timeout_secs must be greater than zero".to_owned(),
            ));
        }
        Ok(())
    }
}
