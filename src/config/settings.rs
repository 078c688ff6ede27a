//! User settings for Monthwise
//!
//! Manages preferences such as the currency symbol, the trend window and
//! whether an empty budget gets the default template automatically.

use serde::{Deserialize, Serialize};

use super::paths::MonthwisePaths;
use crate::error::MonthwiseError;

/// User settings for Monthwise
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Currency symbol used when formatting amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Number of months shown in category trends
    #[serde(default = "default_trend_months")]
    pub trend_months: u32,

    /// Apply the default category template when no month has any data
    #[serde(default = "default_true")]
    pub auto_apply_default_template: bool,

    /// Tracing filter used when RUST_LOG is not set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,

    /// Account allow-list applied when a command does not name accounts
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default_accounts: Vec<String>,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_trend_months() -> u32 {
    6
}

fn default_true() -> bool {
    true
}

fn default_log_filter() -> String {
    "monthwise=info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            trend_months: default_trend_months(),
            auto_apply_default_template: true,
            log_filter: default_log_filter(),
            default_accounts: Vec::new(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &MonthwisePaths) -> Result<Self, MonthwiseError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                MonthwiseError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                MonthwiseError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &MonthwisePaths) -> Result<(), MonthwiseError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            MonthwiseError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| MonthwiseError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings that would make trend or display computations meaningless
    pub fn validate(&self) -> Result<(), MonthwiseError> {
        if self.trend_months == 0 || self.trend_months > 36 {
            return Err(MonthwiseError::Config(format!(
                "trend_months must be between 1 and 36, got {}",
                self.trend_months
            )));
        }
        Ok(())
    }

    /// The account allow-list to use when the caller supplied none
    pub fn accounts_or_default(&self, explicit: Vec<String>) -> Option<Vec<String>> {
        if !explicit.is_empty() {
            Some(explicit)
        } else if !self.default_accounts.is_empty() {
            Some(self.default_accounts.clone())
        } else {
            None
        }
    }
}
