//! User settings for nextcheck
//!
//! Pay cycle length, the due-day overflow policy, display preferences and the
//! optional remote API connection.

use serde::{Deserialize, Serialize};

use super::paths::NextCheckPaths;
use crate::error::NextCheckError;
use crate::models::{IncomeId, DEFAULT_CYCLE_LENGTH_DAYS, MAX_CYCLE_LENGTH_DAYS};

/// How a due day that does not exist in its target month is resolved
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum DueDayOverflow {
    /// Use the last day of the target month (31 in June -> June 30)
    #[default]
    Clamp,
    /// Spill the extra days into the following month (30 in February -> March 1/2)
    Roll,
}

/// User settings for nextcheck
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Days between paychecks
    #[serde(default = "default_cycle_length")]
    pub cycle_length_days: u32,

    /// Resolution of due days past the end of a month
    #[serde(default)]
    pub due_day_overflow: DueDayOverflow,

    /// Currency symbol used when rendering amounts
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Base URL of the income/expense service; the local JSON store is used
    /// when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_url: Option<String>,

    /// Income record to track on the remote service
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub income_id: Option<IncomeId>,

    /// HTTP request timeout
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_schema_version() -> u32 {
    1
}

fn default_cycle_length() -> u32 {
    DEFAULT_CYCLE_LENGTH_DAYS
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_request_timeout_ms() -> u64 {
    10_000
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            cycle_length_days: default_cycle_length(),
            due_day_overflow: DueDayOverflow::default(),
            currency_symbol: default_currency(),
            api_url: None,
            income_id: None,
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or return defaults if the file doesn't exist
    pub fn load_or_create(paths: &NextCheckPaths) -> Result<Self, NextCheckError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                NextCheckError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                NextCheckError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            settings.validate()?;
            Ok(settings)
        } else {
            // Don't save yet - let caller decide when to persist
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &NextCheckPaths) -> Result<(), NextCheckError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            NextCheckError::Config(format!("Failed to serialize settings: {}", e))
        })?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| NextCheckError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject settings the calculator cannot work with
    pub fn validate(&self) -> Result<(), NextCheckError> {
        if !(1..=MAX_CYCLE_LENGTH_DAYS).contains(&self.cycle_length_days) {
            return Err(NextCheckError::Config(format!(
                "cycle_length_days must be between 1 and {}, got {}",
                MAX_CYCLE_LENGTH_DAYS, self.cycle_length_days
            )));
        }
        Ok(())
    }
}
