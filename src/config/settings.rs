//! User preferences for Fundwatch
//!
//! Holds the default form values, chat toggle, and AI endpoint settings.
//! The API credential is deliberately absent: it is supplied per session.

use chrono::format::{Item, StrftimeItems};
use serde::{Deserialize, Serialize};

use super::paths::FundwatchPaths;
use crate::error::FundError;
use crate::models::{Money, FISCAL_YEAR_CHOICES};

/// Default values pre-filled into the dashboard form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDefaults {
    /// Number of personnel in the branch
    #[serde(default = "default_branch_size")]
    pub branch_size: u32,

    /// Fully burdened hourly labor rate
    #[serde(default = "default_hourly_rate")]
    pub hourly_rate: Money,

    /// Fiscal year preselected in the selector
    #[serde(default = "default_fiscal_year")]
    pub fiscal_year: i32,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            branch_size: default_branch_size(),
            hourly_rate: default_hourly_rate(),
            fiscal_year: default_fiscal_year(),
        }
    }
}

/// Hosted generation endpoint settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AiSettings {
    /// Scheme and host of the generation API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model name placed in the request path
    #[serde(default = "default_model")]
    pub model: String,

    /// Upper bound for one request, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AiSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// User settings for Fundwatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// Default currency symbol
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Date format preference (strftime format)
    #[serde(default = "default_date_format")]
    pub date_format: String,

    /// Form defaults
    #[serde(default)]
    pub defaults: FormDefaults,

    /// Whether the chat panel starts enabled
    #[serde(default = "default_chat_enabled")]
    pub chat_enabled: bool,

    /// AI endpoint settings
    #[serde(default)]
    pub ai: AiSettings,
}

fn default_schema_version() -> u32 {
    1
}

fn default_currency() -> String {
    "$".to_string()
}

fn default_date_format() -> String {
    "%Y-%m-%d".to_string()
}

fn default_branch_size() -> u32 {
    17
}

fn default_hourly_rate() -> Money {
    Money::from_cents(14136)
}

fn default_fiscal_year() -> i32 {
    2025
}

fn default_chat_enabled() -> bool {
    true
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_model() -> String {
    "gemini-1.5-flash".to_string()
}

/// Longest an AI request may run, in seconds
pub const MAX_TIMEOUT_SECS: u64 = 45;

fn default_timeout_secs() -> u64 {
    MAX_TIMEOUT_SECS
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            currency_symbol: default_currency(),
            date_format: default_date_format(),
            defaults: FormDefaults::default(),
            chat_enabled: default_chat_enabled(),
            ai: AiSettings::default(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or fall back to defaults if the file doesn't exist
    pub fn load_or_create(paths: &FundwatchPaths) -> Result<Self, FundError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| FundError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents)
            .map_err(|e| FundError::Config(format!("Failed to parse settings file: {}", e)))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to disk
    pub fn save(&self, paths: &FundwatchPaths) -> Result<(), FundError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| FundError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| FundError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }

    /// Reject defaults the form itself could never produce
    pub fn validate(&self) -> Result<(), FundError> {
        if self.defaults.branch_size < 1 {
            return Err(FundError::Config(
                "defaults.branch_size must be at least 1".into(),
            ));
        }
        if self.defaults.hourly_rate < Money::from_cents(1) {
            return Err(FundError::Config(
                "defaults.hourly_rate must be at least 0.01".into(),
            ));
        }
        if !FISCAL_YEAR_CHOICES.contains(&self.defaults.fiscal_year) {
            return Err(FundError::Config(format!(
                "defaults.fiscal_year must be one of {:?}",
                FISCAL_YEAR_CHOICES
            )));
        }
        if StrftimeItems::new(&self.date_format).any(|item| matches!(item, Item::Error)) {
            return Err(FundError::Config(format!(
                "date_format is not a valid strftime pattern: {}",
                self.date_format
            )));
        }
        if self.ai.timeout_secs == 0 || self.ai.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(FundError::Config(format!(
                "ai.timeout_secs must be between 1 and {}",
                MAX_TIMEOUT_SECS
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.defaults.branch_size, 17);
        assert_eq!(settings.defaults.hourly_rate, Money::from_cents(14136));
        assert_eq!(settings.defaults.fiscal_year, 2025);
        assert_eq!(settings.ai.timeout_secs, 45);
        assert!(settings.chat_enabled);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FundwatchPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.defaults.branch_size = 42;
        settings.chat_enabled = false;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.defaults.branch_size, 42);
        assert!(!loaded.chat_enabled);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FundwatchPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"ai": {"model": "gemini-pro"}}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.ai.model, "gemini-pro");
        assert_eq!(loaded.ai.timeout_secs, 45);
        assert_eq!(loaded.defaults.fiscal_year, 2025);
    }

    #[test]
    fn test_rejects_fiscal_year_outside_selector() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FundwatchPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"defaults": {"fiscal_year": 1999}}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, FundError::Config(_)));
    }

    #[test]
    fn test_rejects_unknown_date_format_specifier() {
        let mut settings = Settings::default();
        settings.date_format = "%Q".into();
        let err = settings.validate().unwrap_err();
        assert!(err.to_string().contains("date_format"));

        settings.date_format = "%d %b %Y".into();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_timeout_capped() {
        let mut settings = Settings::default();
        settings.ai.timeout_secs = MAX_TIMEOUT_SECS;
        assert!(settings.validate().is_ok());

        settings.ai.timeout_secs = 120;
        assert!(settings.validate().is_err());

        settings.ai.timeout_secs = 0;
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_load_without_file_does_not_write() {
        let temp_dir = TempDir::new().unwrap();
        let paths = FundwatchPaths::with_base_dir(temp_dir.path().to_path_buf());

        let _ = Settings::load_or_create(&paths).unwrap();
        assert!(!paths.is_initialized());
    }
}
