//! Path management for Fundwatch
//!
//! ## Path Resolution Order
//!
//! 1. `FUNDWATCH_DIR` environment variable (if set)
//! 2. Unix (Linux/macOS): `$XDG_CONFIG_HOME/fundwatch` or `~/.config/fundwatch`
//! 3. Windows: `%APPDATA%\fundwatch`
//!
//! Only preferences and the TUI log live here. Balances, analysis results and
//! chat transcripts are never written to disk.

use std::path::PathBuf;

use crate::error::FundError;

/// Manages all paths used by Fundwatch
#[derive(Debug, Clone)]
pub struct FundwatchPaths {
    base_dir: PathBuf,
}

impl FundwatchPaths {
    /// Resolve the base directory from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if no home/config directory can be determined.
    pub fn new() -> Result<Self, FundError> {
        let base_dir = if let Ok(custom) = std::env::var("FUNDWATCH_DIR") {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create paths rooted at a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Path to the preferences file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Path to the log file used while the TUI owns the terminal
    pub fn log_file(&self) -> PathBuf {
        self.base_dir.join("fundwatch.log")
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), FundError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| FundError::Io(format!("Failed to create base directory: {}", e)))
    }

    /// Check if a preferences file has been written
    pub fn is_initialized(&self) -> bool {
        self.settings_file().exists()
    }
}

#[cfg(not(windows))]
fn resolve_default_path() -> Result<PathBuf, FundError> {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return Ok(PathBuf::from(xdg).join("fundwatch"));
    }
    let home = std::env::var("HOME")
        .map_err(|_| FundError::Config("Could not determine HOME directory".into()))?;
    Ok(PathBuf::from(home).join(".config").join("fundwatch"))
}

#[cfg(windows)]
fn resolve_default_path() -> Result<PathBuf, FundError> {
    let appdata = std::env::var("APPDATA")
        .map_err(|_| FundError::Config("Could not determine APPDATA directory".into()))?;
    Ok(PathBuf::from(appdata).join("fundwatch"))
}
