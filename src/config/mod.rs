//! Configuration module for Fundwatch
//!
//! This module provides configuration management including:
//! - XDG-compliant path resolution
//! - User preference persistence

pub mod paths;
pub mod settings;

pub use paths::FundwatchPaths;
pub use settings::{AiSettings, FormDefaults, Settings};
