//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod analysis;
pub mod calendar;
pub mod expiry;
pub mod inputs;
pub mod setup;

pub use analysis::{handle_analyze_command, handle_ask_command};
pub use calendar::{handle_holidays_command, handle_working_days_command};
pub use expiry::handle_expiry_command;
pub use inputs::{parse_date, InputArgs};
pub use setup::{handle_config_command, handle_init_command};
