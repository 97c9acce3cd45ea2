//! Display formatting for terminal output
//!
//! Plain-text formatting of analysis results and calendar tables for the
//! one-shot CLI commands.

pub mod analysis;
pub mod calendar;

pub use analysis::{format_analysis, format_analysis_json, format_burn};
pub use calendar::format_holiday_list;
