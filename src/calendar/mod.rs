//! Calendar utilities
//!
//! A fixed federal holiday table and a working-day counter built on it.

pub mod holidays;
pub mod working_days;

pub use holidays::{federal_holidays, get_federal_holidays, FederalHoliday};
pub use working_days::count_working_days;
