//! Fiscal year and report date
//!
//! The dashboard's selector offers a fixed set of fiscal years; the expiry
//! resolver itself accepts any year.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Fiscal years offered by the selector
pub const FISCAL_YEAR_CHOICES: [i32; 4] = [2024, 2025, 2026, 2027];

/// Fiscal year and reporting date for one analysis
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FiscalContext {
    pub fiscal_year: i32,
    pub report_date: NaiveDate,
}

impl FiscalContext {
    pub fn new(fiscal_year: i32, report_date: NaiveDate) -> Self {
        Self {
            fiscal_year,
            report_date,
        }
    }
}

/// Next selectable fiscal year, wrapping around
///
/// A year outside the selector snaps to the first choice.
pub fn next_fiscal_year(current: i32) -> i32 {
    match FISCAL_YEAR_CHOICES.iter().position(|&y| y == current) {
        Some(idx) => FISCAL_YEAR_CHOICES[(idx + 1) % FISCAL_YEAR_CHOICES.len()],
        None => FISCAL_YEAR_CHOICES[0],
    }
}

/// Previous selectable fiscal year, wrapping around
pub fn prev_fiscal_year(current: i32) -> i32 {
    let len = FISCAL_YEAR_CHOICES.len();
    match FISCAL_YEAR_CHOICES.iter().position(|&y| y == current) {
        Some(idx) => FISCAL_YEAR_CHOICES[(idx + len - 1) % len],
        None => FISCAL_YEAR_CHOICES[0],
    }
}
