//! Shared dashboard inputs for one-shot commands
//!
//! Mirrors the TUI form: anything omitted falls back to the preferences file.

use chrono::{Local, NaiveDate};
use clap::Args;
use std::path::PathBuf;

use crate::config::settings::Settings;
use crate::models::{AppropriationCode, Money, FISCAL_YEAR_CHOICES};
use crate::services::SessionInputs;

/// Form values accepted by `analyze` and `ask`
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Number of personnel in the branch
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub branch_size: Option<u32>,

    /// Hourly labor rate (e.g., "141.36")
    #[arg(long, value_parser = parse_hourly_rate)]
    pub hourly_rate: Option<Money>,

    /// Report date (YYYY-MM-DD), defaults to today
    #[arg(long, value_parser = parse_date)]
    pub report_date: Option<NaiveDate>,

    /// Fiscal year (2024-2027)
    #[arg(long, value_parser = parse_fiscal_year)]
    pub fiscal_year: Option<i32>,

    /// OMN balance
    #[arg(long, default_value = "0", value_parser = parse_money, allow_hyphen_values = true)]
    pub omn: Money,

    /// OPN balance
    #[arg(long, default_value = "0", value_parser = parse_money, allow_hyphen_values = true)]
    pub opn: Money,

    /// SCN balance
    #[arg(long, default_value = "0", value_parser = parse_money, allow_hyphen_values = true)]
    pub scn: Money,

    /// Spreadsheet to attach for reference (xlsx, xls, csv; not parsed)
    #[arg(long)]
    pub attachment: Option<PathBuf>,
}

impl InputArgs {
    /// Resolve against the preference defaults
    pub fn to_inputs(&self, settings: &Settings) -> SessionInputs {
        let defaults = &settings.defaults;
        let mut inputs = SessionInputs::new(
            self.branch_size.unwrap_or(defaults.branch_size),
            self.hourly_rate.unwrap_or(defaults.hourly_rate),
            self.fiscal_year.unwrap_or(defaults.fiscal_year),
            self.report_date
                .unwrap_or_else(|| Local::now().date_naive()),
        )
        .with_balance(AppropriationCode::Omn, self.omn)
        .with_balance(AppropriationCode::Opn, self.opn)
        .with_balance(AppropriationCode::Scn, self.scn);
        inputs.attachment = self.attachment.clone();
        inputs
    }
}

/// Parse any money amount, negatives included
pub fn parse_money(s: &str) -> Result<Money, String> {
    Money::parse(s).map_err(|e| e.to_string())
}

fn parse_hourly_rate(s: &str) -> Result<Money, String> {
    let rate = parse_money(s)?;
    if rate < Money::from_cents(1) {
        return Err("hourly rate must be at least 0.01".to_string());
    }
    Ok(rate)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid date '{}': expected YYYY-MM-DD", s))
}

fn parse_fiscal_year(s: &str) -> Result<i32, String> {
    let year: i32 = s
        .trim()
        .parse()
        .map_err(|_| format!("Invalid fiscal year '{}'", s))?;
    if !FISCAL_YEAR_CHOICES.contains(&year) {
        return Err(format!("fiscal year must be one of {:?}", FISCAL_YEAR_CHOICES));
    }
    Ok(year)
}
