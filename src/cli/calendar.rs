//! Calendar CLI commands
//!
//! Holiday listing and working-day counts.

use chrono::NaiveDate;

use crate::calendar::{count_working_days, federal_holidays};
use crate::config::settings::Settings;
use crate::display::format_holiday_list;
use crate::error::FundResult;

/// Print the fixed federal holiday table for a year
pub fn handle_holidays_command(settings: &Settings, year: i32) -> FundResult<()> {
    let holidays = federal_holidays(year);
    print!("{}", format_holiday_list(year, &holidays, &settings.date_format));
    if holidays.is_empty() {
        println!();
    }
    Ok(())
}

/// Print the inclusive working-day count between two dates
pub fn handle_working_days_command(start: NaiveDate, end: NaiveDate) -> FundResult<()> {
    let count = count_working_days(start, end);
    println!("{} working day{} from {} to {}", count, plural(count), start, end);
    Ok(())
}

fn plural(count: u32) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
