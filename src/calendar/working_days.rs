//! Working-day counting

use chrono::{Datelike, NaiveDate, Weekday};
use std::collections::HashSet;

use super::holidays::get_federal_holidays;

/// Count Monday–Friday non-holiday days in `start..=end`
///
/// Returns 0 when `start` is after `end`. Holidays come only from the tables
/// of the two endpoint years, so a range spanning three or more calendar
/// years skips the middle years' holidays.
pub fn count_working_days(start: NaiveDate, end: NaiveDate) -> u32 {
    if start > end {
        return 0;
    }

    let holidays: HashSet<NaiveDate> = get_federal_holidays(start.year())
        .into_iter()
        .chain(get_federal_holidays(end.year()))
        .collect();

    start
        .iter_days()
        .take_while(|day| *day <= end)
        .filter(|day| is_weekday(*day) && !holidays.contains(day))
        .count() as u32
}

fn is_weekday(date: NaiveDate) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}
