//! Federal holiday table
//!
//! Observed federal holidays for the fiscal years the dashboard covers.
//! This is a lookup table, not a holiday rule engine: years without an entry
//! have no holidays.

use chrono::NaiveDate;
use serde::Serialize;

/// One observed federal holiday
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FederalHoliday {
    pub date: NaiveDate,
    pub name: &'static str,
}

const HOLIDAYS_2024: &[(u32, u32, &str)] = &[
    (1, 1, "New Year's Day"),
    (1, 15, "Birthday of Martin Luther King, Jr."),
    (2, 19, "Washington's Birthday"),
    (5, 27, "Memorial Day"),
    (6, 19, "Juneteenth National Independence Day"),
    (7, 4, "Independence Day"),
    (9, 2, "Labor Day"),
    (10, 14, "Columbus Day"),
    (11, 11, "Veterans Day"),
    (11, 28, "Thanksgiving Day"),
    (12, 25, "Christmas Day"),
];

const HOLIDAYS_2025: &[(u32, u32, &str)] = &[
    (1, 1, "New Year's Day"),
    (1, 20, "Birthday of Martin Luther King, Jr."),
    (2, 17, "Washington's Birthday"),
    (5, 26, "Memorial Day"),
    (6, 19, "Juneteenth National Independence Day"),
    (7, 4, "Independence Day"),
    (9, 1, "Labor Day"),
    (10, 13, "Columbus Day"),
    (11, 11, "Veterans Day"),
    (11, 27, "Thanksgiving Day"),
    (12, 25, "Christmas Day"),
];

fn table_for(year: i32) -> &'static [(u32, u32, &'static str)] {
    match year {
        2024 => HOLIDAYS_2024,
        2025 => HOLIDAYS_2025,
        _ => &[],
    }
}

/// Named holidays for a year, in calendar order
pub fn federal_holidays(year: i32) -> Vec<FederalHoliday> {
    table_for(year)
        .iter()
        .filter_map(|&(month, day, name)| {
            NaiveDate::from_ymd_opt(year, month, day).map(|date| FederalHoliday { date, name })
        })
        .collect()
}

/// Holiday dates for a year, in calendar order; empty outside 2024–2025
pub fn get_federal_holidays(year: i32) -> Vec<NaiveDate> {
    federal_holidays(year).into_iter().map(|h| h.date).collect()
}
