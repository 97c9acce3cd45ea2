//! Calendar display formatting

use crate::calendar::FederalHoliday;

/// Format a year's holiday table
pub fn format_holiday_list(year: i32, holidays: &[FederalHoliday], date_format: &str) -> String {
    if holidays.is_empty() {
        return format!("No federal holiday table for {}.", year);
    }

    let mut output = format!("Federal holidays {}\n", year);
    output.push_str(&format!("{:-<12}  {:-<9}  {:-<36}\n", "", "", ""));

    for holiday in holidays {
        output.push_str(&format!(
            "{:<12}  {:<9}  {}\n",
            holiday.date.format(date_format).to_string(),
            holiday.date.format("%A").to_string(),
            holiday.name
        ));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::federal_holidays;

    #[test]
    fn test_empty_year() {
        assert_eq!(
            format_holiday_list(2030, &[], "%Y-%m-%d"),
            "No federal holiday table for 2030."
        );
    }

    #[test]
    fn test_lists_names_and_weekdays() {
        let text = format_holiday_list(2024, &federal_holidays(2024), "%Y-%m-%d");
        assert!(text.contains("2024-11-28    Thursday   Thanksgiving Day"));
        assert_eq!(text.lines().count(), 13);
    }
}
