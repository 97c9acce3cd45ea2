//! Appropriation expiry resolver
//!
//! Each appropriation expires on September 30 a fixed number of years after
//! its fiscal year: OMN in the same year, OPN one year later, SCN two years
//! later.

use chrono::NaiveDate;

/// (substring, years after the fiscal year), checked in this order
const EXPIRY_RULES: [(&str, i32); 3] = [("OMN", 0), ("OPN", 1), ("SCN", 2)];

/// Resolve the expiry date of an appropriation code
///
/// Matching is a case-insensitive substring test in the order OMN, OPN, SCN;
/// the first match wins, so `"OMN-OPN"` follows the OMN rule. Unknown codes
/// expire at the end of the fiscal year itself.
///
/// # Examples
/// ```
/// use chrono::NaiveDate;
/// use fundwatch::services::expiry::get_appropriation_expiry_date;
///
/// assert_eq!(
///     get_appropriation_expiry_date("SCN", 2025),
///     NaiveDate::from_ymd_opt(2027, 9, 30).unwrap()
/// );
/// ```
pub fn get_appropriation_expiry_date(code: &str, fiscal_year: i32) -> NaiveDate {
    let upper = code.to_uppercase();
    let offset = EXPIRY_RULES
        .iter()
        .find(|(needle, _)| upper.contains(needle))
        .map(|(_, years)| *years)
        .unwrap_or(0);

    end_of_fiscal_year(fiscal_year.saturating_add(offset))
}

/// September 30 of `year`, clamped to the representable date range
fn end_of_fiscal_year(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 9, 30).unwrap_or(if year < 0 {
        NaiveDate::MIN
    } else {
        NaiveDate::MAX
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sept_30(year: i32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, 9, 30).unwrap()
    }

    #[test]
    fn test_fixed_offsets() {
        assert_eq!(get_appropriation_expiry_date("OMN", 2025), sept_30(2025));
        assert_eq!(get_appropriation_expiry_date("OPN", 2025), sept_30(2026));
        assert_eq!(get_appropriation_expiry_date("SCN", 2025), sept_30(2027));
    }

    #[test]
    fn test_unknown_code_defaults_to_fiscal_year() {
        assert_eq!(get_appropriation_expiry_date("XYZ", 2025), sept_30(2025));
        assert_eq!(get_appropriation_expiry_date("", 2024), sept_30(2024));
    }

    #[test]
    fn test_case_insensitive_substring() {
        assert_eq!(get_appropriation_expiry_date("fy25 opn line 3", 2025), sept_30(2026));
        assert_eq!(get_appropriation_expiry_date("scn", 2024), sept_30(2026));
    }

    #[test]
    fn test_first_match_wins() {
        assert_eq!(get_appropriation_expiry_date("OMN-OPN", 2025), sept_30(2025));
        assert_eq!(get_appropriation_expiry_date("SCN/OPN", 2025), sept_30(2026));
        assert_eq!(get_appropriation_expiry_date("SCN+OMN", 2025), sept_30(2025));
    }

    #[test]
    fn test_odd_fiscal_years_are_accepted() {
        assert_eq!(get_appropriation_expiry_date("OPN", 1999), sept_30(2000));
        assert_eq!(get_appropriation_expiry_date("SCN", i32::MAX), NaiveDate::MAX);
    }
}
