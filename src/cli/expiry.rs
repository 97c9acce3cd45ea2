//! Appropriation expiry CLI command

use crate::config::settings::Settings;
use crate::error::FundResult;
use crate::services::get_appropriation_expiry_date;

pub fn handle_expiry_command(settings: &Settings, code: &str, fiscal_year: i32) -> FundResult<()> {
    let expiry = get_appropriation_expiry_date(code, fiscal_year);
    println!(
        "{} (FY{}) expires {}",
        code.trim().to_uppercase(),
        fiscal_year,
        expiry.format(&settings.date_format)
    );
    Ok(())
}
