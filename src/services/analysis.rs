//! Analysis service
//!
//! Turns the dashboard's form inputs into an [`AnalysisContext`].

use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::error::{FundError, FundResult};
use crate::models::{
    AnalysisContext, AppropriationBalance, AppropriationCode, AppropriationSummary,
    FiscalContext, Money,
};

use super::expiry::get_appropriation_expiry_date;

/// Paid hours per person per week
pub const HOURS_PER_WEEK: Decimal = dec!(40);

/// Average weeks per month
///
/// Fixed approximation; it is not derived from the working-day calendar.
pub const WEEKS_PER_MONTH: Decimal = dec!(4.333);

/// Spreadsheet extensions the attachment field accepts
pub const ATTACHMENT_EXTENSIONS: [&str; 3] = ["xlsx", "xls", "csv"];

/// Everything the user enters on the dashboard form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionInputs {
    pub branch_size: u32,
    pub hourly_rate: Money,
    pub fiscal: FiscalContext,
    pub omn: Money,
    pub opn: Money,
    pub scn: Money,
    /// Spreadsheet attached for reference; never parsed
    pub attachment: Option<PathBuf>,
}

impl SessionInputs {
    /// Inputs with all balances at zero
    pub fn new(branch_size: u32, hourly_rate: Money, fiscal_year: i32, report_date: NaiveDate) -> Self {
        Self {
            branch_size,
            hourly_rate,
            fiscal: FiscalContext::new(fiscal_year, report_date),
            omn: Money::zero(),
            opn: Money::zero(),
            scn: Money::zero(),
            attachment: None,
        }
    }

    /// Builder-style balance setter
    pub fn with_balance(mut self, code: AppropriationCode, amount: Money) -> Self {
        *self.balance_mut(code) = amount;
        self
    }

    pub fn balance(&self, code: AppropriationCode) -> Money {
        match code {
            AppropriationCode::Omn => self.omn,
            AppropriationCode::Opn => self.opn,
            AppropriationCode::Scn => self.scn,
        }
    }

    pub fn balance_mut(&mut self, code: AppropriationCode) -> &mut Money {
        match code {
            AppropriationCode::Omn => &mut self.omn,
            AppropriationCode::Opn => &mut self.opn,
            AppropriationCode::Scn => &mut self.scn,
        }
    }

    /// The three balances in dashboard order
    pub fn balances(&self) -> [AppropriationBalance; 3] {
        AppropriationCode::ALL.map(|code| AppropriationBalance::new(code, self.balance(code)))
    }

    /// Check the form-level minimums
    ///
    /// Only branch size and hourly rate carry minimums; balances may be any
    /// value, and any fiscal year is accepted here.
    pub fn validate(&self) -> FundResult<()> {
        if self.branch_size < 1 {
            return Err(FundError::invalid_field("Branch size", "must be at least 1"));
        }
        if self.hourly_rate < Money::from_cents(1) {
            return Err(FundError::invalid_field("Hourly rate", "must be at least 0.01"));
        }
        if let Some(path) = &self.attachment {
            validate_attachment(path)?;
        }
        Ok(())
    }

    /// Note for an attached path that does not point at a file
    ///
    /// A missing attachment never blocks the analysis.
    pub fn attachment_warning(&self) -> Option<String> {
        match &self.attachment {
            Some(path) if !path.is_file() => {
                Some(format!("attachment not found: {}", path.display()))
            }
            _ => None,
        }
    }
}

/// Accept only spreadsheet-looking paths
pub fn validate_attachment(path: &Path) -> FundResult<()> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
        .unwrap_or_default();

    if !ATTACHMENT_EXTENSIONS.contains(&ext.as_str()) {
        return Err(FundError::invalid_field(
            "Attachment",
            format!("expected one of {}", ATTACHMENT_EXTENSIONS.join(", ")),
        ));
    }
    Ok(())
}

/// hourly_rate × 40 × 4.333 × branch_size, exact
pub fn monthly_personnel_cost(hourly_rate: Money, branch_size: u32) -> FundResult<Money> {
    hourly_rate
        .checked_mul(HOURS_PER_WEEK)
        .and_then(|m| m.checked_mul(WEEKS_PER_MONTH))
        .and_then(|m| m.checked_mul(Decimal::from(branch_size)))
        .ok_or_else(|| FundError::invalid_field("Monthly personnel cost", "amount is too large"))
}

/// Unweighted sum of the balances
pub fn total_balance(balances: &[AppropriationBalance]) -> FundResult<Money> {
    balances
        .iter()
        .try_fold(Money::zero(), |acc, b| acc.checked_add(b.amount))
        .ok_or_else(|| FundError::invalid_field("Total balance", "amount is too large"))
}

/// Build a fresh analysis context from the form inputs
pub fn build_analysis(inputs: &SessionInputs) -> FundResult<AnalysisContext> {
    let balances = inputs.balances();
    let fiscal_year = inputs.fiscal.fiscal_year;

    let appropriations: BTreeMap<AppropriationCode, AppropriationSummary> = balances
        .iter()
        .map(|b| {
            let summary = AppropriationSummary {
                balance: b.amount,
                expiry_date: get_appropriation_expiry_date(b.code.as_str(), fiscal_year),
            };
            (b.code, summary)
        })
        .collect();

    let context = AnalysisContext {
        report_date: inputs.fiscal.report_date,
        fiscal_year,
        total_balance: total_balance(&balances)?,
        monthly_personnel_cost: monthly_personnel_cost(inputs.hourly_rate, inputs.branch_size)?,
        appropriations,
    };

    info!(
        fiscal_year,
        branch_size = inputs.branch_size,
        total_balance = %context.total_balance,
        monthly_cost = %context.monthly_personnel_cost,
        "analysis calculated"
    );
    if let Some(path) = &inputs.attachment {
        debug!(attachment = %path.display(), "attachment recorded, not parsed");
    }
    if let Some(note) = inputs.attachment_warning() {
        warn!("{}", note);
    }

    Ok(context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BurnEstimate;
    use tempfile::TempDir;

    fn sample_inputs() -> SessionInputs {
        SessionInputs::new(
            17,
            Money::from_cents(14136),
            2025,
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        )
        .with_balance(AppropriationCode::Omn, Money::from_cents(50_000_000))
        .with_balance(AppropriationCode::Opn, Money::from_cents(25_000_000))
        .with_balance(AppropriationCode::Scn, Money::from_cents(-5_000_000))
    }

    #[test]
    fn test_monthly_personnel_cost_is_exact_product() {
        let cost = monthly_personnel_cost(Money::parse("141.36").unwrap(), 17).unwrap();
        let expected = dec!(141.36) * dec!(40) * dec!(4.333) * dec!(17);
        assert_eq!(cost.amount(), expected);
        assert_eq!(cost.amount(), dec!(416508.7584));
    }

    #[test]
    fn test_total_is_plain_sum_including_negatives() {
        let ctx = build_analysis(&sample_inputs()).unwrap();
        assert_eq!(ctx.total_balance, Money::from_cents(70_000_000));
    }

    #[test]
    fn test_context_has_fixed_codes_with_expiry() {
        let ctx = build_analysis(&sample_inputs()).unwrap();
        assert_eq!(ctx.appropriations.len(), 3);
        assert_eq!(
            ctx.appropriation(AppropriationCode::Omn).unwrap().expiry_date,
            NaiveDate::from_ymd_opt(2025, 9, 30).unwrap()
        );
        assert_eq!(
            ctx.appropriation(AppropriationCode::Opn).unwrap().expiry_date,
            NaiveDate::from_ymd_opt(2026, 9, 30).unwrap()
        );
        let scn = ctx.appropriation(AppropriationCode::Scn).unwrap();
        assert_eq!(scn.expiry_date, NaiveDate::from_ymd_opt(2027, 9, 30).unwrap());
        assert_eq!(scn.balance, Money::from_cents(-5_000_000));
    }

    #[test]
    fn test_months_of_burn_from_context() {
        let ctx = build_analysis(&sample_inputs()).unwrap();
        // 700000 / 416508.7584
        assert_eq!(ctx.months_of_burn().to_string(), "1.7");
    }

    #[test]
    fn test_zero_rate_yields_sentinel() {
        let mut inputs = sample_inputs();
        inputs.hourly_rate = Money::zero();
        let ctx = build_analysis(&inputs).unwrap();
        assert!(ctx.monthly_personnel_cost.is_zero());
        assert_eq!(ctx.months_of_burn(), BurnEstimate::NotAvailable);
    }

    #[test]
    fn test_validate_minimums() {
        let mut inputs = sample_inputs();
        assert!(inputs.validate().is_ok());

        inputs.branch_size = 0;
        assert!(inputs.validate().unwrap_err().is_validation());

        inputs.branch_size = 1;
        inputs.hourly_rate = Money::from_decimal(dec!(0.009));
        assert!(inputs.validate().is_err());

        inputs.hourly_rate = Money::from_cents(1);
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_validate_attachment() {
        let temp_dir = TempDir::new().unwrap();
        let sheet = temp_dir.path().join("obligations.XLSX");
        std::fs::write(&sheet, b"not really a workbook").unwrap();

        let mut inputs = sample_inputs();
        inputs.attachment = Some(sheet);
        assert!(inputs.validate().is_ok());

        inputs.attachment = Some(temp_dir.path().join("notes.txt"));
        assert!(inputs.validate().is_err());

        inputs.attachment = Some(temp_dir.path().join("missing.csv"));
        assert!(inputs.validate().is_ok());
    }

    #[test]
    fn test_missing_attachment_only_warns() {
        let temp_dir = TempDir::new().unwrap();
        let sheet = temp_dir.path().join("obligations.csv");

        let mut inputs = sample_inputs();
        inputs.attachment = Some(sheet.clone());
        let warning = inputs.attachment_warning().unwrap();
        assert!(warning.contains("obligations.csv"));
        assert!(build_analysis(&inputs).is_ok());

        std::fs::write(&sheet, b"code,amount").unwrap();
        assert_eq!(inputs.attachment_warning(), None);
    }

    #[test]
    fn test_overflowing_balances_are_rejected() {
        let huge = Money::from_decimal(Decimal::MAX);
        let inputs = sample_inputs()
            .with_balance(AppropriationCode::Omn, huge)
            .with_balance(AppropriationCode::Opn, huge);

        let err = build_analysis(&inputs).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Total balance"));
    }

    #[test]
    fn test_overflowing_rate_is_rejected() {
        let err = monthly_personnel_cost(Money::from_decimal(Decimal::MAX), 17).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Monthly personnel cost"));
    }
}
