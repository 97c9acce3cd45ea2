//! Analysis display formatting
//!
//! Formats an analysis context for terminal output.

use serde::Serialize;

use crate::error::FundResult;
use crate::models::{AnalysisContext, BurnEstimate};

const LABEL_WIDTH: usize = 24;

/// Format the metric lines and the per-appropriation table
pub fn format_analysis(ctx: &AnalysisContext, symbol: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "Budget Analysis: FY{} as of {}\n",
        ctx.fiscal_year,
        ctx.report_date.format(date_format)
    ));
    output.push_str(&format!("{}\n", "=".repeat(56)));

    output.push_str(&metric_line(
        "Total balance",
        &ctx.total_balance.format_with_symbol(symbol),
    ));
    output.push_str(&metric_line(
        "Monthly personnel cost",
        &ctx.monthly_personnel_cost.format_with_symbol(symbol),
    ));
    output.push_str(&metric_line("Months of burn", &format_burn(ctx.months_of_burn())));
    output.push('\n');

    output.push_str(&format!(
        "{:<6}  {:>18}  {:<12}  {}\n",
        "Code", "Balance", "Expires", "Appropriation"
    ));
    output.push_str(&format!(
        "{:-<6}  {:->18}  {:-<12}  {:-<32}\n",
        "", "", "", ""
    ));

    for (code, summary) in &ctx.appropriations {
        output.push_str(&format!(
            "{:<6}  {:>18}  {:<12}  {}\n",
            code.as_str(),
            summary.balance.format_with_symbol(symbol),
            summary.expiry_date.format(date_format).to_string(),
            code.title(),
        ));
    }

    output
}

/// "N/A" or "<months> months"
pub fn format_burn(estimate: BurnEstimate) -> String {
    match estimate {
        BurnEstimate::Months(_) => format!("{} months", estimate),
        BurnEstimate::NotAvailable => estimate.to_string(),
    }
}

fn metric_line(label: &str, value: &str) -> String {
    format!("{:<width$}{}\n", format!("{}:", label), value, width = LABEL_WIDTH)
}

#[derive(Serialize)]
struct AnalysisJson<'a> {
    #[serde(flatten)]
    context: &'a AnalysisContext,
    months_of_burn: BurnEstimate,
}

/// Pretty JSON of the context plus the derived months-of-burn figure
pub fn format_analysis_json(ctx: &AnalysisContext) -> FundResult<String> {
    let doc = AnalysisJson {
        context: ctx,
        months_of_burn: ctx.months_of_burn(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AppropriationCode, Money};
    use crate::services::analysis::{build_analysis, SessionInputs};
    use chrono::NaiveDate;

    fn context(rate_cents: i64) -> AnalysisContext {
        let inputs = SessionInputs::new(
            17,
            Money::from_cents(rate_cents),
            2025,
            NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
        )
        .with_balance(AppropriationCode::Omn, Money::from_cents(120_000_000))
        .with_balance(AppropriationCode::Opn, Money::from_cents(30_000_000));
        build_analysis(&inputs).unwrap()
    }

    #[test]
    fn test_format_analysis() {
        let text = format_analysis(&context(14136), "$", "%Y-%m-%d");
        assert!(text.contains("FY2025 as of 2025-03-14"));
        assert!(text.contains("Total balance:          $1,500,000.00"));
        assert!(text.contains("Monthly personnel cost: $416,508.76"));
        assert!(text.contains("Months of burn:         3.6 months"));
        assert!(text.contains("2026-09-30"));
        assert!(text.contains("Shipbuilding & Conversion, Navy"));
    }

    #[test]
    fn test_format_burn_sentinel() {
        let ctx = context(0);
        assert_eq!(format_burn(ctx.months_of_burn()), "N/A");
        assert!(format_analysis(&ctx, "$", "%Y-%m-%d").contains("Months of burn:         N/A"));
    }

    #[test]
    fn test_json_includes_months_of_burn() {
        let json = format_analysis_json(&context(0)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["months_of_burn"], "N/A");
        assert_eq!(value["fiscal_year"], 2025);
        assert!(value["appropriations"]["SCN"].is_object());
    }
}
