//! Analysis context
//!
//! The snapshot produced by one Calculate action. It is what the chat
//! assistant sees, serialized as JSON, when answering a question.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use super::appropriation::AppropriationCode;
use super::money::Money;
use crate::error::FundResult;

/// Balance and statutory expiry for one appropriation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppropriationSummary {
    pub balance: Money,
    pub expiry_date: NaiveDate,
}

/// Computed figures for one Calculate action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisContext {
    pub report_date: NaiveDate,
    pub fiscal_year: i32,
    pub total_balance: Money,
    pub monthly_personnel_cost: Money,
    pub appropriations: BTreeMap<AppropriationCode, AppropriationSummary>,
}

impl AnalysisContext {
    /// Remaining balance expressed in months of personnel cost
    pub fn months_of_burn(&self) -> BurnEstimate {
        BurnEstimate::from_amounts(self.total_balance, self.monthly_personnel_cost)
    }

    /// Summary for one appropriation code
    pub fn appropriation(&self, code: AppropriationCode) -> Option<&AppropriationSummary> {
        self.appropriations.get(&code)
    }

    /// Pretty JSON embedded in the assistant's system instruction
    pub fn to_prompt_json(&self) -> FundResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Months-of-burn figure, or a sentinel when it cannot be computed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BurnEstimate {
    Months(Decimal),
    /// Monthly cost is zero or negative
    NotAvailable,
}

impl BurnEstimate {
    /// total / monthly cost, guarded so a non-positive cost never divides
    pub fn from_amounts(total: Money, monthly_cost: Money) -> Self {
        if !monthly_cost.is_positive() {
            return Self::NotAvailable;
        }
        match total.ratio(monthly_cost) {
            Some(months) => Self::Months(months),
            None => Self::NotAvailable,
        }
    }
}

impl fmt::Display for BurnEstimate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Months(m) => {
                let rounded = m.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero);
                write!(f, "{:.1}", rounded)
            }
            Self::NotAvailable => write!(f, "N/A"),
        }
    }
}

impl Serialize for BurnEstimate {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
