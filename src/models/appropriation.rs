//! Appropriation model
//!
//! Navy appropriation fund codes and the balances entered against them.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;

/// Appropriation fund code
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AppropriationCode {
    /// Operations & Maintenance, Navy
    Omn,
    /// Other Procurement, Navy
    Opn,
    /// Shipbuilding & Conversion, Navy
    Scn,
}

impl AppropriationCode {
    /// All codes, in dashboard order
    pub const ALL: [AppropriationCode; 3] = [Self::Omn, Self::Opn, Self::Scn];

    /// Short code as used in budget documents
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Omn => "OMN",
            Self::Opn => "OPN",
            Self::Scn => "SCN",
        }
    }

    /// Full appropriation title
    pub fn title(&self) -> &'static str {
        match self {
            Self::Omn => "Operations & Maintenance, Navy",
            Self::Opn => "Other Procurement, Navy",
            Self::Scn => "Shipbuilding & Conversion, Navy",
        }
    }

    /// Parse an exact code (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "OMN" => Some(Self::Omn),
            "OPN" => Some(Self::Opn),
            "SCN" => Some(Self::Scn),
            _ => None,
        }
    }
}

impl fmt::Display for AppropriationCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A balance entered for one appropriation
///
/// No sign check is applied: overobligated (negative) balances are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppropriationBalance {
    pub code: AppropriationCode,
    pub amount: Money,
}

impl AppropriationBalance {
    pub fn new(code: AppropriationCode, amount: Money) -> Self {
        Self { code, amount }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_code() {
        assert_eq!(AppropriationCode::parse("omn"), Some(AppropriationCode::Omn));
        assert_eq!(AppropriationCode::parse(" SCN "), Some(AppropriationCode::Scn));
        assert_eq!(AppropriationCode::parse("OMN-OPN"), None);
    }

    #[test]
    fn test_serializes_uppercase() {
        let json = serde_json::to_string(&AppropriationCode::Opn).unwrap();
        assert_eq!(json, "\"OPN\"");
    }

    #[test]
    fn test_negative_balance_accepted() {
        let balance = AppropriationBalance::new(AppropriationCode::Omn, Money::from_cents(-500));
        assert!(balance.amount.is_negative());
    }
}
