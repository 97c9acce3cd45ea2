//! Core data models for Fundwatch
//!
//! This module contains the data structures of one dashboard session:
//! appropriation balances, the fiscal context, the computed analysis, and the
//! chat transcript.

pub mod analysis;
pub mod appropriation;
pub mod chat;
pub mod credential;
pub mod fiscal;
pub mod money;

pub use analysis::{AnalysisContext, AppropriationSummary, BurnEstimate};
pub use appropriation::{AppropriationBalance, AppropriationCode};
pub use chat::{ChatMessage, ChatRole, Transcript};
pub use credential::ApiCredential;
pub use fiscal::{next_fiscal_year, prev_fiscal_year, FiscalContext, FISCAL_YEAR_CHOICES};
pub use money::{Money, MoneyParseError};
